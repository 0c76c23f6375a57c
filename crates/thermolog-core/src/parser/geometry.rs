use crate::domain::{AtomRecord, ExtractionError, ExtractionResult, Geometry};

pub const ORIENTATION_CAPTION: &str = "Standard orientation:";

const MIN_RULE_WIDTH: usize = 10;
const ROW_FIELD_COUNT: usize = 6;

/// Data rows of every complete "Standard orientation:" table, in file order.
///
/// A table is the caption, a dashed rule, column headings, a dashed rule,
/// the rows, and a closing dashed rule. Captions whose framing is broken are
/// skipped.
pub fn coordinate_tables(text: &str) -> Vec<Vec<&str>> {
    let lines: Vec<&str> = text.lines().collect();
    let mut tables = Vec::new();
    let mut index = 0;

    while index < lines.len() {
        if !lines[index].contains(ORIENTATION_CAPTION) {
            index += 1;
            continue;
        }

        match table_rows_after_caption(&lines, index) {
            Some((rows, next_index)) => {
                tables.push(rows);
                index = next_index;
            }
            None => index += 1,
        }
    }

    tables
}

pub fn parse_geometry(text: &str) -> ExtractionResult<Geometry> {
    let tables = coordinate_tables(text);
    let rows = tables.last().ok_or_else(|| {
        ExtractionError::missing_geometry(format!("no '{ORIENTATION_CAPTION}' table"))
    })?;

    if rows.is_empty() {
        return Err(ExtractionError::missing_geometry(format!(
            "last '{ORIENTATION_CAPTION}' table has no atoms"
        )));
    }

    rows.iter()
        .enumerate()
        .map(|(row_index, row)| parse_atom_row(row_index + 1, row))
        .collect::<ExtractionResult<Vec<_>>>()
        .map(Geometry::new)
}

fn table_rows_after_caption<'a>(
    lines: &[&'a str],
    caption_index: usize,
) -> Option<(Vec<&'a str>, usize)> {
    let mut index = caption_index + 1;
    if !is_dashed_rule(lines.get(index)?) {
        return None;
    }
    index += 1;

    // Column headings run up to the second rule.
    while !is_dashed_rule(lines.get(index)?) {
        index += 1;
    }
    index += 1;

    let mut rows = Vec::new();
    loop {
        let line = lines.get(index)?;
        if is_dashed_rule(line) {
            return Some((rows, index + 1));
        }
        rows.push(*line);
        index += 1;
    }
}

fn parse_atom_row(row_number: usize, row: &str) -> ExtractionResult<AtomRecord> {
    let fields: Vec<&str> = row.split_whitespace().collect();
    if fields.len() < ROW_FIELD_COUNT {
        return Err(ExtractionError::missing_geometry(format!(
            "coordinate row {row_number} has {} fields, expected {ROW_FIELD_COUNT}: '{}'",
            fields.len(),
            row.trim()
        )));
    }

    let invalid = |name: &str, token: &str| {
        ExtractionError::missing_geometry(format!(
            "coordinate row {row_number} has invalid {name} '{token}'"
        ))
    };

    let atomic_number = fields[1]
        .parse::<u32>()
        .map_err(|_| invalid("atomic number", fields[1]))?;
    let mut coordinates = [0.0_f64; 3];
    for (axis, token) in coordinates
        .iter_mut()
        .zip(fields[3..ROW_FIELD_COUNT].iter().copied())
    {
        *axis = token
            .parse::<f64>()
            .map_err(|_| invalid("coordinate", token))?;
    }

    let [x, y, z] = coordinates;
    Ok(AtomRecord::new(atomic_number, x, y, z))
}

fn is_dashed_rule(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= MIN_RULE_WIDTH && trimmed.bytes().all(|byte| byte == b'-')
}
