use crate::common::elements::atomic_number_for_symbol;
use crate::domain::{AtomRecord, BatchResult, MoleculeRecord, Outcome};
use crate::modules::serialization::format_fixed_f64;
use tracing::error;

const COORDINATE_WIDTH: usize = 14;
const COORDINATE_PRECISION: usize = 6;

/// One frame read back from a multi-frame XYZ file.
#[derive(Debug, Clone, PartialEq)]
pub struct XyzFrame {
    pub comment: String,
    pub atoms: Vec<AtomRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum XyzParseError {
    #[error("line {line}: expected an atom count, found '{found}'")]
    InvalidCount { line: usize, found: String },
    #[error("line {line}: frame ended before all {expected} atoms were read")]
    TruncatedFrame { line: usize, expected: usize },
    #[error("line {line}: malformed atom row '{row}'")]
    InvalidAtom { line: usize, row: String },
}

/// Merged geometries of every successful record. Returns `None` when the
/// batch has no success to write.
pub fn render_xyz(batch: &BatchResult) -> Option<String> {
    let mut frames = Vec::new();
    for entry in &batch.entries {
        match &entry.outcome {
            Outcome::Success(record) => frames.push(render_frame(record)),
            Outcome::Failure(failure) => {
                error!(file = %failure.source_file, "skipped in xyz output: {}", failure.diagnostic_line());
            }
        }
    }

    if frames.is_empty() {
        return None;
    }
    Some(frames.concat())
}

pub fn frame_comment(record: &MoleculeRecord) -> String {
    format!(
        "{} | E(HF)={:.6} | E(0K)={:.6} | Imag={} | Charge={} | Multiplicity={}",
        record.source_file,
        record.thermo.total_electronic_energy,
        record.thermo.electronic_plus_zpe_energy,
        record.imaginary_frequency,
        record.charge,
        record.multiplicity
    )
}

fn render_frame(record: &MoleculeRecord) -> String {
    let mut frame = format!("{}\n{}\n", record.geometry.len(), frame_comment(record));
    for atom in record.geometry.iter() {
        let label = atom
            .symbol()
            .map(str::to_string)
            .unwrap_or_else(|| atom.atomic_number.to_string());
        frame.push_str(&format!("{label:<3}"));
        for coordinate in atom.position() {
            frame.push_str(&format_fixed_f64(
                coordinate,
                COORDINATE_WIDTH,
                COORDINATE_PRECISION,
            ));
        }
        frame.push('\n');
    }
    frame
}

/// Reads consecutive frames. Blank lines between frames are tolerated; atom
/// labels may be element symbols or atomic numbers.
pub fn parse_xyz_frames(content: &str) -> Result<Vec<XyzFrame>, XyzParseError> {
    let lines: Vec<&str> = content.lines().collect();
    let mut frames = Vec::new();
    let mut cursor = 0;

    while cursor < lines.len() {
        let count_line = lines[cursor].trim();
        if count_line.is_empty() {
            cursor += 1;
            continue;
        }
        let expected: usize = count_line
            .parse()
            .map_err(|_| XyzParseError::InvalidCount {
                line: cursor + 1,
                found: count_line.to_string(),
            })?;

        let comment = lines
            .get(cursor + 1)
            .ok_or(XyzParseError::TruncatedFrame {
                line: cursor + 1,
                expected,
            })?;
        let rows_start = cursor + 2;
        let rows_end = rows_start + expected;
        if rows_end > lines.len() {
            return Err(XyzParseError::TruncatedFrame {
                line: lines.len(),
                expected,
            });
        }

        let atoms = lines[rows_start..rows_end]
            .iter()
            .enumerate()
            .map(|(offset, row)| parse_atom_row(row, rows_start + offset + 1))
            .collect::<Result<Vec<_>, _>>()?;

        frames.push(XyzFrame {
            comment: comment.to_string(),
            atoms,
        });
        cursor = rows_end;
    }

    Ok(frames)
}

fn parse_atom_row(row: &str, line: usize) -> Result<AtomRecord, XyzParseError> {
    let invalid = || XyzParseError::InvalidAtom {
        line,
        row: row.to_string(),
    };
    let fields: Vec<&str> = row.split_whitespace().collect();
    let [label, x, y, z] = fields.as_slice() else {
        return Err(invalid());
    };

    let atomic_number = match label.parse::<u32>() {
        Ok(number) => number,
        Err(_) => atomic_number_for_symbol(label)
            .and_then(|number| u32::try_from(number).ok())
            .ok_or_else(invalid)?,
    };
    let coordinate = |token: &str| token.parse::<f64>().map_err(|_| invalid());

    Ok(AtomRecord::new(
        atomic_number,
        coordinate(*x)?,
        coordinate(*y)?,
        coordinate(*z)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::{XyzParseError, parse_xyz_frames, render_xyz};
    use crate::writers::fixtures::mixed_batch;

    #[test]
    fn frames_carry_energies_and_symbols() {
        let xyz = render_xyz(&mixed_batch()).expect("batch has successes");
        let lines: Vec<_> = xyz.lines().collect();

        assert_eq!(lines[0], "3");
        assert_eq!(
            lines[1],
            "water.log | E(HF)=-76.421000 | E(0K)=-76.400000 | Imag=0 | Charge=0 | Multiplicity=1"
        );
        assert!(lines[2].starts_with("O "));
        assert!(lines[3].starts_with("H "));
        assert_eq!(lines[5], "3");
        assert!(lines[6].starts_with("water_b.log | "));
        assert_eq!(lines.len(), 10);
    }

    #[test]
    fn written_frames_read_back_to_six_decimals() {
        let batch = mixed_batch();
        let xyz = render_xyz(&batch).expect("batch has successes");
        let frames = parse_xyz_frames(&xyz).expect("rendered xyz should parse");

        let originals: Vec<_> = batch.successes().collect();
        assert_eq!(frames.len(), originals.len());
        for (frame, record) in frames.iter().zip(originals) {
            assert_eq!(frame.atoms.len(), record.geometry.len());
            for (read, written) in frame.atoms.iter().zip(record.geometry.iter()) {
                assert_eq!(read.atomic_number, written.atomic_number);
                for (a, b) in read.position().into_iter().zip(written.position()) {
                    assert!((a - b).abs() < 5e-7, "{a} vs {b}");
                }
            }
        }
    }

    #[test]
    fn numeric_labels_and_truncation_are_handled() {
        let frames = parse_xyz_frames("1\ncomment\n6 0.0 0.0 0.0\n").expect("frame should parse");
        assert_eq!(frames[0].atoms[0].atomic_number, 6);
        assert_eq!(frames[0].comment, "comment");

        assert_eq!(
            parse_xyz_frames("2\ncomment\nC 0 0 0\n"),
            Err(XyzParseError::TruncatedFrame {
                line: 3,
                expected: 2
            })
        );
        assert!(matches!(
            parse_xyz_frames("x\n"),
            Err(XyzParseError::InvalidCount { line: 1, .. })
        ));
        assert!(matches!(
            parse_xyz_frames("1\nc\nXx 0 0 0\n"),
            Err(XyzParseError::InvalidAtom { line: 3, .. })
        ));
    }
}
