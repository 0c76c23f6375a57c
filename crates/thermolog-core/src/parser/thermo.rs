use super::{first_integer, numeric_tokens};
use crate::common::constants::IMAGINARY_FREQUENCY_THRESHOLD;
use crate::domain::{ExtractionError, ExtractionResult, ImaginaryFrequencyFlag, ThermoRecord};
use regex::Regex;
use std::sync::LazyLock;

pub const ZERO_POINT_MARKER: &str = "Zero-point correction=";
pub const LOW_FREQUENCY_MARKER: &str = "Low frequencies ---";

// Zero-point correction, three thermal corrections, then the four
// "Sum of electronic and ..." lines.
const THERMOCHEMISTRY_VALUE_COUNT: usize = 8;
const ZERO_POINT_INDEX: usize = 0;
const ELECTRONIC_PLUS_ZPE_INDEX: usize = 4;
const ENTHALPY_INDEX: usize = 6;
const FREE_ENERGY_INDEX: usize = 7;

static CHARGE_MULTIPLICITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Charge = ([^\n]*?) Multiplicity = ([^\n]*)")
        .expect("charge/multiplicity pattern should compile")
});

/// Charge and spin multiplicity as printed in the molecule specification.
pub type ChargeMultiplicity = (i32, i32);

pub fn charge_multiplicity_line(text: &str) -> Option<&str> {
    CHARGE_MULTIPLICITY
        .find(text)
        .map(|found| found.as_str().trim_end())
}

pub fn parse_charge_and_multiplicity(text: &str) -> ExtractionResult<ChargeMultiplicity> {
    let captures = CHARGE_MULTIPLICITY.captures(text).ok_or_else(|| {
        ExtractionError::missing_charge_multiplicity("no 'Charge = ... Multiplicity = ...' line")
    })?;

    let field = |index: usize, name: &str| {
        captures
            .get(index)
            .and_then(|value| first_integer(value.as_str()))
            .ok_or_else(|| {
                ExtractionError::missing_charge_multiplicity(format!(
                    "{name} is not an integer in '{}'",
                    captures
                        .get(0)
                        .map(|line| line.as_str().trim())
                        .unwrap_or_default()
                ))
            })
    };

    Ok((field(1, "charge")?, field(2, "multiplicity")?))
}

/// Lines from the one holding the zero-point correction up to the next
/// blank line (or the end of `text`).
pub fn thermochemistry_span(text: &str) -> Option<&str> {
    let marker = text.find(ZERO_POINT_MARKER)?;
    let start = text[..marker].rfind('\n').map_or(0, |newline| newline + 1);

    let mut end = text.len();
    let mut offset = start;
    for (index, line) in text[start..].split_inclusive('\n').enumerate() {
        if index > 0 && line.trim().is_empty() {
            end = offset;
            break;
        }
        offset += line.len();
    }

    Some(text[start..end].trim_end())
}

pub fn parse_thermochemistry(text: &str) -> ExtractionResult<ThermoRecord> {
    let span = thermochemistry_span(text).ok_or_else(|| {
        ExtractionError::malformed_thermochemistry(format!("no '{ZERO_POINT_MARKER}' summary"))
    })?;

    let values = numeric_tokens(span);
    if values.len() < THERMOCHEMISTRY_VALUE_COUNT {
        return Err(ExtractionError::malformed_thermochemistry(format!(
            "thermochemistry summary holds {} numeric values, expected {}",
            values.len(),
            THERMOCHEMISTRY_VALUE_COUNT
        )));
    }

    Ok(ThermoRecord::new(
        values[ZERO_POINT_INDEX],
        values[ELECTRONIC_PLUS_ZPE_INDEX],
        values[ENTHALPY_INDEX],
        values[FREE_ENERGY_INDEX],
    ))
}

/// Every "Low frequencies ---" line, starting at the marker.
pub fn low_frequency_lines(text: &str) -> Vec<&str> {
    text.match_indices(LOW_FREQUENCY_MARKER)
        .map(|(start, _)| {
            let line = &text[start..];
            line.split('\n').next().unwrap_or(line).trim_end()
        })
        .collect()
}

pub fn classify_imaginary_frequencies(text: &str) -> ExtractionResult<ImaginaryFrequencyFlag> {
    let line = low_frequency_lines(text)
        .into_iter()
        .next()
        .ok_or_else(|| {
            ExtractionError::malformed_thermochemistry(format!(
                "no '{LOW_FREQUENCY_MARKER}' line"
            ))
        })?;

    let values = numeric_tokens(&line[LOW_FREQUENCY_MARKER.len()..]);
    if values.is_empty() {
        return Err(ExtractionError::malformed_thermochemistry(format!(
            "'{}' lists no frequencies",
            line.trim()
        )));
    }

    Ok(classify_low_frequencies(&values))
}

/// Reports the first listed value, not the most negative one, once any
/// magnitude reaches the noise threshold.
pub fn classify_low_frequencies(values: &[f64]) -> ImaginaryFrequencyFlag {
    if values
        .iter()
        .all(|value| value.abs() < IMAGINARY_FREQUENCY_THRESHOLD)
    {
        return ImaginaryFrequencyFlag::None;
    }

    values
        .first()
        .copied()
        .map_or(ImaginaryFrequencyFlag::None, ImaginaryFrequencyFlag::Reported)
}
