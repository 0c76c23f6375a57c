//! Section locators and extractors over the text of one Gaussian log.
//!
//! Each function works on a borrowed `&str` and returns either a value or a
//! typed [`ExtractionError`](crate::domain::ExtractionError), so the pieces
//! can be exercised in isolation and composed by the pipeline.

pub mod block;
pub mod geometry;
pub mod thermo;

pub use block::{FrequencyBlock, RouteHeader, find_termination, locate, route_headers};
pub use geometry::{coordinate_tables, parse_geometry};
pub use thermo::{
    ChargeMultiplicity, charge_multiplicity_line, classify_imaginary_frequencies,
    low_frequency_lines, parse_charge_and_multiplicity, parse_thermochemistry,
    thermochemistry_span,
};

use regex::Regex;
use std::sync::LazyLock;

static NUMERIC_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"-?[0-9]*\.[0-9]+|-?[0-9]+").expect("numeric token pattern should compile")
});

static INTEGER_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?[0-9]+").expect("integer token pattern should compile"));

/// Signed integers and decimals embedded anywhere in `text`, in order.
pub fn numeric_tokens(text: &str) -> Vec<f64> {
    NUMERIC_TOKEN
        .find_iter(text)
        .filter_map(|token| token.as_str().parse::<f64>().ok())
        .collect()
}

pub(crate) fn first_integer(text: &str) -> Option<i32> {
    INTEGER_TOKEN
        .find(text)
        .and_then(|token| token.as_str().parse::<i32>().ok())
}
