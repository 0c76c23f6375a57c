use crate::domain::{ExtractionError, ExtractionResult};
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

pub const TERMINATION_MARKER: &str = "Normal termination";

// Dashed rule, newline, one space, route line starting with '#', through the
// next dashed rule.
static ROUTE_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)--+\n (#.*?)--+").expect("route section pattern should compile")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteHeader {
    pub span: Range<usize>,
    pub route: String,
    pub requests_frequencies: bool,
}

/// Slice of a log from the selected frequency job header through its
/// termination marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyBlock<'a> {
    text: &'a str,
    span: Range<usize>,
    header: String,
}

impl<'a> FrequencyBlock<'a> {
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Byte offsets of the block inside the full log.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Route section with the line-continuation indent removed.
    pub fn header(&self) -> &str {
        &self.header
    }
}

pub fn route_headers(text: &str) -> Vec<RouteHeader> {
    ROUTE_SECTION
        .captures_iter(text)
        .filter_map(|captures| {
            let whole = captures.get(0)?;
            let route = captures.get(1)?;
            Some(RouteHeader {
                span: whole.range(),
                route: route.as_str().replace("\n ", ""),
                requests_frequencies: mentions_frequency(whole.as_str()),
            })
        })
        .collect()
}

/// Byte offset just past the first termination marker at or after `from`.
pub fn find_termination(text: &str, from: usize) -> Option<usize> {
    let tail = text.get(from..)?;
    tail.find(TERMINATION_MARKER)
        .map(|offset| from + offset + TERMINATION_MARKER.len())
}

pub fn locate(text: &str) -> ExtractionResult<FrequencyBlock<'_>> {
    let header = route_headers(text)
        .into_iter()
        .rev()
        .find(|header| header.requests_frequencies)
        .ok_or_else(|| {
            ExtractionError::no_frequency_block(
                "no job route section requests a frequency calculation",
            )
        })?;

    let end = find_termination(text, header.span.end).ok_or_else(|| {
        ExtractionError::incomplete_job(format!(
            "no '{}' after frequency job '{}'",
            TERMINATION_MARKER,
            header.route.trim()
        ))
    })?;

    let span = header.span.start..end;
    Ok(FrequencyBlock {
        text: &text[span.clone()],
        span,
        header: header.route,
    })
}

// Route keywords may wrap across lines, so whitespace is dropped before matching.
fn mentions_frequency(section: &str) -> bool {
    section
        .chars()
        .filter(|character| !character.is_whitespace())
        .collect::<String>()
        .to_lowercase()
        .contains("freq")
}
