use super::FAILED_FILE_NOTICE;
use crate::domain::{BatchResult, MoleculeRecord, Outcome};

/// Per-file excerpt report. Sections within a file and files themselves are
/// both separated by one blank line.
pub fn render_summary(batch: &BatchResult) -> String {
    let sections: Vec<String> = batch
        .entries
        .iter()
        .map(|entry| match &entry.outcome {
            Outcome::Success(record) => record_section(record),
            Outcome::Failure(failure) => {
                format!("{}\n\n{}", failure.source_file, FAILED_FILE_NOTICE)
            }
        })
        .collect();

    let mut rendered = sections.join("\n\n");
    if !rendered.is_empty() {
        rendered.push('\n');
    }
    rendered
}

fn record_section(record: &MoleculeRecord) -> String {
    let excerpts = &record.excerpts;
    let mut parts = vec![
        record.source_file.as_str(),
        record.header.as_str(),
        excerpts.charge_multiplicity_line.as_str(),
        excerpts.thermochemistry.as_str(),
    ];
    let low_frequencies = excerpts.low_frequency_lines.join("\n");
    parts.push(&low_frequencies);
    parts.join("\n\n")
}
