//! Text renderings of a [`BatchResult`].
//!
//! Renderers are pure; [`write_report`] is the only function here that
//! touches the filesystem.

pub mod json;
pub mod summary;
pub mod table;
pub mod xyz;

pub use json::render_json;
pub use summary::render_summary;
pub use table::render_table;
pub use xyz::{XyzFrame, XyzParseError, parse_xyz_frames, render_xyz};

use crate::domain::BatchResult;
use crate::modules::serialization::write_text_artifact;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const FAILED_FILE_NOTICE: &str = "⚠️ This file encountered an Error";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    #[default]
    Table,
    Summary,
    Xyz,
    Json,
}

impl ReportFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Summary => "summary",
            Self::Xyz => "xyz",
            Self::Json => "json",
        }
    }

    pub const fn default_file_name(self) -> &'static str {
        match self {
            Self::Table => "thermolog_energies.tsv",
            Self::Summary => "thermolog_summary.txt",
            Self::Xyz => "thermolog_geometries.xyz",
            Self::Json => "thermolog_report.json",
        }
    }
}

impl Display for ReportFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("failed to write report '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// `Ok(None)` means the format has nothing to emit for this batch.
pub fn render_report(
    batch: &BatchResult,
    format: ReportFormat,
) -> Result<Option<String>, WriteError> {
    Ok(match format {
        ReportFormat::Table => Some(render_table(batch)),
        ReportFormat::Summary => Some(render_summary(batch)),
        ReportFormat::Xyz => render_xyz(batch),
        ReportFormat::Json => Some(render_json(batch)?),
    })
}

pub fn write_report(path: &Path, content: &str) -> Result<(), WriteError> {
    write_text_artifact(path, content).map_err(|source| WriteError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// File name shown in reports: the `.log` extension is dropped.
pub(crate) fn display_name(source_file: &str) -> &str {
    source_file.strip_suffix(".log").unwrap_or(source_file)
}


#[cfg(test)]
mod tests {
    use super::fixtures::{broken, mixed_batch};
    use super::{ReportFormat, display_name, render_report, write_report};
    use crate::pipelines::assemble_batch;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_file_names_follow_the_format() {
        assert_eq!(ReportFormat::Table.default_file_name(), "thermolog_energies.tsv");
        assert_eq!(ReportFormat::Xyz.to_string(), "xyz");
    }

    #[test]
    fn display_name_drops_only_the_log_extension() {
        assert_eq!(display_name("water.log"), "water");
        assert_eq!(display_name("water.out"), "water.out");
        assert_eq!(display_name("a.log.log"), "a.log");
    }

    #[test]
    fn xyz_report_is_absent_when_every_file_failed() {
        let batch = assemble_batch(vec![broken("a.log")]);
        assert!(
            render_report(&batch, ReportFormat::Xyz)
                .expect("render should succeed")
                .is_none()
        );
        assert!(
            render_report(&batch, ReportFormat::Table)
                .expect("render should succeed")
                .is_some()
        );
    }

    #[test]
    fn reports_are_written_with_a_trailing_newline() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("out/report.tsv");
        let content = render_report(&mixed_batch(), ReportFormat::Table)
            .expect("render should succeed")
            .expect("table is always rendered");

        write_report(&path, &content).expect("report should be written");
        let written = fs::read_to_string(&path).expect("report should be readable");
        assert!(written.ends_with('\n'));
        assert_eq!(written.trim_end(), content.trim_end());
    }
}
