use crate::domain::ExecutionMode;
use crate::writers::ReportFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_INPUT_PATTERN: &str = "*.log";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BatchConfig {
    pub inputs: Vec<PathBuf>,
    pub pattern: String,
    pub execution_mode: ExecutionMode,
    pub format: ReportFormat,
    pub output: Option<PathBuf>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            pattern: DEFAULT_INPUT_PATTERN.to_string(),
            execution_mode: ExecutionMode::default(),
            format: ReportFormat::default(),
            output: None,
        }
    }
}

impl BatchConfig {
    /// Report path used when none was configured: the format's default file
    /// name inside `dir`.
    pub fn output_path_in(&self, dir: &Path) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| dir.join(self.format.default_file_name()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read batch config '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse batch config '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

pub fn load_batch_config(config_path: impl AsRef<Path>) -> Result<BatchConfig, ConfigError> {
    let config_path = config_path.as_ref();
    let source = fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
        path: config_path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&source).map_err(|source| ConfigError::Parse {
        path: config_path.to_path_buf(),
        source,
    })
}
