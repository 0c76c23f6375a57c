use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ExtractionResult<T> = Result<T, ExtractionError>;

/// File-scoped failure classes. None of them is fatal to a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    NoFrequencyBlock,
    IncompleteJob,
    MalformedThermochemistry,
    MissingChargeMultiplicity,
    MissingGeometry,
    Unreadable,
}

impl ErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoFrequencyBlock => "NoFrequencyBlock",
            Self::IncompleteJob => "IncompleteJob",
            Self::MalformedThermochemistry => "MalformedThermochemistry",
            Self::MissingChargeMultiplicity => "MissingChargeMultiplicity",
            Self::MissingGeometry => "MissingGeometry",
            Self::Unreadable => "Unreadable",
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::NoFrequencyBlock => "PARSE.NO_FREQ_BLOCK",
            Self::IncompleteJob => "PARSE.INCOMPLETE_JOB",
            Self::MalformedThermochemistry => "PARSE.THERMOCHEMISTRY",
            Self::MissingChargeMultiplicity => "PARSE.CHARGE_MULTIPLICITY",
            Self::MissingGeometry => "PARSE.GEOMETRY",
            Self::Unreadable => "IO.LOG_READ",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionError {
    kind: ErrorKind,
    detail: String,
}

impl ExtractionError {
    pub fn new(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    pub fn no_frequency_block(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::NoFrequencyBlock, detail)
    }

    pub fn incomplete_job(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::IncompleteJob, detail)
    }

    pub fn malformed_thermochemistry(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedThermochemistry, detail)
    }

    pub fn missing_charge_multiplicity(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingChargeMultiplicity, detail)
    }

    pub fn missing_geometry(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingGeometry, detail)
    }

    pub fn unreadable(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unreadable, detail)
    }

    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub const fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    pub fn into_detail(self) -> String {
        self.detail
    }

    pub fn diagnostic_line(&self) -> String {
        format!("ERROR: [{}] {}", self.code(), self.detail)
    }
}

impl Display for ExtractionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.kind, self.code(), self.detail)
    }
}

impl Error for ExtractionError {}

#[cfg(test)]
mod tests {
    use super::{ErrorKind, ExtractionError};

    #[test]
    fn error_codes_are_stable() {
        let cases = [
            (ErrorKind::NoFrequencyBlock, "PARSE.NO_FREQ_BLOCK"),
            (ErrorKind::IncompleteJob, "PARSE.INCOMPLETE_JOB"),
            (ErrorKind::MalformedThermochemistry, "PARSE.THERMOCHEMISTRY"),
            (
                ErrorKind::MissingChargeMultiplicity,
                "PARSE.CHARGE_MULTIPLICITY",
            ),
            (ErrorKind::MissingGeometry, "PARSE.GEOMETRY"),
            (ErrorKind::Unreadable, "IO.LOG_READ"),
        ];

        for (kind, code) in cases {
            assert_eq!(kind.code(), code);
        }
    }

    #[test]
    fn diagnostic_line_carries_code_and_detail() {
        let error = ExtractionError::incomplete_job("no 'Normal termination' after byte 120");

        assert_eq!(error.kind(), ErrorKind::IncompleteJob);
        assert_eq!(
            error.diagnostic_line(),
            "ERROR: [PARSE.INCOMPLETE_JOB] no 'Normal termination' after byte 120"
        );
        assert_eq!(
            error.to_string(),
            "IncompleteJob [PARSE.INCOMPLETE_JOB] no 'Normal termination' after byte 120"
        );
    }
}
