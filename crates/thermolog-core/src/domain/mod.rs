pub mod errors;

pub use errors::{ErrorKind, ExtractionError, ExtractionResult};

use crate::common::elements::element_symbol;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ExecutionMode {
    #[default]
    Serial,
    /// Bounded worker pool; `workers == 0` lets rayon pick the thread count.
    Parallel { workers: usize },
}

/// Thermochemistry summary in Hartree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThermoRecord {
    pub zero_point_correction: f64,
    pub electronic_plus_zpe_energy: f64,
    pub thermal_enthalpy: f64,
    pub thermal_free_energy: f64,
    pub total_electronic_energy: f64,
}

impl ThermoRecord {
    pub fn new(
        zero_point_correction: f64,
        electronic_plus_zpe_energy: f64,
        thermal_enthalpy: f64,
        thermal_free_energy: f64,
    ) -> Self {
        Self {
            zero_point_correction,
            electronic_plus_zpe_energy,
            thermal_enthalpy,
            thermal_free_energy,
            total_electronic_energy: electronic_plus_zpe_energy - zero_point_correction,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "frequency", rename_all = "snake_case")]
pub enum ImaginaryFrequencyFlag {
    None,
    /// First reported low frequency (cm^-1), sign preserved.
    Reported(f64),
}

impl ImaginaryFrequencyFlag {
    pub fn reported(&self) -> Option<f64> {
        match self {
            Self::None => None,
            Self::Reported(value) => Some(*value),
        }
    }
}

impl Display for ImaginaryFrequencyFlag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => f.write_str("0"),
            Self::Reported(value) => write!(f, "{value}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtomRecord {
    pub atomic_number: u32,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl AtomRecord {
    pub fn new(atomic_number: u32, x: f64, y: f64, z: f64) -> Self {
        Self {
            atomic_number,
            x,
            y,
            z,
        }
    }

    pub fn position(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    pub fn symbol(&self) -> Option<&'static str> {
        element_symbol(self.atomic_number as usize)
    }
}

/// Atoms in the order of the source coordinate table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Geometry {
    pub atoms: Vec<AtomRecord>,
}

impl Geometry {
    pub fn new(atoms: Vec<AtomRecord>) -> Self {
        Self { atoms }
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AtomRecord> {
        self.atoms.iter()
    }
}

/// Verbatim source lines kept for the textual summary report.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecordExcerpts {
    pub charge_multiplicity_line: String,
    pub thermochemistry: String,
    pub low_frequency_lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoleculeRecord {
    pub source_file: String,
    pub header: String,
    pub charge: i32,
    pub multiplicity: i32,
    pub imaginary_frequency: ImaginaryFrequencyFlag,
    pub thermo: ThermoRecord,
    pub geometry: Geometry,
    pub excerpts: RecordExcerpts,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    pub source_file: String,
    pub kind: ErrorKind,
    pub detail: String,
}

impl FailureRecord {
    pub fn from_error(source_file: impl Into<String>, error: ExtractionError) -> Self {
        let kind = error.kind();
        Self {
            source_file: source_file.into(),
            kind,
            detail: error.into_detail(),
        }
    }

    pub fn diagnostic_line(&self) -> String {
        format!(
            "ERROR: [{}] {}: {}",
            self.kind.code(),
            self.source_file,
            self.detail
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Success(MoleculeRecord),
    Failure(FailureRecord),
}

impl Outcome {
    pub fn source_file(&self) -> &str {
        match self {
            Self::Success(record) => &record.source_file,
            Self::Failure(failure) => &failure.source_file,
        }
    }

    pub fn as_success(&self) -> Option<&MoleculeRecord> {
        match self {
            Self::Success(record) => Some(record),
            Self::Failure(_) => None,
        }
    }

    pub fn as_failure(&self) -> Option<&FailureRecord> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(failure),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }
}

/// Energies relative to the batch reference, in kJ/mol rounded to one decimal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelativeEnergies {
    pub total_electronic: f64,
    pub electronic_plus_zpe: f64,
    pub enthalpy: f64,
    pub free_energy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchEntry {
    pub outcome: Outcome,
    pub relative: Option<RelativeEnergies>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BatchResult {
    pub entries: Vec<BatchEntry>,
    pub reference_index: Option<usize>,
    pub error_count: usize,
}

impl BatchResult {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn successes(&self) -> impl Iterator<Item = &MoleculeRecord> {
        self.entries
            .iter()
            .filter_map(|entry| entry.outcome.as_success())
    }

    pub fn failures(&self) -> impl Iterator<Item = &FailureRecord> {
        self.entries
            .iter()
            .filter_map(|entry| entry.outcome.as_failure())
    }

    pub fn reference(&self) -> Option<&MoleculeRecord> {
        self.reference_index
            .and_then(|index| self.entries.get(index))
            .and_then(|entry| entry.outcome.as_success())
    }

    pub fn all_failed(&self) -> bool {
        !self.entries.is_empty() && self.error_count == self.entries.len()
    }
}
