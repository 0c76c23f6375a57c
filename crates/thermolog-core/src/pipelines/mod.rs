pub mod config;

pub use config::{BatchConfig, ConfigError, DEFAULT_INPUT_PATTERN, load_batch_config};

use crate::domain::{
    BatchEntry, BatchResult, ExecutionMode, ExtractionError, ExtractionResult, FailureRecord,
    MoleculeRecord, Outcome, RecordExcerpts,
};
use crate::modules::ranking::rank;
use crate::modules::serialization::normalize_line_endings;
use crate::parser::{
    charge_multiplicity_line, classify_imaginary_frequencies, locate, low_frequency_lines,
    parse_charge_and_multiplicity, parse_geometry, parse_thermochemistry, thermochemistry_span,
};
use globset::{Glob, GlobMatcher};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum InputScanError {
    #[error("invalid input pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: globset::Error,
    },
    #[error("failed to list input directory '{}': {source}", path.display())]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("input path '{}' does not exist", path.display())]
    Missing { path: PathBuf },
}

/// Parses one log into a record. The three thermochemistry reads and the
/// geometry read all work on the same selected block.
pub fn extract_record(source_file: &str, text: &str) -> ExtractionResult<MoleculeRecord> {
    let block = locate(text)?;
    debug!(
        file = source_file,
        span = ?block.span(),
        route = block.header(),
        "selected frequency block"
    );

    let body = block.text();
    let (charge, multiplicity) = parse_charge_and_multiplicity(body)?;
    let thermo = parse_thermochemistry(body)?;
    let imaginary_frequency = classify_imaginary_frequencies(body)?;
    let geometry = parse_geometry(body)?;

    let excerpts = RecordExcerpts {
        charge_multiplicity_line: charge_multiplicity_line(body)
            .unwrap_or_default()
            .to_string(),
        thermochemistry: thermochemistry_span(body).unwrap_or_default().to_string(),
        low_frequency_lines: low_frequency_lines(body)
            .into_iter()
            .map(str::to_string)
            .collect(),
    };

    Ok(MoleculeRecord {
        source_file: source_file.to_string(),
        header: block.header().to_string(),
        charge,
        multiplicity,
        imaginary_frequency,
        thermo,
        geometry,
        excerpts,
    })
}

/// In-memory counterpart of [`process_file`]; never fails, only classifies.
pub fn process_source(source_file: &str, text: &str) -> Outcome {
    let text = normalize_line_endings(text);
    match extract_record(source_file, &text) {
        Ok(record) => {
            info!(
                file = source_file,
                atoms = record.geometry.len(),
                "processed file"
            );
            Outcome::Success(record)
        }
        Err(error) => failure_outcome(source_file, error),
    }
}

pub fn process_file(path: &Path) -> Outcome {
    let source_file = source_name(path);
    match fs::read_to_string(path) {
        Ok(text) => process_source(&source_file, &text),
        Err(source) => failure_outcome(
            &source_file,
            ExtractionError::unreadable(format!(
                "failed to read '{}': {}",
                path.display(),
                source
            )),
        ),
    }
}

/// Per-file stage for every path, in input order.
pub fn process_files(paths: &[PathBuf], mode: ExecutionMode) -> Vec<Outcome> {
    match mode {
        ExecutionMode::Serial => paths.iter().map(|path| process_file(path)).collect(),
        ExecutionMode::Parallel { workers } => {
            match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
                Ok(pool) => pool.install(|| {
                    paths
                        .par_iter()
                        .map(|path| process_file(path))
                        .collect()
                }),
                Err(source) => {
                    warn!(%source, "worker pool unavailable, processing files serially");
                    paths.iter().map(|path| process_file(path)).collect()
                }
            }
        }
    }
}

/// Join barrier: ranks the fully materialized outcome sequence.
pub fn assemble_batch(outcomes: Vec<Outcome>) -> BatchResult {
    let ranked = rank(&outcomes);
    let error_count = outcomes.iter().filter(|outcome| outcome.is_failure()).count();
    let entries = outcomes
        .into_iter()
        .zip(ranked.relative)
        .map(|(outcome, relative)| BatchEntry { outcome, relative })
        .collect();

    BatchResult {
        entries,
        reference_index: ranked.reference,
        error_count,
    }
}

pub fn run_batch(paths: &[PathBuf], mode: ExecutionMode) -> BatchResult {
    let batch = assemble_batch(process_files(paths, mode));
    if let Some(reference) = batch.reference() {
        info!(file = %reference.source_file, "reference energy selected");
    }
    batch
}

/// Files directly inside `dir` whose name matches `pattern`, sorted by name.
pub fn collect_input_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, InputScanError> {
    let matcher = compile_pattern(pattern)?;
    let entries = fs::read_dir(dir).map_err(|source| InputScanError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| InputScanError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_file()
            && path
                .file_name()
                .is_some_and(|name| matcher.is_match(Path::new(name)))
        {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Directories expand to their matching files; explicit files are kept as given.
pub fn expand_inputs(inputs: &[PathBuf], pattern: &str) -> Result<Vec<PathBuf>, InputScanError> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            files.extend(collect_input_files(input, pattern)?);
        } else if input.is_file() {
            files.push(input.clone());
        } else {
            return Err(InputScanError::Missing {
                path: input.clone(),
            });
        }
    }
    Ok(files)
}

fn compile_pattern(pattern: &str) -> Result<GlobMatcher, InputScanError> {
    Glob::new(pattern)
        .map(|glob| glob.compile_matcher())
        .map_err(|source| InputScanError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

fn failure_outcome(source_file: &str, error: ExtractionError) -> Outcome {
    error!(file = source_file, "{}", error.diagnostic_line());
    Outcome::Failure(FailureRecord::from_error(source_file, error))
}

fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
