use anyhow::anyhow;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use thermolog_core::domain::{BatchResult, ExecutionMode};
use tracing_subscriber::EnvFilter;

pub(super) fn resolve_cli_path(working_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        working_dir.join(path)
    }
}

/// `requested` itself when free, otherwise the first `name (i).ext` that is.
pub(super) fn non_clobbering_path(requested: &Path) -> PathBuf {
    if !requested.exists() {
        return requested.to_path_buf();
    }

    let stem = requested
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = requested
        .extension()
        .map(|extension| extension.to_string_lossy().into_owned());

    (1usize..)
        .map(|index| {
            let name = match &extension {
                Some(extension) => format!("{stem} ({index}).{extension}"),
                None => format!("{stem} ({index})"),
            };
            requested.with_file_name(name)
        })
        .find(|candidate| !candidate.exists())
        .unwrap_or_else(|| requested.to_path_buf())
}

pub(super) fn execution_mode_for_jobs(jobs: usize) -> ExecutionMode {
    match jobs {
        1 => ExecutionMode::Serial,
        workers => ExecutionMode::Parallel { workers },
    }
}

pub(super) fn completion_line(batch: &BatchResult) -> String {
    format!(
        "-- Finished -- {} out of {} files encountered an Error --",
        batch.error_count,
        batch.len()
    )
}

/// Logs go to stderr. `RUST_LOG` applies unless `--verbose` forces debug.
pub(super) fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init()
        .map_err(|error| anyhow!("failed to install log subscriber: {error}"))
}
