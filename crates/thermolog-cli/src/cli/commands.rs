use super::CliError;
use super::helpers::{
    completion_line, execution_mode_for_jobs, init_tracing, non_clobbering_path, resolve_cli_path,
};
use anyhow::Context;
use std::path::{Path, PathBuf};
use thermolog_core::pipelines::{BatchConfig, expand_inputs, load_batch_config, run_batch};
use thermolog_core::writers::{ReportFormat, render_report, write_report};
use tracing::{info, warn};

#[derive(clap::Args)]
pub(super) struct ExtractArgs {
    /// Log files or directories of logs (default: current directory)
    #[arg(value_name = "INPUTS")]
    inputs: Vec<PathBuf>,

    /// Report format
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Report path (default: a format-specific name in the current directory)
    #[arg(long)]
    output: Option<PathBuf>,

    /// File-name glob applied inside input directories
    #[arg(long)]
    pattern: Option<String>,

    /// Worker threads; 1 runs serially, 0 uses every core
    #[arg(long, short = 'j')]
    jobs: Option<usize>,

    /// JSON batch configuration; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log block selection and other debug detail
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum FormatArg {
    Table,
    Summary,
    Xyz,
    Json,
}

impl From<FormatArg> for ReportFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Table => Self::Table,
            FormatArg::Summary => Self::Summary,
            FormatArg::Xyz => Self::Xyz,
            FormatArg::Json => Self::Json,
        }
    }
}

impl ExtractArgs {
    fn into_config(self, working_dir: &Path) -> Result<BatchConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => load_batch_config(resolve_cli_path(working_dir, path))?,
            None => BatchConfig::default(),
        };

        if !self.inputs.is_empty() {
            config.inputs = self.inputs;
        }
        if let Some(format) = self.format {
            config.format = format.into();
        }
        if let Some(output) = self.output {
            config.output = Some(output);
        }
        if let Some(pattern) = self.pattern {
            config.pattern = pattern;
        }
        if let Some(jobs) = self.jobs {
            config.execution_mode = execution_mode_for_jobs(jobs);
        }

        if config.inputs.is_empty() {
            config.inputs.push(working_dir.to_path_buf());
        }
        config.inputs = config
            .inputs
            .iter()
            .map(|input| resolve_cli_path(working_dir, input))
            .collect();
        config.output = config
            .output
            .map(|output| resolve_cli_path(working_dir, &output));
        Ok(config)
    }
}

pub(super) fn run_extract_command(args: ExtractArgs) -> Result<i32, CliError> {
    init_tracing(args.verbose)?;
    let working_dir =
        std::env::current_dir().context("failed to read current working directory")?;
    let config = args.into_config(&working_dir)?;

    let paths = expand_inputs(&config.inputs, &config.pattern)?;
    if paths.is_empty() {
        return Err(CliError::Usage(format!(
            "no input file matches '{}'",
            config.pattern
        )));
    }

    info!(
        files = paths.len(),
        mode = ?config.execution_mode,
        format = %config.format,
        "starting batch"
    );
    let batch = run_batch(&paths, config.execution_mode);

    match render_report(&batch, config.format)? {
        Some(content) => {
            let path = non_clobbering_path(&config.output_path_in(&working_dir));
            write_report(&path, &content)?;
            println!("Report: {}", path.display());
        }
        None => warn!(
            format = %config.format,
            "no file was processed successfully, report not written"
        ),
    }

    println!("{}", completion_line(&batch));
    Ok(if batch.all_failed() { 1 } else { 0 })
}

#[cfg(test)]
mod tests {
    use super::{ExtractArgs, FormatArg};
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;
    use thermolog_core::domain::ExecutionMode;
    use thermolog_core::writers::ReportFormat;

    fn args() -> ExtractArgs {
        ExtractArgs {
            inputs: Vec::new(),
            format: None,
            output: None,
            pattern: None,
            jobs: None,
            config: None,
            verbose: false,
        }
    }

    #[test]
    fn bare_arguments_scan_the_working_directory() {
        let config = args()
            .into_config(Path::new("/work"))
            .expect("defaults should resolve");

        assert_eq!(config.inputs, vec![PathBuf::from("/work")]);
        assert_eq!(config.pattern, "*.log");
        assert_eq!(config.format, ReportFormat::Table);
        assert_eq!(config.execution_mode, ExecutionMode::Serial);
        assert_eq!(config.output, None);
    }

    #[test]
    fn flags_override_config_file_values() {
        let temp = TempDir::new().expect("tempdir should be created");
        fs::write(
            temp.path().join("batch.json"),
            r#"{ "inputs": ["logs"], "format": "summary", "pattern": "*.out" }"#,
        )
        .expect("config should be written");

        let mut overridden = args();
        overridden.config = Some(PathBuf::from("batch.json"));
        overridden.format = Some(FormatArg::Json);
        overridden.jobs = Some(4);
        overridden.output = Some(PathBuf::from("out/report.json"));

        let config = overridden
            .into_config(temp.path())
            .expect("config should load");
        assert_eq!(config.inputs, vec![temp.path().join("logs")]);
        assert_eq!(config.pattern, "*.out");
        assert_eq!(config.format, ReportFormat::Json);
        assert_eq!(config.execution_mode, ExecutionMode::Parallel { workers: 4 });
        assert_eq!(config.output, Some(temp.path().join("out/report.json")));
    }
}
