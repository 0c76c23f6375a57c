mod commands;
mod helpers;

use clap::Parser;
use thermolog_core::pipelines::{ConfigError, InputScanError};
use thermolog_core::writers::WriteError;

pub fn run_from_env() -> i32 {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match run(args) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("{}", error.diagnostic_line());
            error.exit_code()
        }
    }
}

pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let full_args = std::iter::once("thermolog".to_string())
        .chain(args.into_iter().map(Into::into))
        .collect::<Vec<_>>();
    parse_and_dispatch(full_args)
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => dispatch_parsed(cli.command),
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(
    name = "thermolog",
    version,
    about = "Thermochemistry and geometry extraction from Gaussian frequency logs"
)]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Extract energies and final geometries from a batch of logs
    Extract(commands::ExtractArgs),
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Extract(args) => commands::run_extract_command(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Input(#[from] InputScanError),
    #[error(transparent)]
    Write(#[from] WriteError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    const fn code(&self) -> &'static str {
        match self {
            Self::Usage(_) => "INPUT.CLI_USAGE",
            Self::Config(_) => "INPUT.BATCH_CONFIG",
            Self::Input(_) => "INPUT.LOG_SCAN",
            Self::Write(_) => "IO.REPORT_WRITE",
            Self::Internal(_) => "IO.CLI",
        }
    }

    /// 2 for anything the caller can fix by changing arguments, 3 for I/O.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_)
            | Self::Config(ConfigError::Parse { .. })
            | Self::Input(InputScanError::InvalidPattern { .. }) => 2,
            Self::Config(ConfigError::Read { .. })
            | Self::Input(_)
            | Self::Write(_)
            | Self::Internal(_) => 3,
        }
    }

    pub fn diagnostic_line(&self) -> String {
        let message = match self {
            Self::Internal(error) => format!("{error:#}"),
            other => other.to_string(),
        };
        format!("ERROR: [{}] {}", self.code(), message.trim_end())
    }
}
