mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use keel_lib::consts::BUILD_FILE_NAME;
use keel_lib::lint::LintMode;
use keel_lib::task::TaskError;

use crate::output::{OutputFormat, print_error};

/// keel - build configuration for multi-module JVM and Android projects
#[derive(Parser)]
#[command(name = "keel")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable debug logging
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Path to the build description
  #[arg(short, long, global = true, default_value = BUILD_FILE_NAME)]
  file: PathBuf,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Configure every module and write scope snapshots
  Configure {
    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    output: OutputFormat,
  },

  /// Download and verify the lint tool
  FetchTool,

  /// Run the lint tool in check mode
  Check,

  /// Run the lint tool in format mode
  Format,
}

fn init_tracing(verbose: bool) {
  let default = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

/// The exit code of a failed external tool anywhere in the error chain.
fn tool_exit_code(err: &anyhow::Error) -> Option<u8> {
  err
    .chain()
    .find_map(|e| e.downcast_ref::<TaskError>())
    .and_then(TaskError::exit_code)
    .and_then(|code| u8::try_from(code).ok())
    .filter(|code| *code != 0)
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  let result = match cli.command {
    Commands::Configure { output } => cmd::cmd_configure(&cli.file, output),
    Commands::FetchTool => cmd::cmd_fetch_tool(&cli.file),
    Commands::Check => cmd::cmd_lint(&cli.file, LintMode::Check),
    Commands::Format => cmd::cmd_lint(&cli.file, LintMode::Format),
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{err:#}"));
      tool_exit_code(&err).map(ExitCode::from).unwrap_or(ExitCode::FAILURE)
    }
  }
}
