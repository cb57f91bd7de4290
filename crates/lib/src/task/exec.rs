//! External process execution.
//!
//! The child inherits stdout and stderr so tool diagnostics reach the user
//! unmodified; only the exit status is inspected.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info};

use super::types::TaskError;

/// Run `command[0]` with the remaining elements as arguments.
///
/// A non-zero exit fails with [`TaskError::ExternalProcess`] carrying the exit
/// code (`None` when the process was killed by a signal).
pub async fn run_external_process(command: &[String], cwd: Option<&Path>) -> Result<(), TaskError> {
  let (program, args) = command.split_first().ok_or(TaskError::EmptyCommand)?;
  let rendered = command.join(" ");

  info!(command = %rendered, "running external process");

  let mut process = Command::new(program);
  process
    .args(args)
    .stdin(Stdio::null())
    .stdout(Stdio::inherit())
    .stderr(Stdio::inherit());
  if let Some(dir) = cwd {
    process.current_dir(dir);
  }

  debug!(program = %program, working_dir = ?cwd, "spawning process");

  let status = process.status().await.map_err(|source| TaskError::Spawn {
    program: program.clone(),
    source,
  })?;

  if !status.success() {
    return Err(TaskError::ExternalProcess {
      command: rendered,
      exit_code: status.code(),
    });
  }

  debug!(command = %rendered, "process exited successfully");
  Ok(())
}
