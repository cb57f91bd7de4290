//! Types for task definition and execution.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::tool::{ChecksumAlgorithm, ToolError};

/// What a task does when it runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum TaskAction {
  MakeDirectory {
    path: PathBuf,
  },
  Download {
    url: String,
    destination: PathBuf,
    overwrite: bool,
    only_if_modified: bool,
  },
  Verify {
    path: PathBuf,
    checksum: String,
    algorithm: ChecksumAlgorithm,
  },
  Exec {
    command: Vec<String>,
    cwd: Option<PathBuf>,
  },
}

impl TaskAction {
  pub fn kind(&self) -> &'static str {
    match self {
      TaskAction::MakeDirectory { .. } => "make_directory",
      TaskAction::Download { .. } => "download",
      TaskAction::Verify { .. } => "verify",
      TaskAction::Exec { .. } => "exec",
    }
  }
}

/// A named unit of work and the tasks that must finish before it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
  pub name: String,
  pub action: TaskAction,
  pub depends_on: Vec<String>,
}

impl Task {
  pub fn new(name: &str, action: TaskAction) -> Self {
    Self {
      name: name.to_string(),
      action,
      depends_on: Vec::new(),
    }
  }

  pub fn depends_on(mut self, name: &str) -> Self {
    if !self.depends_on.iter().any(|d| d == name) {
      self.depends_on.push(name.to_string());
    }
    self
  }
}

/// Errors that can occur while defining or running tasks.
#[derive(Debug, Error)]
pub enum TaskError {
  /// A task with this name is already registered.
  #[error("task '{0}' is already defined")]
  DuplicateTask(String),

  #[error("task '{task}' depends on undefined task '{dependency}'")]
  UnknownDependency { task: String, dependency: String },

  #[error("no task named '{0}'")]
  UnknownTask(String),

  #[error("task dependency cycle detected")]
  CycleDetected,

  #[error("empty command line")]
  EmptyCommand,

  #[error("failed to start '{program}': {source}")]
  Spawn {
    program: String,
    #[source]
    source: io::Error,
  },

  /// The process ran and exited unsuccessfully.
  #[error("command failed with exit code {}: {command}", .exit_code.map_or_else(|| "none".to_string(), |c| c.to_string()))]
  ExternalProcess { command: String, exit_code: Option<i32> },

  #[error(transparent)]
  Tool(#[from] ToolError),
}

impl TaskError {
  /// The exit code of a failed external process, if that is what failed.
  pub fn exit_code(&self) -> Option<i32> {
    match self {
      TaskError::ExternalProcess { exit_code, .. } => *exit_code,
      _ => None,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletedTask {
  pub name: String,
  pub duration: Duration,
}

/// Result of running a task chain.
///
/// Execution stops at the first failure; every task after it is listed in
/// `not_run`.
#[derive(Debug, Default)]
pub struct TaskReport {
  pub completed: Vec<CompletedTask>,
  pub failed: Option<(String, TaskError)>,
  pub not_run: Vec<String>,
}

impl TaskReport {
  pub fn is_success(&self) -> bool {
    self.failed.is_none()
  }

  pub fn completed_names(&self) -> Vec<&str> {
    self.completed.iter().map(|t| t.name.as_str()).collect()
  }

  /// Turn a failed report into the error that stopped it.
  pub fn into_result(self) -> Result<TaskReport, TaskError> {
    match self.failed {
      Some((_, error)) => Err(error),
      None => Ok(self),
    }
  }
}
