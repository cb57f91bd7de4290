//! Check and format actions backed by the pinned lint tool.
//!
//! The tool is provisioned by a three-step chain (make directory, download,
//! verify) and then run from the build root in either mode.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::consts::ktlint;
use crate::task::{Task, TaskAction, TaskError, TaskGraph};
use crate::tool::ToolDescriptor;
use crate::util::capitalize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LintMode {
  Check,
  Format,
}

impl LintMode {
  fn suffix(&self) -> &'static str {
    match self {
      LintMode::Check => "Check",
      LintMode::Format => "Format",
    }
  }
}

impl fmt::Display for LintMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      LintMode::Check => "check",
      LintMode::Format => "format",
    })
  }
}

/// Names of the provisioning tasks for one tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolTaskNames {
  pub make_directory: String,
  pub download: String,
  pub verify: String,
}

impl ToolTaskNames {
  pub fn for_tool(tool: &ToolDescriptor) -> Self {
    let prefix = capitalize(&tool.name);
    Self {
      make_directory: format!("{prefix}MakeDirectory"),
      download: format!("{prefix}Download"),
      verify: format!("{prefix}DownloadVerify"),
    }
  }
}

/// Task name of the tool run in `mode`, e.g. `KtlintCheck`.
pub fn task_name(tool: &ToolDescriptor, mode: LintMode) -> String {
  format!("{}{}", capitalize(&tool.name), mode.suffix())
}

/// `java -jar <tool> [-F] <patterns...>`
pub fn command_line(tool: &ToolDescriptor, mode: LintMode) -> Vec<String> {
  let mut command = vec![
    "java".to_string(),
    "-jar".to_string(),
    tool.destination.to_string_lossy().to_string(),
  ];
  if mode == LintMode::Format {
    command.push("-F".to_string());
  }
  command.extend(ktlint::PATTERNS.iter().map(|p| p.to_string()));
  command
}

/// Register the make directory, download and verify chain for `tool`.
pub fn register_tool_tasks(graph: &mut TaskGraph, tool: &ToolDescriptor) -> Result<ToolTaskNames, TaskError> {
  let names = ToolTaskNames::for_tool(tool);

  graph.define(Task::new(
    &names.make_directory,
    TaskAction::MakeDirectory {
      path: tool.destination_dir().to_path_buf(),
    },
  ))?;
  graph.define(
    Task::new(
      &names.download,
      TaskAction::Download {
        url: tool.source_url.clone(),
        destination: tool.destination.clone(),
        overwrite: true,
        only_if_modified: true,
      },
    )
    .depends_on(&names.make_directory),
  )?;
  graph.define(
    Task::new(
      &names.verify,
      TaskAction::Verify {
        path: tool.destination.clone(),
        checksum: tool.checksum.clone(),
        algorithm: tool.algorithm,
      },
    )
    .depends_on(&names.download),
  )?;

  Ok(names)
}

/// Register the provisioning chain plus the check and format tasks, which run
/// the tool from `root`.
pub fn register_lint_tasks(graph: &mut TaskGraph, tool: &ToolDescriptor, root: &Path) -> Result<ToolTaskNames, TaskError> {
  let names = register_tool_tasks(graph, tool)?;

  for mode in [LintMode::Check, LintMode::Format] {
    graph.define(
      Task::new(
        &task_name(tool, mode),
        TaskAction::Exec {
          command: command_line(tool, mode),
          cwd: Some(root.to_path_buf()),
        },
      )
      .depends_on(&names.verify),
    )?;
  }

  Ok(names)
}
