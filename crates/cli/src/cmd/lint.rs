//! Implementation of `keel fetch-tool`, `keel check` and `keel format`.
//!
//! Each command builds a task graph and runs one target through it.

use std::path::Path;

use anyhow::{Context, Result};

use keel_lib::configure::configure_all;
use keel_lib::lint::{LintMode, register_lint_tasks, register_tool_tasks, task_name};
use keel_lib::task::TaskGraph;

use crate::output::{format_duration, print_stat, print_success, print_warning};

use super::load_build;

pub fn cmd_fetch_tool(file: &Path) -> Result<()> {
  let build = load_build(file)?;
  let tool = &build.context.tool;

  let mut graph = TaskGraph::new();
  let names = register_tool_tasks(&mut graph, tool)?;
  run_target(&graph, &names.verify)?;

  print_success(&format!(
    "{} {} verified at {}",
    tool.name,
    tool.version,
    tool.destination.display()
  ));
  Ok(())
}

pub fn cmd_lint(file: &Path, mode: LintMode) -> Result<()> {
  let mut build = load_build(file)?;
  configure_all(&mut build.modules, &build.context).context("Configuration failed")?;

  let tool = &build.context.tool;
  let mut graph = TaskGraph::new();
  register_lint_tasks(&mut graph, tool, &build.context.root)?;
  run_target(&graph, &task_name(tool, mode))?;

  print_success(&format!("{} {} passed", tool.name, mode));
  Ok(())
}

fn run_target(graph: &TaskGraph, target: &str) -> Result<()> {
  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let report = rt.block_on(graph.run_in_order(&[target]))?;

  for task in &report.completed {
    print_stat(&task.name, &format_duration(task.duration));
  }

  if let Some((failed, _)) = &report.failed {
    let failed = failed.clone();
    if !report.not_run.is_empty() {
      print_warning(&format!("Not run: {}", report.not_run.join(", ")));
    }
    report.into_result().with_context(|| format!("Task '{}' failed", failed))?;
  }

  Ok(())
}
