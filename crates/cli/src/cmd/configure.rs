//! Implementation of the `keel configure` command.

use std::path::Path;

use anyhow::{Context, Result};

use keel_lib::configure::{ModuleReport, configure_all};

use crate::output::{OutputFormat, print_info, print_json, print_stat, print_success};

use super::load_build;

pub fn cmd_configure(file: &Path, output: OutputFormat) -> Result<()> {
  let mut build = load_build(file)?;
  let reports = configure_all(&mut build.modules, &build.context).context("Configuration failed")?;

  if output.is_json() {
    return print_json(&reports);
  }

  print_success(&format!("Configured {} module(s)", reports.len()));
  for report in &reports {
    print_report(report);
  }
  Ok(())
}

fn print_report(report: &ModuleReport) {
  println!();
  print_info(&format!(
    "{} {}:{} ({})",
    report.module, report.group, report.version, report.kind
  ));
  if !report.plugins.is_empty() {
    print_stat("Plugins", &report.plugins.join(", "));
  }
  print_stat(
    "Scopes",
    &format!(
      "{} transitive, {} denied",
      report.policy.allowed.len(),
      report.policy.denied.len()
    ),
  );
  print_stat("Snapshot", &report.snapshot.display().to_string());
}
