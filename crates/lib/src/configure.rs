//! Per-module configuration and the multi-module pass.
//!
//! Configuring a module reads its coordinates and JDK versions, dispatches on
//! its packaging kind, evaluates the resolution policy over every scope the
//! kind registered and writes the scope snapshot. Modules are independent and
//! are configured in parallel; the first error fails the whole pass.

use std::io;
use std::path::PathBuf;

use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::build::BuildContext;
use crate::consts::keys;
use crate::module::{Module, PackagingKind, ScopeOrigin};
use crate::policy::{self, PolicyReport};
use crate::properties::PropertyError;
use crate::toolchain::{self, JdkVersions, ToolchainConfig};

#[derive(Debug, Error)]
pub enum ConfigureError {
  #[error(transparent)]
  Property(#[from] PropertyError),

  #[error("module '{module}': unknown packaging kind '{value}' (expected pom, apk, aar or jar)")]
  UnknownPackagingKind { module: String, value: String },

  #[error("module '{module}': failed to write scope snapshot {}: {source}", .path.display())]
  Snapshot {
    module: String,
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// What configuring one module produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleReport {
  pub module: String,
  pub group: String,
  pub version: String,
  pub kind: PackagingKind,
  pub plugins: Vec<String>,
  pub policy: PolicyReport,
  pub snapshot: PathBuf,
  pub toolchain: ToolchainConfig,
}

/// Settings read from a module's properties before anything is applied to it.
#[derive(Debug, Clone)]
struct ModuleSettings {
  group: String,
  version: String,
  kind: PackagingKind,
  jdk: JdkVersions,
}

fn read_settings(module: &Module) -> Result<ModuleSettings, ConfigureError> {
  let props = module.properties();
  let group = props.get_string(keys::GROUP)?;
  let version = props.get_string(keys::VERSION_NAME)?;
  let jdk = JdkVersions {
    build: props.get_positive_int(keys::JDK_BUILD)?,
    bytecode_target: props.get_positive_int(keys::JDK_BYTECODE_TARGET)?,
  };
  let packaging = props.get_string(keys::POM_PACKAGING)?;

  let kind = PackagingKind::parse(&packaging).ok_or_else(|| ConfigureError::UnknownPackagingKind {
    module: module.name().to_string(),
    value: packaging.clone(),
  })?;

  Ok(ModuleSettings {
    group,
    version,
    kind,
    jdk,
  })
}

fn apply_toolchain(module: &mut Module, settings: &ModuleSettings) -> Result<ToolchainConfig, ConfigureError> {
  module.set_coordinates(settings.group.clone(), settings.version.clone());
  Ok(toolchain::configure(module, settings.kind, settings.jdk)?)
}

fn resolve_scopes(
  module: &mut Module,
  settings: ModuleSettings,
  toolchain: ToolchainConfig,
  context: &BuildContext,
) -> Result<ModuleReport, ConfigureError> {
  let policy = policy::evaluate(module, &context.allow_list);

  for name in &policy.denied {
    if let Some(scope) = module.scopes().get(name)
      && scope.origin == ScopeOrigin::Declared
    {
      warn!(module = %module.name(), scope = %name, "declared scope is not allow-listed; transitive resolution denied");
    }
  }

  let snapshot = context.scope_snapshot_path(module.name());
  policy::write_scope_snapshot(&snapshot, module.scopes().names()).map_err(|source| ConfigureError::Snapshot {
    module: module.name().to_string(),
    path: snapshot.clone(),
    source,
  })?;

  Ok(ModuleReport {
    module: module.name().to_string(),
    group: settings.group,
    version: settings.version,
    kind: settings.kind,
    plugins: module.plugins().iter().map(|p| p.id().to_string()).collect(),
    policy,
    snapshot,
    toolchain,
  })
}

/// Configure a single module against `context`.
pub fn configure_module(module: &mut Module, context: &BuildContext) -> Result<ModuleReport, ConfigureError> {
  let settings = read_settings(module)?;
  let toolchain = apply_toolchain(module, &settings)?;
  resolve_scopes(module, settings, toolchain, context)
}

/// Configure every module in parallel. Reports keep the order of `modules`.
///
/// Every module's properties are read and its toolchain configured before any
/// module's policy is evaluated, so a property error anywhere leaves no
/// snapshot behind.
pub fn configure_all(modules: &mut [Module], context: &BuildContext) -> Result<Vec<ModuleReport>, ConfigureError> {
  let settings = modules.par_iter().map(read_settings).collect::<Result<Vec<_>, _>>()?;

  let toolchains = modules
    .par_iter_mut()
    .zip(settings.par_iter())
    .map(|(module, settings)| apply_toolchain(module, settings))
    .collect::<Result<Vec<_>, _>>()?;

  let reports = modules
    .par_iter_mut()
    .zip(settings.into_par_iter().zip(toolchains))
    .map(|(module, (settings, toolchain))| resolve_scopes(module, settings, toolchain, context))
    .collect::<Result<Vec<_>, _>>()?;

  info!(modules = reports.len(), "configured all modules");
  Ok(reports)
}
