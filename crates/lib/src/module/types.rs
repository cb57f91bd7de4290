use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::properties::PropertySet;
use crate::toolchain::{Plugin, ToolchainConfig};

use super::scopes::{ScopeOrigin, ScopeRegistry};

/// The declared artifact type of a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackagingKind {
  /// Aggregator module; groups other modules and builds nothing.
  Pom,
  /// Android application.
  Apk,
  /// Android library.
  Aar,
  /// Plain JVM library.
  Jar,
}

impl PackagingKind {
  pub const ALL: [PackagingKind; 4] = [PackagingKind::Pom, PackagingKind::Apk, PackagingKind::Aar, PackagingKind::Jar];

  /// Parse the exact tag used in `POM_PACKAGING`.
  pub fn parse(value: &str) -> Option<Self> {
    match value {
      "pom" => Some(PackagingKind::Pom),
      "apk" => Some(PackagingKind::Apk),
      "aar" => Some(PackagingKind::Aar),
      "jar" => Some(PackagingKind::Jar),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      PackagingKind::Pom => "pom",
      PackagingKind::Apk => "apk",
      PackagingKind::Aar => "aar",
      PackagingKind::Jar => "jar",
    }
  }
}

impl fmt::Display for PackagingKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A named configuration unit of the build.
///
/// A module starts out holding only its properties and any scopes the build
/// description declares for it. Configuration applies plugins (which register
/// more scopes), records the toolchain configuration and leaves the policy
/// engine's decision on every scope.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
  name: String,
  properties: PropertySet,
  group: Option<String>,
  version: Option<String>,
  plugins: BTreeSet<Plugin>,
  scopes: ScopeRegistry,
  toolchain: Option<ToolchainConfig>,
}

impl Module {
  pub fn new(name: &str, properties: PropertySet) -> Self {
    Self {
      name: name.to_string(),
      properties,
      group: None,
      version: None,
      plugins: BTreeSet::new(),
      scopes: ScopeRegistry::new(),
      toolchain: None,
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn properties(&self) -> &PropertySet {
    &self.properties
  }

  pub fn group(&self) -> Option<&str> {
    self.group.as_deref()
  }

  pub fn version(&self) -> Option<&str> {
    self.version.as_deref()
  }

  pub fn set_coordinates(&mut self, group: String, version: String) {
    self.group = Some(group);
    self.version = Some(version);
  }

  /// Register scopes declared outside of any plugin.
  pub fn declare_scopes<I, S>(&mut self, names: I)
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    for name in names {
      self.scopes.register(name.as_ref(), ScopeOrigin::Declared);
    }
  }

  /// Apply a plugin, registering every scope it contributes.
  ///
  /// Returns false if the plugin was already applied.
  pub fn apply_plugin(&mut self, plugin: Plugin) -> bool {
    if !self.plugins.insert(plugin) {
      return false;
    }
    for scope in plugin.scopes() {
      self.scopes.register(&scope, ScopeOrigin::Plugin(plugin));
    }
    true
  }

  pub fn plugins(&self) -> &BTreeSet<Plugin> {
    &self.plugins
  }

  pub fn scopes(&self) -> &ScopeRegistry {
    &self.scopes
  }

  pub fn scopes_mut(&mut self) -> &mut ScopeRegistry {
    &mut self.scopes
  }

  pub fn toolchain(&self) -> Option<&ToolchainConfig> {
    self.toolchain.as_ref()
  }

  pub fn set_toolchain(&mut self, config: ToolchainConfig) {
    self.toolchain = Some(config);
  }
}
