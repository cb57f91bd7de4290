//! The per-module registry of dependency-resolution scopes.
//!
//! Scope names are opaque and open-ended: plugins register whatever names
//! their toolchain generation uses. The registry is append-only and ordered by
//! name so every enumeration is deterministic.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::toolchain::Plugin;

/// Who registered a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "plugin")]
pub enum ScopeOrigin {
  /// Listed in the build description.
  Declared,
  /// Contributed by an applied plugin.
  Plugin(Plugin),
}

impl fmt::Display for ScopeOrigin {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ScopeOrigin::Declared => write!(f, "declared"),
      ScopeOrigin::Plugin(plugin) => write!(f, "plugin:{}", plugin.id()),
    }
  }
}

/// Policy record kept for each scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopePolicy {
  /// The first registrant of the scope.
  pub origin: ScopeOrigin,
  /// `None` until the resolution policy has been evaluated.
  pub transitive: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ScopeRegistry {
  scopes: BTreeMap<String, ScopePolicy>,
}

impl ScopeRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Register a scope. Re-registering keeps the original origin and decision.
  ///
  /// Returns true if the name was new.
  pub fn register(&mut self, name: &str, origin: ScopeOrigin) -> bool {
    if self.scopes.contains_key(name) {
      return false;
    }
    self.scopes.insert(
      name.to_string(),
      ScopePolicy {
        origin,
        transitive: None,
      },
    );
    true
  }

  pub fn contains(&self, name: &str) -> bool {
    self.scopes.contains_key(name)
  }

  pub fn get(&self, name: &str) -> Option<&ScopePolicy> {
    self.scopes.get(name)
  }

  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.scopes.keys().map(String::as_str)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &ScopePolicy)> {
    self.scopes.iter().map(|(k, v)| (k.as_str(), v))
  }

  pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut ScopePolicy)> {
    self.scopes.iter_mut().map(|(k, v)| (k.as_str(), v))
  }

  pub fn len(&self) -> usize {
    self.scopes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.scopes.is_empty()
  }

  /// The transitive decision for `name`, if the scope exists and was evaluated.
  pub fn is_transitive(&self, name: &str) -> Option<bool> {
    self.scopes.get(name).and_then(|s| s.transitive)
  }
}
