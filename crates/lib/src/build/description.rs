//! The `keel.toml` build description.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::module::Module;
use crate::properties::{PropertySet, RawProperty};
use crate::tool::ToolOverrides;

use super::BuildError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildDescription {
  #[serde(default)]
  pub build: BuildSection,

  /// Inherited by every module.
  #[serde(default)]
  pub properties: BTreeMap<String, RawProperty>,

  #[serde(default)]
  pub tool: ToolOverrides,

  #[serde(default, rename = "module")]
  pub modules: Vec<ModuleDecl>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildSection {
  /// Exact keel version this build expects.
  pub required_version: Option<String>,
  pub build_dir: Option<PathBuf>,
  /// JSON allow-list replacing the built-in one.
  pub allow_list: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleDecl {
  pub name: String,

  /// Scopes registered by tooling outside keel.
  #[serde(default)]
  pub scopes: Vec<String>,

  #[serde(default)]
  pub properties: BTreeMap<String, RawProperty>,
}

fn valid_module_name(name: &str) -> bool {
  !name.is_empty()
    && name != "."
    && name != ".."
    && name
      .chars()
      .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

impl BuildDescription {
  pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
    toml::from_str(text)
  }

  pub fn load(path: &Path) -> Result<Self, BuildError> {
    let text = fs::read_to_string(path).map_err(|source| BuildError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    Self::parse(&text).map_err(|source| BuildError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Module names must be usable as file names and unique ignoring ASCII case.
  pub fn validate(&self) -> Result<(), BuildError> {
    let mut seen = HashSet::new();
    for decl in &self.modules {
      if !valid_module_name(&decl.name) {
        return Err(BuildError::InvalidModuleName(decl.name.clone()));
      }
      if !seen.insert(decl.name.to_ascii_lowercase()) {
        return Err(BuildError::DuplicateModule(decl.name.clone()));
      }
    }
    Ok(())
  }

  pub fn check_version(&self, current: &str) -> Result<(), BuildError> {
    match &self.build.required_version {
      Some(required) if required != current => Err(BuildError::VersionMismatch {
        required: required.clone(),
        current: current.to_string(),
      }),
      _ => Ok(()),
    }
  }

  /// Materialize the declared modules with inherited properties applied.
  pub fn modules(&self) -> Vec<Module> {
    self
      .modules
      .iter()
      .map(|decl| {
        let properties = PropertySet::layered(&decl.name, &self.properties, &decl.properties);
        let mut module = Module::new(&decl.name, properties);
        module.declare_scopes(&decl.scopes);
        module
      })
      .collect()
  }
}
