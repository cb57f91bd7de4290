//! Loading a build and the context shared by every component.
//!
//! A [`BuildContext`] is constructed once per invocation and passed by
//! reference; nothing in the library reads global build state.

mod description;

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::consts::{BUILD_DIR_ENV, DEFAULT_BUILD_DIR, SCOPES_DIR_NAME, VERSION};
use crate::module::Module;
use crate::policy::{AllowList, AllowListError};
use crate::tool::{ToolDescriptor, ToolError};

pub use description::{BuildDescription, BuildSection, ModuleDecl};

#[derive(Debug, Error)]
pub enum BuildError {
  #[error("failed to read build description {}: {source}", .path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse build description {}: {source}", .path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },

  #[error("module '{0}' is declared more than once")]
  DuplicateModule(String),

  #[error("invalid module name '{0}': use letters, digits, '.', '_' or '-'")]
  InvalidModuleName(String),

  #[error("build requires keel {required} but this is keel {current}")]
  VersionMismatch { required: String, current: String },

  #[error(transparent)]
  AllowList(#[from] AllowListError),

  #[error(transparent)]
  Tool(#[from] ToolError),
}

/// Paths, policy and tool shared read-only across modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
  pub root: PathBuf,
  pub build_dir: PathBuf,
  pub allow_list: AllowList,
  pub tool: ToolDescriptor,
}

impl BuildContext {
  /// Resolve the context for a build rooted at `root`.
  ///
  /// The build directory comes from `KEEL_BUILD_DIR` if set, then the
  /// description, then the default. Relative paths resolve against `root`.
  pub fn new(root: &Path, description: &BuildDescription) -> Result<Self, BuildError> {
    let build_dir = match env::var_os(BUILD_DIR_ENV).filter(|v| !v.is_empty()) {
      Some(dir) => root.join(dir),
      None => root.join(
        description
          .build
          .build_dir
          .as_deref()
          .unwrap_or_else(|| Path::new(DEFAULT_BUILD_DIR)),
      ),
    };

    let allow_list = match &description.build.allow_list {
      Some(path) => AllowList::load(&root.join(path))?,
      None => AllowList::builtin(),
    };
    debug!(toolchain = allow_list.toolchain(), scopes = allow_list.len(), "allow-list loaded");

    let tool = ToolDescriptor::ktlint_with(root, &description.tool)?;

    Ok(Self {
      root: root.to_path_buf(),
      build_dir,
      allow_list,
      tool,
    })
  }

  pub fn scopes_dir(&self) -> PathBuf {
    self.build_dir.join(SCOPES_DIR_NAME)
  }

  /// Where the scope names of `module` are written.
  pub fn scope_snapshot_path(&self, module: &str) -> PathBuf {
    self.scopes_dir().join(format!("{module}.txt"))
  }
}

/// A loaded build: its context and the declared, not yet configured, modules.
#[derive(Debug, Clone)]
pub struct Build {
  pub context: BuildContext,
  pub modules: Vec<Module>,
}

impl Build {
  /// Load and validate the build description at `path`.
  ///
  /// The directory containing the file is the build root.
  pub fn load(path: &Path) -> Result<Self, BuildError> {
    let description = BuildDescription::load(path)?;
    description.validate()?;
    description.check_version(VERSION)?;

    let root = match path.parent() {
      Some(parent) if !parent.as_os_str().is_empty() => parent,
      _ => Path::new("."),
    };

    let context = BuildContext::new(root, &description)?;
    let modules = description.modules();

    info!(
      root = %root.display(),
      modules = modules.len(),
      build_dir = %context.build_dir.display(),
      "loaded build"
    );

    Ok(Self { context, modules })
  }
}
