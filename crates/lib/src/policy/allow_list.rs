//! The set of scopes allowed to resolve dependencies transitively.
//!
//! A built-in list is pinned to the toolchain generation the plugins in
//! [`crate::toolchain`] model. Builds on another generation can supply their
//! own list as a versioned JSON file:
//!
//! ```json
//! {
//!   "version": 1,
//!   "toolchain": "agp-8.1/kotlin-1.9",
//!   "scopes": ["testImplementation", "kotlinCompilerClasspath"]
//! }
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current allow-list file format version.
pub const ALLOW_LIST_VERSION: u32 = 1;

/// Toolchain generation the built-in list was written for.
pub const BUILTIN_TOOLCHAIN: &str = "agp-8.1/kotlin-1.9";

const BUILTIN_SCOPES: &[&str] = &[
  "androidTestDebugImplementation",
  "androidTestDebugImplementationDependenciesMetadata",
  "androidTestImplementation",
  "androidTestImplementationDependenciesMetadata",
  "androidTestReleaseImplementation",
  "androidTestReleaseImplementationDependenciesMetadata",
  "annotationProcessor",
  "debugAndroidTestCompilationImplementation",
  "debugAndroidTestImplementation",
  "debugAndroidTestImplementationDependenciesMetadata",
  "debugAnnotationProcessor",
  "debugAnnotationProcessorClasspath",
  "debugUnitTestCompilationImplementation",
  "debugUnitTestImplementation",
  "debugUnitTestImplementationDependenciesMetadata",
  "kotlinBuildToolsApiClasspath",
  "kotlinCompilerClasspath",
  "kotlinCompilerPluginClasspath",
  "kotlinCompilerPluginClasspathDebug",
  "kotlinCompilerPluginClasspathDebugAndroidTest",
  "kotlinCompilerPluginClasspathDebugUnitTest",
  "kotlinCompilerPluginClasspathMain",
  "kotlinCompilerPluginClasspathRelease",
  "kotlinCompilerPluginClasspathReleaseUnitTest",
  "kotlinCompilerPluginClasspathTest",
  "kotlinKlibCommonizerClasspath",
  "kotlinNativeCompilerPluginClasspath",
  "kotlinScriptDef",
  "kotlinScriptDefExtensions",
  "mainSourceElements",
  "releaseAnnotationProcessor",
  "releaseAnnotationProcessorClasspath",
  "releaseUnitTestCompilationImplementation",
  "releaseUnitTestImplementation",
  "releaseUnitTestImplementationDependenciesMetadata",
  "testDebugImplementation",
  "testDebugImplementationDependenciesMetadata",
  "testFixturesDebugImplementation",
  "testFixturesDebugImplementationDependenciesMetadata",
  "testFixturesImplementation",
  "testFixturesImplementationDependenciesMetadata",
  "testFixturesReleaseImplementation",
  "testFixturesReleaseImplementationDependenciesMetadata",
  "testImplementation",
  "testImplementationDependenciesMetadata",
  "testReleaseImplementation",
  "testReleaseImplementationDependenciesMetadata",
];

#[derive(Debug, Error)]
pub enum AllowListError {
  #[error("failed to read allow-list {}: {source}", .path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse allow-list {}: {source}", .path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("unsupported allow-list version {0}, expected {ALLOW_LIST_VERSION}")]
  UnsupportedVersion(u32),
}

/// On-disk form of an allow-list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct AllowListFile {
  version: u32,
  toolchain: String,
  scopes: BTreeSet<String>,
}

/// An immutable set of exact scope names permitted transitive resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList {
  toolchain: String,
  scopes: BTreeSet<String>,
}

impl Default for AllowList {
  fn default() -> Self {
    Self::builtin()
  }
}

impl AllowList {
  pub fn new<I, S>(toolchain: &str, scopes: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      toolchain: toolchain.to_string(),
      scopes: scopes.into_iter().map(Into::into).collect(),
    }
  }

  pub fn builtin() -> Self {
    Self::new(BUILTIN_TOOLCHAIN, BUILTIN_SCOPES.iter().copied())
  }

  /// Load an allow-list file.
  pub fn load(path: &Path) -> Result<Self, AllowListError> {
    let content = fs::read_to_string(path).map_err(|source| AllowListError::Read {
      path: path.to_path_buf(),
      source,
    })?;

    let file: AllowListFile = serde_json::from_str(&content).map_err(|source| AllowListError::Parse {
      path: path.to_path_buf(),
      source,
    })?;

    if file.version != ALLOW_LIST_VERSION {
      return Err(AllowListError::UnsupportedVersion(file.version));
    }

    Ok(Self {
      toolchain: file.toolchain,
      scopes: file.scopes,
    })
  }

  /// Serialize in the on-disk format.
  pub fn to_json(&self) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&AllowListFile {
      version: ALLOW_LIST_VERSION,
      toolchain: self.toolchain.clone(),
      scopes: self.scopes.clone(),
    })
  }

  pub fn toolchain(&self) -> &str {
    &self.toolchain
  }

  pub fn contains(&self, name: &str) -> bool {
    self.scopes.contains(name)
  }

  pub fn iter(&self) -> impl Iterator<Item = &str> {
    self.scopes.iter().map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.scopes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.scopes.is_empty()
  }
}
