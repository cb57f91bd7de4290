use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::ktlint;

use super::ToolError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChecksumAlgorithm {
  #[default]
  #[serde(rename = "SHA-256")]
  Sha256,
  #[serde(rename = "SHA-512")]
  Sha512,
}

impl ChecksumAlgorithm {
  pub fn as_str(&self) -> &'static str {
    match self {
      ChecksumAlgorithm::Sha256 => "SHA-256",
      ChecksumAlgorithm::Sha512 => "SHA-512",
    }
  }
}

impl FromStr for ChecksumAlgorithm {
  type Err = ToolError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "SHA-256" => Ok(ChecksumAlgorithm::Sha256),
      "SHA-512" => Ok(ChecksumAlgorithm::Sha512),
      other => Err(ToolError::UnsupportedAlgorithm(other.to_string())),
    }
  }
}

impl fmt::Display for ChecksumAlgorithm {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A versioned external artifact and where it lives once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolDescriptor {
  pub name: String,
  pub version: String,
  pub checksum: String,
  pub algorithm: ChecksumAlgorithm,
  pub source_url: String,
  pub destination: PathBuf,
}

/// Optional overrides from the `[tool]` table of the build description.
///
/// Changing `version` without `url` rebuilds the default URL for that version;
/// the checksum always has to be supplied alongside a new version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolOverrides {
  pub version: Option<String>,
  pub checksum: Option<String>,
  pub algorithm: Option<String>,
  pub url: Option<String>,
  /// Relative paths resolve against the build root.
  pub destination: Option<PathBuf>,
}

impl ToolDescriptor {
  /// The pinned ktlint release, stored at `<root>/ktlint.jar`.
  pub fn ktlint(root: &Path) -> Self {
    Self {
      name: ktlint::NAME.to_string(),
      version: ktlint::VERSION.to_string(),
      checksum: ktlint::SHA256.to_string(),
      algorithm: ChecksumAlgorithm::Sha256,
      source_url: ktlint::source_url(ktlint::VERSION),
      destination: root.join(ktlint::JAR_FILE_NAME),
    }
  }

  /// The pinned ktlint release with `overrides` applied.
  pub fn ktlint_with(root: &Path, overrides: &ToolOverrides) -> Result<Self, ToolError> {
    let mut tool = Self::ktlint(root);

    if let Some(version) = &overrides.version {
      tool.version = version.clone();
      tool.source_url = ktlint::source_url(version);
    }
    if let Some(url) = &overrides.url {
      tool.source_url = url.clone();
    }
    if let Some(checksum) = &overrides.checksum {
      tool.checksum = checksum.clone();
    }
    if let Some(algorithm) = &overrides.algorithm {
      tool.algorithm = algorithm.parse()?;
    }
    if let Some(destination) = &overrides.destination {
      tool.destination = root.join(destination);
    }

    Ok(tool)
  }

  /// Directory the artifact is written into.
  pub fn destination_dir(&self) -> &Path {
    self.destination.parent().unwrap_or_else(|| Path::new("."))
  }
}
