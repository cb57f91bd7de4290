mod configure;
mod lint;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use keel_lib::build::Build;

pub use configure::cmd_configure;
pub use lint::{cmd_fetch_tool, cmd_lint};

/// Load the build description at `file`.
pub(crate) fn load_build(file: &Path) -> Result<Build> {
  let path = dunce::canonicalize(file).unwrap_or_else(|_| file.to_path_buf());
  debug!(path = %path.display(), "loading build description");
  Build::load(&path).with_context(|| format!("Failed to load build description {}", file.display()))
}
