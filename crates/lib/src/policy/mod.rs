//! Transitive resolution policy.
//!
//! Every scope registered on a module resolves transitively only if its name
//! is on the [`AllowList`]; everything else is denied. The registry is read at
//! evaluation time, so scopes registered by plugins during configuration are
//! covered no matter when they appeared.

mod allow_list;

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::module::Module;

pub use allow_list::{ALLOW_LIST_VERSION, AllowList, AllowListError, BUILTIN_TOOLCHAIN};

/// The outcome of evaluating one module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PolicyReport {
  pub allowed: Vec<String>,
  pub denied: Vec<String>,
}

impl PolicyReport {
  pub fn scope_count(&self) -> usize {
    self.allowed.len() + self.denied.len()
  }
}

/// Decide `transitive` for every scope currently registered on `module`.
pub fn evaluate(module: &mut Module, allow_list: &AllowList) -> PolicyReport {
  let mut report = PolicyReport::default();
  let name = module.name().to_string();

  for (scope, policy) in module.scopes_mut().iter_mut() {
    let transitive = allow_list.contains(scope);
    policy.transitive = Some(transitive);

    debug!(module = %name, scope = %scope, origin = %policy.origin, transitive, "resolution policy");
    if transitive {
      report.allowed.push(scope.to_string());
    } else {
      report.denied.push(scope.to_string());
    }
  }

  info!(
    module = %name,
    allowed = report.allowed.len(),
    denied = report.denied.len(),
    "evaluated resolution policy"
  );
  report
}

/// Write `names` to `path`, one per line, replacing any previous content.
///
/// The content is staged in a temporary file next to `path` and moved into
/// place, so readers never observe a partial snapshot.
pub fn write_scope_snapshot<'a, I>(path: &Path, names: I) -> io::Result<()>
where
  I: IntoIterator<Item = &'a str>,
{
  let dir = match path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent,
    _ => Path::new("."),
  };
  fs::create_dir_all(dir)?;

  let content = names.into_iter().collect::<Vec<_>>().join("\n");

  let mut staged = NamedTempFile::new_in(dir)?;
  staged.write_all(content.as_bytes())?;
  staged.flush()?;
  staged.persist(path).map_err(|e| e.error)?;

  debug!(path = %path.display(), "wrote scope snapshot");
  Ok(())
}
