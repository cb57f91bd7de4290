//! Shared test helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Get path to a fixture file.
pub fn fixture_path(name: &str) -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    .join("tests")
    .join("fixtures")
    .join(name)
}

/// Read fixture content.
pub fn fixture_content(name: &str) -> String {
  std::fs::read_to_string(fixture_path(name)).unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", name, e))
}

/// Isolated build root.
///
/// Each test gets its own temporary directory holding `keel.toml` and the
/// build output.
pub struct TestEnv {
  pub temp: TempDir,
  pub build_file: PathBuf,
}

impl TestEnv {
  /// Create from a fixture file, copied to `keel.toml`.
  pub fn from_fixture(name: &str) -> Self {
    let env = Self::empty();
    std::fs::write(&env.build_file, fixture_content(name)).unwrap();
    env
  }

  /// Create an empty build root without a build description.
  pub fn empty() -> Self {
    let temp = TempDir::new().unwrap();
    let build_file = temp.path().join("keel.toml");
    Self { temp, build_file }
  }

  /// Copy a fixture into the build root under its own name.
  pub fn add_fixture(&self, name: &str) {
    self.write_file(name, &fixture_content(name));
  }

  /// Write a file relative to the build root.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  pub fn root_path(&self) -> PathBuf {
    let p = self.temp.path().to_path_buf();
    dunce::canonicalize(&p).unwrap_or(p)
  }

  /// Scope snapshot of `module` under `build_dir`.
  pub fn snapshot(&self, build_dir: &str, module: &str) -> String {
    let path = self.root_path().join(build_dir).join("scopes").join(format!("{module}.txt"));
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
  }

  /// Get a Command for the keel binary running in the build root.
  ///
  /// `KEEL_BUILD_DIR` is cleared so the build description decides.
  pub fn keel_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("keel");
    cmd.current_dir(self.root_path());
    cmd.env_remove("KEEL_BUILD_DIR");
    cmd
  }
}
