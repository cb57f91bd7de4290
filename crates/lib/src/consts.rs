//! Well-known names shared across the crate.

pub const APP_NAME: &str = "keel";

/// Version of this crate, checked against `required_version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default build description file name, looked up in the build root.
pub const BUILD_FILE_NAME: &str = "keel.toml";

/// Default build output directory, relative to the build root.
pub const DEFAULT_BUILD_DIR: &str = "build";

/// Directory under the build dir holding per-module scope snapshots.
pub const SCOPES_DIR_NAME: &str = "scopes";

/// Overrides the build output directory when set.
pub const BUILD_DIR_ENV: &str = "KEEL_BUILD_DIR";

/// Property keys read from every module.
pub mod keys {
  pub const POM_PACKAGING: &str = "POM_PACKAGING";
  pub const GROUP: &str = "GROUP";
  pub const VERSION_NAME: &str = "VERSION_NAME";
  pub const POM_ARTIFACT_ID: &str = "POM_ARTIFACT_ID";
  pub const JDK_BUILD: &str = "build.jdkBuild";
  pub const JDK_BYTECODE_TARGET: &str = "build.jdkBytecodeTarget";
  pub const ANDROID_SDK_COMPILE: &str = "build.androidSDKCompile";
  pub const ANDROID_SDK_TARGET: &str = "build.androidSDKTarget";
  pub const ANDROID_SDK_MINIMUM: &str = "build.androidSDKMinimum";
}

/// The pinned lint tool.
pub mod ktlint {
  pub const NAME: &str = "ktlint";
  pub const VERSION: &str = "0.50.0";
  pub const SHA256: &str = "c704fbc28305bb472511a1e98a7e0b014aa13378a571b716bbcf9d99d59a5092";
  pub const JAR_FILE_NAME: &str = "ktlint.jar";

  pub fn source_url(version: &str) -> String {
    format!("https://repo1.maven.org/maven2/com/pinterest/ktlint/{version}/ktlint-{version}-all.jar")
  }

  /// File globs handed to the tool by both check and format.
  pub const PATTERNS: &[&str] = &["*/src/**/*.kt", "*/build.gradle.kts", "build.gradle.kts", "!*/src/test/**"];
}
