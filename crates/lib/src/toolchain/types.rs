use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Serialize, Serializer};

/// Instrumentation runner used by every Android module.
pub const INSTRUMENTATION_RUNNER: &str = "androidx.test.runner.AndroidJUnitRunner";

/// Source encoding for Android compile options.
pub const SOURCE_ENCODING: &str = "UTF-8";

/// System property that lets a bytecode agent attach to the running test VM.
pub const ATTACH_SELF_PROPERTY: &str = "jdk.attach.allowAttachSelf";

/// The JDK versions read from a module's properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JdkVersions {
  /// JDK used to run the compilers.
  pub build: i32,
  /// Bytecode level the compilers emit.
  pub bytecode_target: i32,
}

/// A Java language level.
///
/// Levels up to 8 use the legacy `1.N` spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct JavaVersion(pub i32);

impl fmt::Display for JavaVersion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.0 <= 8 {
      write!(f, "1.{}", self.0)
    } else {
      write!(f, "{}", self.0)
    }
  }
}

impl Serialize for JavaVersion {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}

/// JVM toolchain and bytecode settings shared by every buildable kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JvmConfig {
  /// Toolchain language version for both Kotlin and Java.
  pub toolchain: i32,
  /// Kotlin compiler `jvmTarget`.
  pub kotlin_jvm_target: String,
  pub source_compatibility: JavaVersion,
  pub target_compatibility: JavaVersion,
}

impl JvmConfig {
  pub fn new(jdk: JdkVersions) -> Self {
    Self {
      toolchain: jdk.build,
      kotlin_jvm_target: jdk.bytecode_target.to_string(),
      source_compatibility: JavaVersion(jdk.bytecode_target),
      target_compatibility: JavaVersion(jdk.bytecode_target),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompileOptions {
  pub encoding: String,
  pub source_compatibility: JavaVersion,
  pub target_compatibility: JavaVersion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TestExecution {
  /// Each instrumentation test runs in its own process.
  AndroidxTestOrchestrator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TestPlatform {
  #[serde(rename = "junit-platform")]
  JUnitPlatform,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TestLogEvent {
  Started,
  Passed,
  Skipped,
  Failed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TestReports {
  pub html: bool,
  pub junit_xml: bool,
}

impl TestReports {
  pub fn all() -> Self {
    Self {
      html: true,
      junit_xml: true,
    }
  }
}

/// Settings applied to a unit test task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TestTaskConfig {
  pub platform: Option<TestPlatform>,
  pub system_properties: BTreeMap<String, String>,
  pub reports: TestReports,
  pub logged_events: BTreeSet<TestLogEvent>,
}

impl TestTaskConfig {
  /// Test task settings every JVM-hosted unit test run receives.
  pub fn with_attach_self() -> Self {
    let mut config = Self {
      reports: TestReports::all(),
      ..Self::default()
    };
    config
      .system_properties
      .insert(ATTACH_SELF_PROPERTY.to_string(), "true".to_string());
    config
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AndroidTestOptions {
  pub execution: TestExecution,
  pub animations_disabled: bool,
  pub include_android_resources: bool,
  pub unit_tests: TestTaskConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AndroidConfig {
  pub namespace: String,
  pub compile_sdk: i32,
  /// Only applications declare a target SDK.
  pub target_sdk: Option<i32>,
  pub min_sdk: i32,
  pub multi_dex_enabled: bool,
  pub test_instrumentation_runner: String,
  pub compile_options: CompileOptions,
  pub test_options: Option<AndroidTestOptions>,
}

/// The configuration a packaging kind leaves on a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ToolchainConfig {
  /// `pom`: nothing is built.
  Aggregator,
  /// `apk`
  Application { jvm: JvmConfig, android: AndroidConfig },
  /// `aar`
  Library { jvm: JvmConfig, android: AndroidConfig },
  /// `jar`
  Plain { jvm: JvmConfig, test: TestTaskConfig },
}

impl ToolchainConfig {
  pub fn jvm(&self) -> Option<&JvmConfig> {
    match self {
      ToolchainConfig::Aggregator => None,
      ToolchainConfig::Application { jvm, .. } | ToolchainConfig::Library { jvm, .. } | ToolchainConfig::Plain { jvm, .. } => {
        Some(jvm)
      }
    }
  }

  pub fn android(&self) -> Option<&AndroidConfig> {
    match self {
      ToolchainConfig::Application { android, .. } | ToolchainConfig::Library { android, .. } => Some(android),
      _ => None,
    }
  }

  /// The unit test task configuration, wherever the kind keeps it.
  pub fn unit_tests(&self) -> Option<&TestTaskConfig> {
    match self {
      ToolchainConfig::Plain { test, .. } => Some(test),
      ToolchainConfig::Library { android, .. } => android.test_options.as_ref().map(|o| &o.unit_tests),
      _ => None,
    }
  }
}
