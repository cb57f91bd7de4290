//! Packaging-kind dispatch.
//!
//! Each packaging kind has exactly one configuration procedure. A procedure
//! applies its plugins (registering their resolution scopes on the module),
//! reads the properties it needs and records a [`ToolchainConfig`] on the
//! module. Running a procedure again on the same module leaves the same state.

mod plugins;
mod types;

use tracing::{debug, info};

use crate::consts::keys;
use crate::module::{Module, PackagingKind};
use crate::properties::PropertyError;

pub use plugins::Plugin;
pub use types::{
  ATTACH_SELF_PROPERTY, AndroidConfig, AndroidTestOptions, CompileOptions, INSTRUMENTATION_RUNNER, JavaVersion,
  JdkVersions, JvmConfig, SOURCE_ENCODING, TestExecution, TestLogEvent, TestPlatform, TestReports, TestTaskConfig,
  ToolchainConfig,
};

/// Plugins applied for each packaging kind, in application order.
pub fn plugins_for(kind: PackagingKind) -> &'static [Plugin] {
  match kind {
    PackagingKind::Pom => &[],
    PackagingKind::Apk => &[Plugin::AndroidApplication, Plugin::KotlinAndroid],
    PackagingKind::Aar => &[Plugin::AndroidLibrary, Plugin::KotlinAndroid, Plugin::AndroidJunit5],
    PackagingKind::Jar => &[Plugin::JavaLibrary, Plugin::KotlinJvm],
  }
}

/// Run the configuration procedure for `kind` on `module`.
pub fn configure(module: &mut Module, kind: PackagingKind, jdk: JdkVersions) -> Result<ToolchainConfig, PropertyError> {
  info!(
    module = %module.name(),
    version = module.version().unwrap_or("unspecified"),
    kind = %kind,
    "configuring module"
  );

  for plugin in plugins_for(kind) {
    if module.apply_plugin(*plugin) {
      debug!(module = %module.name(), plugin = %plugin, "applied plugin");
    }
  }

  let config = match kind {
    PackagingKind::Pom => ToolchainConfig::Aggregator,
    PackagingKind::Apk => configure_application(module, jdk)?,
    PackagingKind::Aar => configure_library(module, jdk)?,
    PackagingKind::Jar => configure_plain(jdk),
  };

  module.set_toolchain(config.clone());
  Ok(config)
}

fn compile_options(jdk: JdkVersions) -> CompileOptions {
  CompileOptions {
    encoding: SOURCE_ENCODING.to_string(),
    source_compatibility: JavaVersion(jdk.bytecode_target),
    target_compatibility: JavaVersion(jdk.bytecode_target),
  }
}

fn configure_application(module: &Module, jdk: JdkVersions) -> Result<ToolchainConfig, PropertyError> {
  let props = module.properties();
  let android = AndroidConfig {
    namespace: props.get_string(keys::POM_ARTIFACT_ID)?,
    compile_sdk: props.get_int(keys::ANDROID_SDK_COMPILE)?,
    target_sdk: Some(props.get_int(keys::ANDROID_SDK_TARGET)?),
    min_sdk: props.get_int(keys::ANDROID_SDK_MINIMUM)?,
    multi_dex_enabled: true,
    test_instrumentation_runner: INSTRUMENTATION_RUNNER.to_string(),
    compile_options: compile_options(jdk),
    test_options: None,
  };

  Ok(ToolchainConfig::Application {
    jvm: JvmConfig::new(jdk),
    android,
  })
}

fn configure_library(module: &Module, jdk: JdkVersions) -> Result<ToolchainConfig, PropertyError> {
  let props = module.properties();
  let android = AndroidConfig {
    namespace: props.get_string(keys::POM_ARTIFACT_ID)?,
    compile_sdk: props.get_int(keys::ANDROID_SDK_COMPILE)?,
    target_sdk: None,
    min_sdk: props.get_int(keys::ANDROID_SDK_MINIMUM)?,
    multi_dex_enabled: true,
    test_instrumentation_runner: INSTRUMENTATION_RUNNER.to_string(),
    compile_options: compile_options(jdk),
    test_options: Some(AndroidTestOptions {
      execution: TestExecution::AndroidxTestOrchestrator,
      animations_disabled: true,
      include_android_resources: true,
      unit_tests: TestTaskConfig::with_attach_self(),
    }),
  };

  Ok(ToolchainConfig::Library {
    jvm: JvmConfig::new(jdk),
    android,
  })
}

fn configure_plain(jdk: JdkVersions) -> ToolchainConfig {
  let mut test = TestTaskConfig::with_attach_self();
  test.platform = Some(TestPlatform::JUnitPlatform);
  // Failures surface through the exit status and reports.
  test.logged_events.insert(TestLogEvent::Passed);

  ToolchainConfig::Plain {
    jvm: JvmConfig::new(jdk),
    test,
  }
}
