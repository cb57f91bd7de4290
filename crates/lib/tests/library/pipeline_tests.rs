//! Module configuration from build description to scope snapshot.

use keel_lib::configure::{ConfigureError, configure_all};
use keel_lib::module::PackagingKind;
use keel_lib::policy::{self, AllowList};
use keel_lib::properties::PropertyError;
use keel_lib::toolchain::{ATTACH_SELF_PROPERTY, TestExecution, TestLogEvent, TestPlatform, ToolchainConfig};
use tempfile::TempDir;

use super::common::{SHARED_PROPERTIES, context, modules};

fn build(modules_toml: &str) -> String {
  format!("{SHARED_PROPERTIES}\n{modules_toml}")
}

mod dispatch {
  use super::*;

  #[test]
  fn jar_uses_junit_platform_and_bytecode_target() {
    let temp = TempDir::new().unwrap();
    let ctx = context(temp.path());
    let mut mods = modules(&build("[[module]]\nname = \"core\"\n[module.properties]\nPOM_PACKAGING = \"jar\"\n"));

    let reports = configure_all(&mut mods, &ctx).unwrap();

    let ToolchainConfig::Plain { jvm, test } = &reports[0].toolchain else {
      panic!("expected plain jvm config, got {:?}", reports[0].toolchain);
    };
    assert_eq!(jvm.toolchain, 17);
    assert_eq!(jvm.kotlin_jvm_target, "11");
    assert_eq!(jvm.target_compatibility.to_string(), "11");
    assert_eq!(test.platform, Some(TestPlatform::JUnitPlatform));
    assert_eq!(test.system_properties.get(ATTACH_SELF_PROPERTY).map(String::as_str), Some("true"));
    assert!(test.reports.html && test.reports.junit_xml);
    assert_eq!(test.logged_events.iter().collect::<Vec<_>>(), vec![&TestLogEvent::Passed]);
  }

  #[test]
  fn aar_configures_orchestrated_tests() {
    let temp = TempDir::new().unwrap();
    let ctx = context(temp.path());
    let mut mods = modules(&build(
      "[[module]]\nname = \"views\"\n[module.properties]\nPOM_PACKAGING = \"aar\"\nPOM_ARTIFACT_ID = \"org.example.views\"\n",
    ));

    let reports = configure_all(&mut mods, &ctx).unwrap();
    let android = reports[0].toolchain.android().unwrap();

    assert_eq!(android.namespace, "org.example.views");
    assert_eq!(android.compile_sdk, 34);
    assert_eq!(android.min_sdk, 21);
    assert_eq!(android.target_sdk, None);
    assert!(android.multi_dex_enabled);

    let options = android.test_options.as_ref().unwrap();
    assert_eq!(options.execution, TestExecution::AndroidxTestOrchestrator);
    assert!(options.animations_disabled);
    assert!(options.include_android_resources);
    assert!(options.unit_tests.system_properties.contains_key(ATTACH_SELF_PROPERTY));
  }

  #[test]
  fn apk_requires_target_sdk() {
    let temp = TempDir::new().unwrap();
    let ctx = context(temp.path());
    let toml = build(
      "[[module]]\nname = \"demo\"\n[module.properties]\nPOM_PACKAGING = \"apk\"\nPOM_ARTIFACT_ID = \"org.example.demo\"\n",
    )
    .replace("\"build.androidSDKTarget\" = 34\n", "");
    let mut mods = modules(&toml);

    let err = configure_all(&mut mods, &ctx).unwrap_err();
    assert!(matches!(
      err,
      ConfigureError::Property(PropertyError::Missing { ref key, .. }) if key == "build.androidSDKTarget"
    ));
  }

  #[test]
  fn every_kind_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let ctx = context(temp.path());
    let mut toml = String::from(SHARED_PROPERTIES);
    for kind in PackagingKind::ALL {
      toml.push_str(&format!(
        "\n[[module]]\nname = \"m-{kind}\"\n[module.properties]\nPOM_PACKAGING = \"{kind}\"\nPOM_ARTIFACT_ID = \"org.example.{kind}\"\n"
      ));
    }
    let mut mods = modules(&toml);

    let first = configure_all(&mut mods, &ctx).unwrap();
    let configured = mods.clone();
    let second = configure_all(&mut mods, &ctx).unwrap();

    assert_eq!(first, second);
    assert_eq!(mods, configured);
  }
}

mod policy_engine {
  use super::*;

  #[test]
  fn scopes_invented_after_the_allow_list_are_denied() {
    let temp = TempDir::new().unwrap();
    let ctx = context(temp.path());
    let mut mods = modules(&build(
      "[[module]]\nname = \"core\"\nscopes = [\"kotlinCompilerPluginClasspathBenchmark\"]\n[module.properties]\nPOM_PACKAGING = \"jar\"\n",
    ));

    configure_all(&mut mods, &ctx).unwrap();

    let scopes = mods[0].scopes();
    assert_eq!(scopes.is_transitive("kotlinCompilerPluginClasspathBenchmark"), Some(false));
    assert_eq!(scopes.is_transitive("kotlinCompilerPluginClasspathMain"), Some(true));
    assert!(scopes.iter().all(|(_, policy)| policy.transitive.is_some()));
  }

  #[test]
  fn registration_order_does_not_matter() {
    let temp = TempDir::new().unwrap();
    let ctx = context(temp.path());
    let mut declared_first = modules(&build(
      "[[module]]\nname = \"core\"\nscopes = [\"testImplementation\", \"zeta\"]\n[module.properties]\nPOM_PACKAGING = \"jar\"\n",
    ));
    let mut plugin_first = modules(&build(
      "[[module]]\nname = \"core\"\n[module.properties]\nPOM_PACKAGING = \"jar\"\n",
    ));

    configure_all(&mut declared_first, &ctx).unwrap();
    plugin_first[0].declare_scopes(["zeta", "testImplementation"]);
    let report = policy::evaluate(&mut plugin_first[0], &ctx.allow_list);

    assert_eq!(declared_first[0].scopes().is_transitive("testImplementation"), Some(true));
    assert!(report.allowed.iter().any(|s| s == "testImplementation"));
    assert!(report.denied.iter().any(|s| s == "zeta"));
  }

  #[test]
  fn empty_allow_list_denies_everything() {
    let temp = TempDir::new().unwrap();
    let mut ctx = context(temp.path());
    ctx.allow_list = AllowList::new("none", Vec::<String>::new());
    let mut mods = modules(&build("[[module]]\nname = \"core\"\n[module.properties]\nPOM_PACKAGING = \"jar\"\n"));

    let reports = configure_all(&mut mods, &ctx).unwrap();
    assert!(reports[0].policy.allowed.is_empty());
    assert_eq!(reports[0].policy.denied.len(), mods[0].scopes().len());
  }

  #[test]
  fn snapshot_lists_every_discovered_scope() {
    let temp = TempDir::new().unwrap();
    let ctx = context(temp.path());
    let mut mods = modules(&build(
      "[[module]]\nname = \"core\"\nscopes = [\"ksp\"]\n[module.properties]\nPOM_PACKAGING = \"jar\"\n",
    ));

    let reports = configure_all(&mut mods, &ctx).unwrap();
    let content = std::fs::read_to_string(&reports[0].snapshot).unwrap();

    assert_eq!(content.lines().count(), reports[0].policy.scope_count());
    assert!(content.lines().any(|l| l == "ksp"));
  }
}

mod failures {
  use super::*;

  #[test]
  fn missing_version_name_fails_before_any_snapshot() {
    let temp = TempDir::new().unwrap();
    let ctx = context(temp.path());
    let mut mods = modules(
      "[properties]\nGROUP = \"g\"\n\n[[module]]\nname = \"core\"\n[module.properties]\nPOM_PACKAGING = \"jar\"\n",
    );

    let err = configure_all(&mut mods, &ctx).unwrap_err();

    assert!(matches!(
      err,
      ConfigureError::Property(PropertyError::Missing { ref module, ref key }) if module == "core" && key == "VERSION_NAME"
    ));
    assert!(!ctx.scopes_dir().exists());
  }

  #[test]
  fn unknown_packaging_kind_is_reported() {
    let temp = TempDir::new().unwrap();
    let ctx = context(temp.path());
    let mut mods = modules(&build("[[module]]\nname = \"web\"\n[module.properties]\nPOM_PACKAGING = \"war\"\n"));

    let err = configure_all(&mut mods, &ctx).unwrap_err();
    assert_eq!(
      err.to_string(),
      "module 'web': unknown packaging kind 'war' (expected pom, apk, aar or jar)"
    );
  }

  #[test]
  fn packaging_kind_is_case_sensitive() {
    let temp = TempDir::new().unwrap();
    let ctx = context(temp.path());
    let mut mods = modules(&build("[[module]]\nname = \"core\"\n[module.properties]\nPOM_PACKAGING = \"JAR\"\n"));

    assert!(matches!(
      configure_all(&mut mods, &ctx),
      Err(ConfigureError::UnknownPackagingKind { .. })
    ));
  }
}
