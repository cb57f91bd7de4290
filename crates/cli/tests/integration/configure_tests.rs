//! Configure command integration tests.

use predicates::prelude::*;
use serde_json::Value;

use super::common::TestEnv;

fn configure_json(env: &TestEnv) -> Vec<Value> {
  let output = env
    .keel_cmd()
    .arg("configure")
    .arg("--output")
    .arg("json")
    .output()
    .unwrap();
  assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
  serde_json::from_slice::<Vec<Value>>(&output.stdout).unwrap()
}

#[test]
fn configure_multi_module_build() {
  let env = TestEnv::from_fixture("multi_module.toml");

  env
    .keel_cmd()
    .arg("configure")
    .assert()
    .success()
    .stdout(predicate::str::contains("Configured 4 module(s)"))
    .stdout(predicate::str::contains("demo org.example:2.4.0-demo (apk)"))
    .stdout(predicate::str::contains("views org.example:2.4.0 (aar)"));
}

#[test]
fn json_reports_follow_declaration_order() {
  let env = TestEnv::from_fixture("multi_module.toml");
  let reports = configure_json(&env);

  let names: Vec<_> = reports.iter().map(|r| r["module"].as_str().unwrap()).collect();
  assert_eq!(names, vec!["bom", "core", "views", "demo"]);

  let kinds: Vec<_> = reports.iter().map(|r| r["kind"].as_str().unwrap()).collect();
  assert_eq!(kinds, vec!["pom", "jar", "aar", "apk"]);
}

#[test]
fn json_reports_toolchain_per_kind() {
  let env = TestEnv::from_fixture("multi_module.toml");
  let reports = configure_json(&env);

  assert_eq!(reports[0]["toolchain"]["kind"], "aggregator");

  let core = &reports[1]["toolchain"];
  assert_eq!(core["kind"], "plain");
  assert_eq!(core["jvm"]["toolchain"], 17);
  assert_eq!(core["jvm"]["source_compatibility"], "11");
  assert_eq!(core["test"]["platform"], "junit-platform");

  let views = &reports[2]["toolchain"]["android"];
  assert_eq!(views["namespace"], "org.example.views");
  assert!(views["target_sdk"].is_null());

  let demo = &reports[3]["toolchain"]["android"];
  assert_eq!(demo["target_sdk"], 34);
  assert_eq!(demo["min_sdk"], 21);
}

#[test]
fn snapshots_written_per_module() {
  let env = TestEnv::from_fixture("multi_module.toml");
  env.keel_cmd().arg("configure").assert().success();

  assert_eq!(env.snapshot("build", "bom"), "");

  let core = env.snapshot("build", "core");
  let lines: Vec<_> = core.lines().collect();
  assert!(lines.contains(&"implementation"));
  assert!(lines.contains(&"ksp"));
  assert!(!core.ends_with('\n'));

  let mut sorted = lines.clone();
  sorted.sort();
  assert_eq!(lines, sorted);

  assert!(env.snapshot("build", "views").contains("debugRuntimeClasspath"));
}

#[test]
fn reconfigure_produces_identical_output() {
  let env = TestEnv::from_fixture("multi_module.toml");

  let first = configure_json(&env);
  let first_snapshot = env.snapshot("build", "demo");
  let second = configure_json(&env);

  assert_eq!(first, second);
  assert_eq!(first_snapshot, env.snapshot("build", "demo"));
}

#[test]
fn build_dir_env_override() {
  let env = TestEnv::from_fixture("multi_module.toml");

  env
    .keel_cmd()
    .arg("configure")
    .env("KEEL_BUILD_DIR", "elsewhere")
    .assert()
    .success();

  assert!(env.root_path().join("elsewhere/scopes/core.txt").exists());
  assert!(!env.root_path().join("build").exists());
}

#[test]
fn missing_required_property_names_key() {
  let env = TestEnv::empty();
  env.write_file(
    "keel.toml",
    "[[module]]\nname = \"core\"\n[module.properties]\nGROUP = \"g\"\nPOM_PACKAGING = \"jar\"\n",
  );

  env
    .keel_cmd()
    .arg("configure")
    .assert()
    .failure()
    .stderr(predicate::str::contains("'VERSION_NAME'"));

  assert!(!env.root_path().join("build").exists());
}

#[test]
fn malformed_integer_property_fails() {
  let env = TestEnv::from_fixture("multi_module.toml");
  let content = std::fs::read_to_string(&env.build_file)
    .unwrap()
    .replace("\"build.jdkBuild\" = 17", "\"build.jdkBuild\" = \"seventeen\"");
  env.write_file("keel.toml", &content);

  env
    .keel_cmd()
    .arg("configure")
    .assert()
    .failure()
    .stderr(predicate::str::contains("seventeen"));
}

#[test]
fn version_gate_rejects_other_versions() {
  let env = TestEnv::empty();
  env.write_file("keel.toml", "[build]\nrequired_version = \"0.0.0-other\"\n");

  env
    .keel_cmd()
    .arg("configure")
    .assert()
    .failure()
    .stderr(predicate::str::contains("build requires keel 0.0.0-other"));
}

#[test]
fn duplicate_module_rejected() {
  let env = TestEnv::empty();
  env.write_file("keel.toml", "[[module]]\nname = \"a\"\n\n[[module]]\nname = \"a\"\n");

  env
    .keel_cmd()
    .arg("configure")
    .assert()
    .failure()
    .stderr(predicate::str::contains("declared more than once"));
}
