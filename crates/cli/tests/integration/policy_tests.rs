//! Allow-list integration tests.

use predicates::prelude::*;
use serde_json::Value;

use super::common::TestEnv;

fn policy_of(env: &TestEnv) -> Value {
  let output = env
    .keel_cmd()
    .args(["configure", "--output", "json"])
    .output()
    .unwrap();
  assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
  let reports: Vec<Value> = serde_json::from_slice(&output.stdout).unwrap();
  reports[0]["policy"].clone()
}

fn contains(list: &Value, name: &str) -> bool {
  list.as_array().unwrap().iter().any(|v| v == name)
}

#[test]
fn builtin_allow_list_denies_unknown_scopes() {
  let env = TestEnv::from_fixture("multi_module.toml");
  let output = env
    .keel_cmd()
    .args(["configure", "--output", "json"])
    .output()
    .unwrap();
  let reports: Vec<Value> = serde_json::from_slice(&output.stdout).unwrap();
  let policy = &reports[1]["policy"];

  assert!(contains(&policy["allowed"], "testImplementation"));
  assert!(contains(&policy["allowed"], "kotlinCompilerClasspath"));
  assert!(contains(&policy["denied"], "ksp"));
  assert!(contains(&policy["denied"], "runtimeClasspath"));
}

#[test]
fn custom_allow_list_replaces_builtin() {
  let env = TestEnv::from_fixture("custom_allow_list.toml");
  env.add_fixture("transitive-scopes.json");

  let policy = policy_of(&env);

  let allowed: Vec<_> = policy["allowed"].as_array().unwrap().iter().collect();
  assert_eq!(allowed, vec!["ksp", "runtimeClasspath"]);
  assert!(contains(&policy["denied"], "implementation"));
  assert!(env.snapshot("out", "core").contains("ksp"));
}

#[test]
fn custom_allow_list_keeps_legacy_java_spelling() {
  let env = TestEnv::from_fixture("custom_allow_list.toml");
  env.add_fixture("transitive-scopes.json");

  let output = env
    .keel_cmd()
    .args(["configure", "--output", "json"])
    .output()
    .unwrap();
  let reports: Vec<Value> = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(reports[0]["toolchain"]["jvm"]["target_compatibility"], "1.8");
  assert_eq!(reports[0]["toolchain"]["jvm"]["kotlin_jvm_target"], "8");
}

#[test]
fn missing_allow_list_file_fails() {
  let env = TestEnv::from_fixture("custom_allow_list.toml");

  env
    .keel_cmd()
    .arg("configure")
    .assert()
    .failure()
    .stderr(predicate::str::contains("transitive-scopes.json"));
}

#[test]
fn unsupported_allow_list_version_fails() {
  let env = TestEnv::from_fixture("custom_allow_list.toml");
  env.write_file(
    "transitive-scopes.json",
    r#"{"version": 2, "toolchain": "future", "scopes": []}"#,
  );

  env
    .keel_cmd()
    .arg("configure")
    .assert()
    .failure()
    .stderr(predicate::str::contains("unsupported allow-list version 2"));
}
