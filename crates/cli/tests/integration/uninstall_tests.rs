//! uninstall-extras integration tests.

use predicates::prelude::*;
use serde_json::{Value, json};

use super::common::TestEnv;

#[test]
fn install_then_uninstall_twice() {
  let env = TestEnv::new();
  let registry = env.completion_registry();

  env.extras_cmd("install-extras", &registry).assert().success();
  assert!(env.target("wifi-completion").exists());

  env
    .extras_cmd("uninstall-extras", &registry)
    .assert()
    .success()
    .stdout(predicate::str::contains("Removed"))
    .stdout(predicate::str::contains("1 removed, 0 failed"));
  assert!(!env.target("wifi-completion").exists());

  // Second run reports the failure but still exits cleanly
  env
    .extras_cmd("uninstall-extras", &registry)
    .assert()
    .success()
    .stderr(predicate::str::contains("Error while deleting wifi-completion"))
    .stderr(predicate::str::contains("please remove manually"))
    .stdout(predicate::str::contains("0 removed, 1 failed"));
}

#[test]
fn uninstall_continues_after_failure() {
  let env = TestEnv::new();
  let registry = env.write_registry(json!([
    ["extras/first", "first", null],
    ["extras/second", "second", null]
  ]));
  std::fs::write(env.target("second"), "x").unwrap();

  env
    .extras_cmd("uninstall-extras", &registry)
    .assert()
    .success()
    .stderr(predicate::str::contains("Error while deleting first"));

  assert!(!env.target("second").exists(), "later entries are still removed");
}

#[test]
fn uninstall_reports_unparseable_entries() {
  let env = TestEnv::new();
  let registry = env.write_registry(json!([["a", "b", "0644", "extra"], "extras/kept"]));
  std::fs::write(env.target("kept"), "x").unwrap();

  env
    .extras_cmd("uninstall-extras", &registry)
    .assert()
    .success()
    .stderr(predicate::str::contains("Can't parse entry for target"));

  assert!(!env.target("kept").exists());
}

#[test]
fn uninstall_json_output() {
  let env = TestEnv::new();
  let registry = env.completion_registry();

  let output = env
    .extras_cmd("uninstall-extras", &registry)
    .arg("--output")
    .arg("json")
    .assert()
    .success()
    .get_output()
    .stdout
    .clone();

  let records: Value = serde_json::from_slice(&output).unwrap();
  assert_eq!(records[0]["outcome"], "failed");
  assert!(records[0]["reason"].as_str().unwrap().contains("failed to delete"));
}
