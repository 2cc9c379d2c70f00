//! list-extras integration tests.

use predicates::prelude::*;
use serde_json::{Value, json};

use super::common::TestEnv;

#[test]
fn list_shows_install_state() {
  let env = TestEnv::new();
  let registry = env.completion_registry();

  env
    .extras_cmd("list-extras", &registry)
    .assert()
    .success()
    .stdout(predicate::str::contains("wifi-completion"))
    .stdout(predicate::str::contains("mode 0644, not installed"));

  env.extras_cmd("install-extras", &registry).assert().success();

  env
    .extras_cmd("list-extras", &registry)
    .assert()
    .success()
    .stdout(predicate::str::contains("mode 0644, installed"));
}

#[test]
fn list_json_includes_unparseable_entries() {
  let env = TestEnv::new();
  let registry = env.write_registry(json!([[], ["extras/wifi-completion.bash", "0755"]]));

  let output = env
    .extras_cmd("list-extras", &registry)
    .arg("--output")
    .arg("json")
    .assert()
    .success()
    .get_output()
    .stdout
    .clone();

  let entries: Value = serde_json::from_slice(&output).unwrap();
  assert_eq!(entries[0]["status"], "unparseable");
  assert_eq!(entries[1]["status"], "resolved");
  assert_eq!(entries[1]["mode"], "0755");
  assert_eq!(entries[1]["source_present"], true);
  assert_eq!(entries[1]["installed"], false);
}
