//! install-extras integration tests.

use predicates::prelude::*;
use serde_json::{Value, json};

use super::common::{TestEnv, completion_script};

#[test]
fn install_copies_completion_script() {
  let env = TestEnv::new();
  let registry = env.completion_registry();

  env
    .extras_cmd("install-extras", &registry)
    .assert()
    .success()
    .stdout(predicate::str::contains("Copied"))
    .stdout(predicate::str::contains("changed mode to 644"))
    .stdout(predicate::str::contains("1 copied, 0 skipped"));

  let installed = env.target("wifi-completion");
  assert_eq!(std::fs::read_to_string(&installed).unwrap(), completion_script());
  #[cfg(unix)]
  assert_eq!(super::common::mode_of(&installed), 0o644);
}

#[test]
fn install_skips_existing_file_without_force() {
  let env = TestEnv::new();
  let registry = env.completion_registry();
  std::fs::write(env.target("wifi-completion"), "old").unwrap();

  env
    .extras_cmd("install-extras", &registry)
    .assert()
    .success()
    .stderr(predicate::str::contains("already exists, use --force to overwrite"));

  assert_eq!(std::fs::read_to_string(env.target("wifi-completion")).unwrap(), "old");
}

#[test]
fn install_force_overwrites_existing_file() {
  let env = TestEnv::new();
  let registry = env.completion_registry();

  for flag in ["--force", "-F"] {
    std::fs::write(env.target("wifi-completion"), "old").unwrap();
    env
      .extras_cmd("install-extras", &registry)
      .arg(flag)
      .assert()
      .success()
      .stdout(predicate::str::contains("Copied"));

    assert_eq!(
      std::fs::read_to_string(env.target("wifi-completion")).unwrap(),
      completion_script()
    );
  }
}

#[test]
fn install_aborts_on_first_failure() {
  let env = TestEnv::new();
  let registry = env.write_registry(json!([
    ["extras/does-not-exist.bash", "missing", "0644"],
    ["extras/wifi-completion.bash", "wifi-completion", "0644"]
  ]));

  env
    .extras_cmd("install-extras", &registry)
    .assert()
    .failure()
    .stderr(predicate::str::contains("Error while copying"))
    .stderr(predicate::str::contains("aborting"));

  assert!(!env.target("missing").exists());
  assert!(
    !env.target("wifi-completion").exists(),
    "entries after the failure must not be installed"
  );
}

#[test]
fn install_failure_is_logged_by_default() {
  let env = TestEnv::new();
  let registry = env.write_registry(json!([["extras/does-not-exist.bash", "missing", "0644"]]));

  env
    .extras_cmd("install-extras", &registry)
    .assert()
    .failure()
    .stderr(predicate::str::contains("failed to install extra"));
}

#[test]
fn install_skips_unparseable_entries() {
  let env = TestEnv::new();
  let registry = env.write_registry(json!([
    [],
    ["extras/wifi-completion.bash", "wifi-completion", "0644"]
  ]));

  env
    .extras_cmd("install-extras", &registry)
    .assert()
    .success()
    .stderr(predicate::str::contains("Can't parse entry for target"));

  assert!(env.target("wifi-completion").exists());
}

#[test]
fn install_json_output() {
  let env = TestEnv::new();
  let registry = env.completion_registry();

  let output = env
    .extras_cmd("install-extras", &registry)
    .arg("--output")
    .arg("json")
    .assert()
    .success()
    .get_output()
    .stdout
    .clone();

  let records: Value = serde_json::from_slice(&output).unwrap();
  assert_eq!(records[0]["outcome"], "copied");
  assert_eq!(records[0]["mode"], "0644");
  assert_eq!(
    records[0]["target"].as_str().unwrap(),
    env.target("wifi-completion").to_str().unwrap()
  );
}

#[test]
fn install_reads_registry_and_source_root_from_env() {
  let env = TestEnv::new();
  let registry = env.completion_registry();

  env
    .wifi_cmd()
    .env("WIFI_EXTRAS_REGISTRY", &registry)
    .env("WIFI_EXTRAS_SOURCE_ROOT", super::common::package_root())
    .arg("install-extras")
    .assert()
    .success();

  assert!(env.target("wifi-completion").exists());
}

#[test]
fn install_resolves_sources_next_to_registry() {
  let env = TestEnv::new();
  env.write_file("registry/extras/hello.sh", "echo hello\n");
  let registry = env.write_registry(json!(["extras/hello.sh"]));

  env
    .wifi_cmd()
    .arg("--registry")
    .arg(&registry)
    .arg("install-extras")
    .assert()
    .success();

  assert_eq!(std::fs::read_to_string(env.target("hello.sh")).unwrap(), "echo hello\n");
}
