//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::{Value, json};
use tempfile::TempDir;

/// Workspace root, which ships `extras/wifi-completion.bash`.
pub fn package_root() -> PathBuf {
  let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..").join("..");
  dunce::canonicalize(&root).unwrap_or(root)
}

/// Contents of the shipped completion script.
pub fn completion_script() -> String {
  std::fs::read_to_string(package_root().join("extras").join("wifi-completion.bash"))
    .unwrap_or_else(|e| panic!("Failed to read completion script: {}", e))
}

/// Isolated test environment.
///
/// Each test gets its own temporary directory holding the target directory,
/// the registry file and an empty config home.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  pub fn new() -> Self {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir_all(temp.path().join("target")).unwrap();
    std::fs::create_dir_all(temp.path().join("config")).unwrap();
    Self { temp }
  }

  /// Directory extras are installed into.
  pub fn target_dir(&self) -> PathBuf {
    let p = self.temp.path().join("target");
    dunce::canonicalize(&p).unwrap_or(p)
  }

  pub fn target(&self, name: &str) -> PathBuf {
    self.target_dir().join(name)
  }

  /// Write a file relative to the temp directory.
  pub fn write_file(&self, relative_path: &str, content: &str) -> PathBuf {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
  }

  /// Write a registry with a single target (the temp target directory).
  pub fn write_registry(&self, extras: Value) -> PathBuf {
    let registry = json!({
      "targets": [
        { "directory": self.target_dir(), "extras": extras }
      ]
    });
    self.write_file("registry/extras.json", &registry.to_string())
  }

  /// The built-in completion entry, pointed at the temp target directory.
  pub fn completion_registry(&self) -> PathBuf {
    self.write_registry(json!([["extras/wifi-completion.bash", "wifi-completion", "0644"]]))
  }

  /// Get a pre-configured Command for the wifi binary.
  ///
  /// Clears the extras environment variables and isolates the config
  /// directory so no user registry is picked up.
  pub fn wifi_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("wifi");
    cmd.env_remove("WIFI_EXTRAS_REGISTRY");
    cmd.env_remove("WIFI_EXTRAS_SOURCE_ROOT");
    cmd.env_remove("RUST_LOG");
    cmd.env("XDG_CONFIG_HOME", self.temp.path().join("config"));
    cmd.env("APPDATA", self.temp.path().join("config")); // For Windows
    cmd.current_dir(self.temp.path());
    cmd
  }

  /// Command running `subcommand` against `registry` with the package root
  /// as source root.
  pub fn extras_cmd(&self, subcommand: &str, registry: &Path) -> Command {
    let mut cmd = self.wifi_cmd();
    cmd
      .arg("--registry")
      .arg(registry)
      .arg("--source-root")
      .arg(package_root())
      .arg(subcommand);
    cmd
  }
}

#[cfg(unix)]
pub fn mode_of(path: &Path) -> u32 {
  use std::os::unix::fs::PermissionsExt;
  std::fs::metadata(path).unwrap().permissions().mode() & 0o7777
}
