//! The extras registry: which files go into which target directories.
//!
//! A registry is an ordered list of target directories, each with an ordered
//! list of declarations. Executors walk it in that order, so reports come out
//! in the order the registry was written.
//!
//! Registries are either built in code ([`ExtrasRegistry::builtin`]) or loaded
//! from a JSON file:
//!
//! ```json
//! {
//!   "targets": [
//!     {
//!       "directory": "/etc/bash_completion.d/",
//!       "extras": [["extras/wifi-completion.bash", "wifi-completion", "0644"]]
//!     }
//!   ]
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::types::{Declaration, ExtraDeclaration, Mode};

/// Directory that receives bash completion scripts.
pub const BASH_COMPLETION_DIR: &str = "/etc/bash_completion.d/";

/// Errors that can occur when loading a registry file.
#[derive(Debug, Error)]
pub enum RegistryError {
  /// Failed to read the registry file.
  #[error("failed to read registry {}: {source}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// The registry document is not valid.
  #[error("failed to parse registry: {0}")]
  Parse(#[from] serde_json::Error),
}

/// One target directory and the extras installed into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDir {
  /// Absolute directory that must already exist.
  pub directory: PathBuf,
  pub declarations: Vec<Declaration>,
}

impl TargetDir {
  pub fn new(directory: impl Into<PathBuf>, declarations: impl IntoIterator<Item = Declaration>) -> Self {
    Self {
      directory: directory.into(),
      declarations: declarations.into_iter().collect(),
    }
  }
}

/// Ordered table of target directories and their declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtrasRegistry {
  targets: Vec<TargetDir>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RegistryFile {
  targets: Vec<TargetFile>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TargetFile {
  directory: PathBuf,
  #[serde(default)]
  extras: Vec<serde_json::Value>,
}

impl ExtrasRegistry {
  pub fn new(targets: Vec<TargetDir>) -> Self {
    Self { targets }
  }

  /// The registry shipped with wifi: the bash completion script.
  pub fn builtin() -> Self {
    Self::new(vec![TargetDir::new(
      BASH_COMPLETION_DIR,
      [ExtraDeclaration::PathFilenameMode(
        PathBuf::from("extras/wifi-completion.bash"),
        "wifi-completion".to_string(),
        Mode::new(0o644),
      )
      .into()],
    )])
  }

  /// Parse a registry document.
  ///
  /// Declarations that do not match an accepted shorthand are kept as
  /// [`Declaration::Unparseable`]; only a broken document is an error.
  pub fn from_json_str(content: &str) -> Result<Self, RegistryError> {
    let file: RegistryFile = serde_json::from_str(content)?;

    let targets = file
      .targets
      .into_iter()
      .map(|target| {
        let declarations = target
          .extras
          .iter()
          .map(|value| match ExtraDeclaration::from_shorthand(value) {
            Ok(decl) => Declaration::Extra(decl),
            Err(err) => {
              warn!(directory = %target.directory.display(), error = %err, "keeping unparseable declaration");
              Declaration::Unparseable(err)
            }
          })
          .collect();
        TargetDir {
          directory: target.directory,
          declarations,
        }
      })
      .collect();

    Ok(Self { targets })
  }

  /// Read and parse a registry file.
  pub fn load(path: &Path) -> Result<Self, RegistryError> {
    debug!(path = %path.display(), "loading extras registry");
    let content = fs::read_to_string(path).map_err(|source| RegistryError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_json_str(&content)
  }

  pub fn targets(&self) -> &[TargetDir] {
    &self.targets
  }

  /// Iterate `(directory, declaration)` pairs in registration order.
  pub fn entries(&self) -> impl Iterator<Item = (&Path, &Declaration)> {
    self
      .targets
      .iter()
      .flat_map(|target| target.declarations.iter().map(move |decl| (target.directory.as_path(), decl)))
  }

  /// Total number of declarations across all targets.
  pub fn len(&self) -> usize {
    self.targets.iter().map(|t| t.declarations.len()).sum()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}
