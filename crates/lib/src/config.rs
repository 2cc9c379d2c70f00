//! Locating the extras registry and the source root.
//!
//! Precedence, highest first:
//!
//! 1. an explicit registry path (flag or `WIFI_EXTRAS_REGISTRY`)
//! 2. `extras.json` in the configuration directory, if it exists
//! 3. the built-in registry
//!
//! Relative source paths are resolved against the source root: an explicit
//! one (flag or `WIFI_EXTRAS_SOURCE_ROOT`), else the directory holding the
//! registry file, else the current directory.

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::consts::REGISTRY_FILENAME;
use crate::extras::{ExtrasRegistry, RegistryError};
use crate::platform::paths::config_dir;

/// Where the registry is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrySource {
  Builtin,
  File(PathBuf),
}

impl RegistrySource {
  /// Pick the registry source following the precedence above.
  pub fn discover(explicit: Option<PathBuf>) -> Self {
    if let Some(path) = explicit {
      return RegistrySource::File(path);
    }

    match config_dir().map(|dir| dir.join(REGISTRY_FILENAME)) {
      Some(path) if path.is_file() => {
        debug!(path = %path.display(), "using registry from config directory");
        RegistrySource::File(path)
      }
      _ => RegistrySource::Builtin,
    }
  }

  pub fn load(&self) -> Result<ExtrasRegistry, RegistryError> {
    match self {
      RegistrySource::Builtin => Ok(ExtrasRegistry::builtin()),
      RegistrySource::File(path) => ExtrasRegistry::load(path),
    }
  }

  /// Source root used when none is given explicitly.
  pub fn default_source_root(&self) -> io::Result<PathBuf> {
    match self {
      RegistrySource::File(path) => match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Ok(parent.to_path_buf()),
        _ => std::env::current_dir(),
      },
      RegistrySource::Builtin => std::env::current_dir(),
    }
  }
}

/// Resolve the source root to an absolute, canonical directory.
pub fn resolve_source_root(explicit: Option<&Path>, source: &RegistrySource) -> io::Result<PathBuf> {
  let root = match explicit {
    Some(path) => path.to_path_buf(),
    None => source.default_source_root()?,
  };
  dunce::canonicalize(&root)
}
