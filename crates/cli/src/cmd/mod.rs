mod install_extras;
mod list_extras;
mod uninstall_extras;

pub use install_extras::cmd_install_extras;
pub use list_extras::cmd_list_extras;
pub use uninstall_extras::cmd_uninstall_extras;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use wifi_lib::config::{RegistrySource, resolve_source_root};
use wifi_lib::extras::ExtrasRegistry;

/// Registry and source root chosen for a command.
pub struct Selection {
  pub source: RegistrySource,
  pub registry: ExtrasRegistry,
}

impl Selection {
  /// Locate and load the registry.
  pub fn load(explicit: Option<PathBuf>) -> Result<Self> {
    let source = RegistrySource::discover(explicit);
    let registry = source.load().with_context(|| match &source {
      RegistrySource::File(path) => format!("Failed to load extras registry {}", path.display()),
      RegistrySource::Builtin => "Failed to load built-in extras registry".to_string(),
    })?;

    debug!(source = ?source, entries = registry.len(), "registry loaded");
    Ok(Self { source, registry })
  }

  /// Directory relative extras sources are read from.
  pub fn source_root(&self, explicit: Option<&Path>) -> Result<PathBuf> {
    resolve_source_root(explicit, &self.source).context("Failed to resolve extras source root")
  }
}
