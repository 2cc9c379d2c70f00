//! Uninstall executor.
//!
//! Removes every declared extra from its target directory. Each entry is
//! independent: a failure (including a file that is already gone) is
//! recorded and the run moves on to the next entry.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::fs::{ExtrasFs, HostFs};
use super::registry::ExtrasRegistry;
use super::types::{Declaration, ExtrasError, UninstallOutcome};

/// What happened to one declaration.
#[derive(Debug)]
pub struct UninstallRecord {
  /// Path that was removed, or the target directory when the declaration
  /// could not be parsed.
  pub target: PathBuf,

  /// File name within the target directory, when the declaration could be
  /// parsed.
  pub filename: Option<String>,

  pub outcome: UninstallOutcome,
}

/// Records of an uninstall run, one per registry entry.
#[derive(Debug, Default)]
pub struct UninstallReport {
  pub records: Vec<UninstallRecord>,
}

impl UninstallReport {
  pub fn removed(&self) -> usize {
    self
      .records
      .iter()
      .filter(|r| matches!(r.outcome, UninstallOutcome::Removed))
      .count()
  }

  pub fn failed(&self) -> usize {
    self.records.len() - self.removed()
  }

  /// Returns true if every entry was removed.
  pub fn is_success(&self) -> bool {
    self.failed() == 0
  }
}

/// Remove the registry's extras from the host filesystem.
pub fn uninstall(registry: &ExtrasRegistry) -> UninstallReport {
  uninstall_with(registry, &HostFs)
}

/// Remove the registry's extras through `fs`.
pub fn uninstall_with<F: ExtrasFs>(registry: &ExtrasRegistry, fs: &F) -> UninstallReport {
  info!(entries = registry.len(), "uninstalling extras");

  let records: Vec<_> = registry
    .entries()
    .map(|(directory, decl)| uninstall_entry(directory, decl, fs))
    .collect();
  let report = UninstallReport { records };

  info!(removed = report.removed(), failed = report.failed(), "uninstall finished");
  report
}

fn uninstall_entry<F: ExtrasFs>(directory: &Path, decl: &Declaration, fs: &F) -> UninstallRecord {
  let entry = match decl.normalize() {
    Ok(entry) => entry,
    Err(err) => {
      warn!(directory = %directory.display(), error = %err, "skipping unparseable entry");
      return UninstallRecord {
        target: directory.to_path_buf(),
        filename: None,
        outcome: UninstallOutcome::Failed(err.into()),
      };
    }
  };

  let target = directory.join(&entry.filename);

  let outcome = match fs.remove(&target) {
    Ok(()) => {
      info!(destination = %target.display(), "removed extra");
      UninstallOutcome::Removed
    }
    Err(e) => {
      warn!(destination = %target.display(), error = %e, "failed to remove extra, remove it manually");
      UninstallOutcome::Failed(ExtrasError::Delete {
        path: target.clone(),
        source: e,
      })
    }
  };

  UninstallRecord {
    target,
    filename: Some(entry.filename),
    outcome,
  }
}
