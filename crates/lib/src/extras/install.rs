//! Install executor.
//!
//! Copies every declared extra into its target directory, in registration
//! order. Entries that cannot be parsed, or whose destination already exists
//! without force mode, are skipped. The first copy or mode failure aborts the
//! run: a destination created by the failed attempt is removed on a
//! best-effort basis and no further entries are processed.

use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use super::fs::{ExtrasFs, HostFs};
use super::registry::ExtrasRegistry;
use super::types::{Declaration, ExtrasError, InstallOutcome, Mode, SkipReason};

/// Options for the install operation.
#[derive(Debug, Clone)]
pub struct InstallOptions {
  /// Overwrite destinations that already exist.
  pub force: bool,

  /// Directory that relative source paths are resolved against.
  pub source_root: PathBuf,
}

impl Default for InstallOptions {
  fn default() -> Self {
    Self {
      force: false,
      source_root: PathBuf::from("."),
    }
  }
}

/// What happened to one declaration.
#[derive(Debug)]
pub struct InstallRecord {
  /// Destination path, or the target directory when the declaration could
  /// not be parsed.
  pub target: PathBuf,

  /// Resolved source path, when the declaration could be parsed.
  pub source: Option<PathBuf>,

  pub outcome: InstallOutcome,
}

/// Records of an install run, in processing order.
///
/// A failed run ends with exactly one [`InstallOutcome::Failed`] record;
/// entries after it were never attempted.
#[derive(Debug, Default)]
pub struct InstallReport {
  pub records: Vec<InstallRecord>,
}

impl InstallReport {
  /// Returns true if no entry failed.
  pub fn is_success(&self) -> bool {
    self.failure().is_none()
  }

  /// The record that aborted the run, if any.
  pub fn failure(&self) -> Option<&InstallRecord> {
    self
      .records
      .iter()
      .find(|r| matches!(r.outcome, InstallOutcome::Failed(_)))
  }

  pub fn copied(&self) -> usize {
    self
      .records
      .iter()
      .filter(|r| matches!(r.outcome, InstallOutcome::Copied { .. }))
      .count()
  }

  pub fn skipped(&self) -> usize {
    self
      .records
      .iter()
      .filter(|r| matches!(r.outcome, InstallOutcome::Skipped(_)))
      .count()
  }
}

/// Install the registry's extras onto the host filesystem.
pub fn install(registry: &ExtrasRegistry, options: &InstallOptions) -> InstallReport {
  install_with(registry, options, &HostFs)
}

/// Install the registry's extras through `fs`.
pub fn install_with<F: ExtrasFs>(registry: &ExtrasRegistry, options: &InstallOptions, fs: &F) -> InstallReport {
  info!(
    force = options.force,
    source_root = %options.source_root.display(),
    entries = registry.len(),
    "installing extras"
  );

  let mut report = InstallReport::default();

  for (directory, decl) in registry.entries() {
    let record = install_entry(directory, decl, options, fs);
    let failed = matches!(record.outcome, InstallOutcome::Failed(_));
    report.records.push(record);

    if failed {
      error!(
        remaining = registry.len() - report.records.len(),
        "aborting install after failure"
      );
      break;
    }
  }

  info!(
    copied = report.copied(),
    skipped = report.skipped(),
    success = report.is_success(),
    "install finished"
  );

  report
}

fn install_entry<F: ExtrasFs>(
  directory: &Path,
  decl: &Declaration,
  options: &InstallOptions,
  fs: &F,
) -> InstallRecord {
  let entry = match decl.normalize() {
    Ok(entry) => entry,
    Err(err) => {
      warn!(directory = %directory.display(), error = %err, "skipping unparseable entry");
      return InstallRecord {
        target: directory.to_path_buf(),
        source: None,
        outcome: InstallOutcome::Skipped(SkipReason::Unparseable(err)),
      };
    }
  };

  let target = directory.join(&entry.filename);
  let source = options.source_root.join(&entry.source);

  let existed = fs.exists(&target);
  if existed && !options.force {
    warn!(
      source = %source.display(),
      destination = %target.display(),
      "destination exists, skipping"
    );
    return InstallRecord {
      target,
      source: Some(source),
      outcome: InstallOutcome::Skipped(SkipReason::AlreadyExists),
    };
  }

  let outcome = match copy_entry(&source, &target, entry.mode, fs) {
    Ok(()) => {
      info!(
        source = %source.display(),
        destination = %target.display(),
        mode = ?entry.mode.map(|m| m.to_string()),
        overwritten = existed,
        "copied extra"
      );
      InstallOutcome::Copied { mode: entry.mode }
    }
    Err(err) => {
      if !existed && fs.exists(&target) {
        discard_partial(&target, fs);
      }
      error!(source = %source.display(), destination = %target.display(), error = %err, "failed to install extra");
      InstallOutcome::Failed(err)
    }
  };

  InstallRecord {
    target,
    source: Some(source),
    outcome,
  }
}

fn copy_entry<F: ExtrasFs>(source: &Path, target: &Path, mode: Option<Mode>, fs: &F) -> Result<(), ExtrasError> {
  fs.copy(source, target).map_err(|e| ExtrasError::Copy {
    from: source.to_path_buf(),
    to: target.to_path_buf(),
    source: e,
  })?;

  if let Some(mode) = mode {
    fs.set_mode(target, mode).map_err(|e| ExtrasError::SetMode {
      path: target.to_path_buf(),
      mode,
      source: e,
    })?;
  }

  Ok(())
}

/// Remove a destination created by a failed attempt. Errors are logged only.
fn discard_partial<F: ExtrasFs>(target: &Path, fs: &F) {
  match fs.remove(target) {
    Ok(()) => debug!(destination = %target.display(), "removed partially installed extra"),
    Err(e) => warn!(destination = %target.display(), error = %e, "failed to clean up partially installed extra"),
  }
}
