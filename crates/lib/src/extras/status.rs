//! Read-only view of the registry against the filesystem.

use std::path::{Path, PathBuf};

use super::fs::{ExtrasFs, HostFs};
use super::registry::ExtrasRegistry;
use super::types::{MalformedDeclaration, NormalizedEntry};

/// Where one declaration stands on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryStatus {
  /// The declaration resolved to a destination.
  Resolved {
    entry: NormalizedEntry,
    /// Source path joined onto the source root.
    source: PathBuf,
    /// Destination path inside the target directory.
    target: PathBuf,
    /// Whether the source file is present.
    source_present: bool,
    /// Whether the destination is currently present.
    installed: bool,
  },
  /// The declaration could not be parsed.
  Unparseable {
    directory: PathBuf,
    error: MalformedDeclaration,
  },
}

/// Describe every registry entry, in registration order.
pub fn status(registry: &ExtrasRegistry, source_root: &Path) -> Vec<EntryStatus> {
  status_with(registry, source_root, &HostFs)
}

/// Describe every registry entry, checking presence through `fs`.
pub fn status_with<F: ExtrasFs>(registry: &ExtrasRegistry, source_root: &Path, fs: &F) -> Vec<EntryStatus> {
  registry
    .entries()
    .map(|(directory, decl)| match decl.normalize() {
      Ok(entry) => {
        let source = source_root.join(&entry.source);
        let target = directory.join(&entry.filename);
        EntryStatus::Resolved {
          source_present: fs.exists(&source),
          installed: fs.exists(&target),
          entry,
          source,
          target,
        }
      }
      Err(error) => EntryStatus::Unparseable {
        directory: directory.to_path_buf(),
        error,
      },
    })
    .collect()
}
