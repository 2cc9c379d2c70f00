//! Filesystem operations used by the executors.
//!
//! The executors only touch the filesystem through [`ExtrasFs`], so tests can
//! substitute an implementation that fails at a chosen step.

use std::fs;
use std::io;
use std::path::Path;

use super::types::Mode;

/// The filesystem operations needed to install and remove extras.
pub trait ExtrasFs {
  /// Whether `path` currently exists.
  fn exists(&self, path: &Path) -> bool;

  /// Copy the contents of `from` to `to`, creating or truncating `to`.
  /// Fails without touching `to` when both name the same file.
  fn copy(&self, from: &Path, to: &Path) -> io::Result<u64>;

  /// Apply permission bits to `path`.
  fn set_mode(&self, path: &Path, mode: Mode) -> io::Result<()>;

  /// Remove the file at `path`.
  fn remove(&self, path: &Path) -> io::Result<()>;
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostFs;

impl ExtrasFs for HostFs {
  fn exists(&self, path: &Path) -> bool {
    path.exists()
  }

  fn copy(&self, from: &Path, to: &Path) -> io::Result<u64> {
    if to.exists() && dunce::canonicalize(from)? == dunce::canonicalize(to)? {
      return Err(io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("{} and {} are the same file", from.display(), to.display()),
      ));
    }
    fs::copy(from, to)
  }

  fn set_mode(&self, path: &Path, mode: Mode) -> io::Result<()> {
    set_mode_impl(path, mode)
  }

  fn remove(&self, path: &Path) -> io::Result<()> {
    fs::remove_file(path)
  }
}

// ============ Unix Implementation ============

#[cfg(unix)]
fn set_mode_impl(path: &Path, mode: Mode) -> io::Result<()> {
  use std::os::unix::fs::PermissionsExt;

  fs::set_permissions(path, fs::Permissions::from_mode(mode.bits()))
}

// ============ Other Platforms ============

/// Only the write bits map onto the read-only flag.
#[cfg(not(unix))]
fn set_mode_impl(path: &Path, mode: Mode) -> io::Result<()> {
  let mut perms = fs::metadata(path)?.permissions();
  perms.set_readonly(mode.bits() & 0o222 == 0);
  fs::set_permissions(path, perms)
}
