//! Types shared by the extras normalizer, registry and executors.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

/// Highest value accepted as a permission mode (`rwx` for all plus the
/// setuid, setgid and sticky bits).
pub const MAX_MODE: u32 = 0o7777;

/// File permission bits applied to an installed extra.
///
/// Displays in octal without a prefix (`644`), matching `chmod` usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Mode(u32);

impl Mode {
  /// Create a mode, returning `None` when `bits` exceeds [`MAX_MODE`].
  pub const fn new(bits: u32) -> Option<Self> {
    if bits > MAX_MODE { None } else { Some(Self(bits)) }
  }

  /// Parse an octal mode string such as `"0644"`, `"644"` or `"0o644"`.
  pub fn parse_octal(s: &str) -> Option<Self> {
    let digits = s.trim();
    let digits = digits.strip_prefix("0o").unwrap_or(digits);
    if digits.is_empty() {
      return None;
    }
    u32::from_str_radix(digits, 8).ok().and_then(Self::new)
  }

  /// The raw permission bits.
  pub const fn bits(self) -> u32 {
    self.0
  }
}

impl fmt::Display for Mode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:o}", self.0)
  }
}

/// An extra file as written by a registry author.
///
/// The three variants are the accepted authoring shorthands. Only
/// [`ExtraDeclaration::PathFilenameMode`] names the destination explicitly;
/// the other two derive it from the last segment of the source path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtraDeclaration {
  /// Source path only. No mode change is applied.
  BarePath(PathBuf),
  /// Source path and permission mode.
  PathWithMode(PathBuf, Option<Mode>),
  /// Source path, destination filename and permission mode.
  PathFilenameMode(PathBuf, String, Option<Mode>),
}

impl ExtraDeclaration {
  /// The declared source path, whatever the variant.
  pub fn source(&self) -> &Path {
    match self {
      ExtraDeclaration::BarePath(path)
      | ExtraDeclaration::PathWithMode(path, _)
      | ExtraDeclaration::PathFilenameMode(path, _, _) => path,
    }
  }
}

impl fmt::Display for ExtraDeclaration {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mode = |mode: &Option<Mode>| mode.map_or_else(|| "none".to_string(), |m| m.to_string());
    match self {
      ExtraDeclaration::BarePath(path) => write!(f, "{:?}", path.display().to_string()),
      ExtraDeclaration::PathWithMode(path, m) => write!(f, "({:?}, {})", path.display().to_string(), mode(m)),
      ExtraDeclaration::PathFilenameMode(path, filename, m) => {
        write!(f, "({:?}, {:?}, {})", path.display().to_string(), filename, mode(m))
      }
    }
  }
}

/// A registry entry: a well-formed declaration, or one that could not be
/// understood when the registry was loaded.
///
/// Unparseable entries are kept so the executors can report them in order
/// and carry on with the rest of the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
  Extra(ExtraDeclaration),
  Unparseable(MalformedDeclaration),
}

impl From<ExtraDeclaration> for Declaration {
  fn from(decl: ExtraDeclaration) -> Self {
    Declaration::Extra(decl)
  }
}

/// Canonical form of a declaration, ready to be acted upon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedEntry {
  /// Source file, relative to the source root unless absolute. Never empty.
  pub source: PathBuf,
  /// File name created inside the target directory. Never empty and always
  /// a single path component.
  pub filename: String,
  /// Permission bits to apply after copying, if any.
  pub mode: Option<Mode>,
}

/// A declaration whose shape is not one of the accepted forms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unparseable declaration {entry}: {reason}")]
pub struct MalformedDeclaration {
  /// Rendering of the offending entry, for the operator.
  pub entry: String,
  /// What is wrong with it.
  pub reason: String,
}

impl MalformedDeclaration {
  pub fn new(entry: impl Into<String>, reason: impl Into<String>) -> Self {
    Self {
      entry: entry.into(),
      reason: reason.into(),
    }
  }
}

/// Errors raised while installing or removing a single extra.
#[derive(Debug, Error)]
pub enum ExtrasError {
  /// The declaration could not be normalized.
  #[error(transparent)]
  Malformed(#[from] MalformedDeclaration),

  /// Copying the source onto the destination failed.
  #[error("failed to copy {} to {}: {source}", from.display(), to.display())]
  Copy {
    from: PathBuf,
    to: PathBuf,
    #[source]
    source: io::Error,
  },

  /// The copy succeeded but the permission mode could not be applied.
  #[error("failed to set mode {mode} on {}: {source}", path.display())]
  SetMode {
    path: PathBuf,
    mode: Mode,
    #[source]
    source: io::Error,
  },

  /// Removing an installed extra failed (including when it is missing).
  #[error("failed to delete {}: {source}", path.display())]
  Delete {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// Why an install entry was left alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
  /// The declaration could not be normalized.
  Unparseable(MalformedDeclaration),
  /// The destination is already present and force mode is off.
  AlreadyExists,
}

impl fmt::Display for SkipReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SkipReason::Unparseable(err) => write!(f, "{}", err),
      SkipReason::AlreadyExists => write!(f, "already exists, use --force to overwrite"),
    }
  }
}

/// Result of installing one declaration.
#[derive(Debug)]
pub enum InstallOutcome {
  /// The file was copied, and its mode changed when one was declared.
  Copied { mode: Option<Mode> },
  /// Nothing was written.
  Skipped(SkipReason),
  /// The copy or mode change failed. Install stops after this outcome.
  Failed(ExtrasError),
}

/// Result of removing one declaration.
#[derive(Debug)]
pub enum UninstallOutcome {
  Removed,
  Failed(ExtrasError),
}
