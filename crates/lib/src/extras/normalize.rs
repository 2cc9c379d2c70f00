//! Declaration normalization.
//!
//! Turns an [`ExtraDeclaration`] into a [`NormalizedEntry`]: the source path,
//! the file name to create in the target directory, and the optional mode.
//! Registry files go through [`ExtraDeclaration::from_shorthand`] first, which
//! accepts the compact JSON forms:
//!
//! ```text
//! "extras/wifi-completion.bash"                              bare path
//! ["extras/wifi-completion.bash"]                            bare path
//! ["extras/wifi-completion.bash", "0644"]                    path + mode
//! ["extras/wifi-completion.bash", "wifi-completion", "0644"] path + filename + mode
//! ```
//!
//! A mode written as a JSON integer is taken at its numeric value, which JSON
//! always spells in decimal: `420` is `0o644`, while `644` is `0o1204`. Octal
//! strings (`"0644"`, `"644"`, `"0o644"`) avoid the ambiguity.

use std::path::{Component, Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use super::types::{Declaration, ExtraDeclaration, MalformedDeclaration, Mode, NormalizedEntry};

impl ExtraDeclaration {
  /// Resolve the declaration into its canonical triple.
  ///
  /// Fails when the source path is empty, when no file name can be derived
  /// from it (`/`, `..`), or when an explicit file name is not a single path
  /// component.
  pub fn normalize(&self) -> Result<NormalizedEntry, MalformedDeclaration> {
    let source = self.source();
    if source.as_os_str().is_empty() {
      return Err(MalformedDeclaration::new(self.to_string(), "source path is empty"));
    }

    let (filename, mode) = match self {
      ExtraDeclaration::BarePath(path) => (self.derive_filename(path)?, None),
      ExtraDeclaration::PathWithMode(path, mode) => (self.derive_filename(path)?, *mode),
      ExtraDeclaration::PathFilenameMode(_, filename, mode) => {
        if !is_single_component(filename) {
          return Err(MalformedDeclaration::new(
            self.to_string(),
            format!("destination filename {:?} must be a single path component", filename),
          ));
        }
        (filename.clone(), *mode)
      }
    };

    debug!(source = %source.display(), filename = %filename, mode = ?mode, "normalized declaration");

    Ok(NormalizedEntry {
      source: source.to_path_buf(),
      filename,
      mode,
    })
  }

  /// Build a declaration from its JSON shorthand.
  ///
  /// A string is a bare path. An array holds one, two or three elements as
  /// listed in the module docs. Modes are integers or octal strings; `null`
  /// leaves the mode unset. Anything else is malformed.
  pub fn from_shorthand(value: &Value) -> Result<Self, MalformedDeclaration> {
    let malformed = |reason: String| MalformedDeclaration::new(value.to_string(), reason);

    match value {
      Value::String(path) => Ok(ExtraDeclaration::BarePath(PathBuf::from(path))),
      Value::Array(items) => match items.as_slice() {
        [path] => Ok(ExtraDeclaration::BarePath(shorthand_path(path).map_err(malformed)?)),
        [path, mode] => Ok(ExtraDeclaration::PathWithMode(
          shorthand_path(path).map_err(malformed)?,
          shorthand_mode(mode).map_err(malformed)?,
        )),
        [path, filename, mode] => {
          let filename = match filename {
            Value::String(name) => name.clone(),
            other => return Err(malformed(format!("filename must be a string, found {}", other))),
          };
          Ok(ExtraDeclaration::PathFilenameMode(
            shorthand_path(path).map_err(malformed)?,
            filename,
            shorthand_mode(mode).map_err(malformed)?,
          ))
        }
        [] => Err(malformed("empty sequence".to_string())),
        _ => Err(malformed(format!("expected 1 to 3 elements, found {}", items.len()))),
      },
      _ => Err(malformed("expected a path string or a sequence".to_string())),
    }
  }

  fn derive_filename(&self, path: &Path) -> Result<String, MalformedDeclaration> {
    match path.components().next_back() {
      Some(Component::Normal(name)) => name
        .to_str()
        .map(str::to_owned)
        .ok_or_else(|| MalformedDeclaration::new(self.to_string(), "file name is not valid UTF-8")),
      _ => Err(MalformedDeclaration::new(
        self.to_string(),
        "cannot derive a file name from the source path",
      )),
    }
  }
}

impl Declaration {
  /// Normalize a registry entry. Unparseable entries return the error
  /// captured when the registry was loaded.
  pub fn normalize(&self) -> Result<NormalizedEntry, MalformedDeclaration> {
    match self {
      Declaration::Extra(decl) => decl.normalize(),
      Declaration::Unparseable(err) => Err(err.clone()),
    }
  }
}

fn is_single_component(name: &str) -> bool {
  let mut components = Path::new(name).components();
  matches!(
    (components.next(), components.next()),
    (Some(Component::Normal(part)), None) if part == name
  )
}

fn shorthand_path(value: &Value) -> Result<PathBuf, String> {
  match value {
    Value::String(path) => Ok(PathBuf::from(path)),
    other => Err(format!("source path must be a string, found {}", other)),
  }
}

fn shorthand_mode(value: &Value) -> Result<Option<Mode>, String> {
  match value {
    Value::Null => Ok(None),
    Value::Number(n) => n
      .as_u64()
      .and_then(|bits| u32::try_from(bits).ok())
      .and_then(Mode::new)
      .map(Some)
      .ok_or_else(|| format!("invalid mode {}", n)),
    Value::String(s) => Mode::parse_octal(s)
      .map(Some)
      .ok_or_else(|| format!("invalid octal mode {:?}", s)),
    other => Err(format!("mode must be a number or octal string, found {}", other)),
  }
}
