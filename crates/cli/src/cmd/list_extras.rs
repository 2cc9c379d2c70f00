//! Implementation of the `wifi list-extras` command.
//!
//! Shows every registry entry with its resolved source and destination,
//! without modifying the filesystem.

use std::path::{Path, PathBuf};

use anyhow::Result;
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

use wifi_lib::config::RegistrySource;
use wifi_lib::extras::{EntryStatus, status};

use super::Selection;
use crate::output::{OutputFormat, format_mode, print_json, print_stat, print_warning, symbols};

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum EntryView<'a> {
  Resolved {
    source: &'a Path,
    target: &'a Path,
    mode: Option<String>,
    source_present: bool,
    installed: bool,
  },
  Unparseable {
    directory: &'a Path,
    reason: String,
  },
}

impl<'a> From<&'a EntryStatus> for EntryView<'a> {
  fn from(status: &'a EntryStatus) -> Self {
    match status {
      EntryStatus::Resolved {
        entry,
        source,
        target,
        source_present,
        installed,
      } => EntryView::Resolved {
        source,
        target,
        mode: entry.mode.map(|m| format_mode(Some(m))),
        source_present: *source_present,
        installed: *installed,
      },
      EntryStatus::Unparseable { directory, error } => EntryView::Unparseable {
        directory,
        reason: error.to_string(),
      },
    }
  }
}

/// Execute the list-extras command.
pub fn cmd_list_extras(registry: Option<PathBuf>, source_root: Option<PathBuf>, format: OutputFormat) -> Result<()> {
  let selection = Selection::load(registry)?;
  let source_root = selection.source_root(source_root.as_deref())?;

  let statuses = status(&selection.registry, &source_root);

  if format.is_json() {
    let views: Vec<EntryView> = statuses.iter().map(EntryView::from).collect();
    return print_json(&views);
  }

  let origin = match &selection.source {
    RegistrySource::Builtin => "built-in".to_string(),
    RegistrySource::File(path) => path.display().to_string(),
  };
  print_stat("Registry", &origin);
  print_stat("Source root", &source_root.display().to_string());
  println!();

  for status in &statuses {
    match status {
      EntryStatus::Resolved {
        entry,
        source,
        target,
        source_present,
        installed,
      } => {
        let state = if *installed { "installed" } else { "not installed" };
        println!(
          "{} {} {} {} {}",
          symbols::INFO.if_supports_color(Stream::Stdout, |s| s.blue()),
          source.display(),
          symbols::ARROW,
          target.display(),
          format!("(mode {}, {})", format_mode(entry.mode), state).if_supports_color(Stream::Stdout, |s| s.dimmed())
        );
        if !source_present {
          print_warning(&format!("Source {} does not exist", source.display()));
        }
      }
      EntryStatus::Unparseable { directory, error } => {
        print_warning(&format!("Can't parse entry for target {}: {}", directory.display(), error));
      }
    }
  }

  Ok(())
}
