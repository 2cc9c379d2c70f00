//! Implementation of the `wifi uninstall-extras` command.
//!
//! Removes the extras declared in the registry. Individual failures are
//! reported but never fail the command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use wifi_lib::extras::{ExtrasError, UninstallOutcome, UninstallRecord, uninstall};

use super::Selection;
use crate::output::{OutputFormat, error_reason, print_error, print_info, print_json, print_success, print_warning};

#[derive(Serialize)]
struct RecordView<'a> {
  target: &'a Path,
  outcome: &'static str,
  reason: Option<String>,
}

impl<'a> From<&'a UninstallRecord> for RecordView<'a> {
  fn from(record: &'a UninstallRecord) -> Self {
    let (outcome, reason) = match &record.outcome {
      UninstallOutcome::Removed => ("removed", None),
      UninstallOutcome::Failed(err) => ("failed", Some(err.to_string())),
    };
    Self {
      target: &record.target,
      outcome,
      reason,
    }
  }
}

/// Execute the uninstall-extras command.
///
/// Attempts to remove every declared extra and prints one line per entry.
pub fn cmd_uninstall_extras(registry: Option<PathBuf>, format: OutputFormat) -> Result<()> {
  let selection = Selection::load(registry)?;

  let report = uninstall(&selection.registry);

  if format.is_json() {
    let views: Vec<RecordView> = report.records.iter().map(RecordView::from).collect();
    return print_json(&views);
  }

  for record in &report.records {
    print_record(record);
  }

  print_info(&format!(
    "Extras uninstalled: {} removed, {} failed",
    report.removed(),
    report.failed()
  ));

  Ok(())
}

fn print_record(record: &UninstallRecord) {
  match &record.outcome {
    UninstallOutcome::Removed => print_success(&format!("Removed {}", record.target.display())),
    UninstallOutcome::Failed(err @ ExtrasError::Malformed(_)) => {
      print_warning(&format!(
        "Can't parse entry for target {}, skipping it: {}",
        record.target.display(),
        err
      ));
    }
    UninstallOutcome::Failed(err) => {
      let directory = record.target.parent().unwrap_or(&record.target);
      print_error(&format!(
        "Error while deleting {} from {} ({}), please remove manually",
        record.filename.as_deref().unwrap_or_default(),
        directory.display(),
        error_reason(err)
      ));
    }
  }
}
