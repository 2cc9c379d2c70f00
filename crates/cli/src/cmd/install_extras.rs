//! Implementation of the `wifi install-extras` command.
//!
//! Copies the extras declared in the registry into their target directories.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use serde::Serialize;

use wifi_lib::extras::{InstallOptions, InstallOutcome, InstallRecord, SkipReason, install};

use super::Selection;
use crate::output::{
  OutputFormat, error_reason, format_mode, print_error, print_info, print_json, print_success, print_warning,
};

#[derive(Serialize)]
struct RecordView<'a> {
  target: &'a Path,
  source: Option<&'a Path>,
  outcome: &'static str,
  mode: Option<String>,
  reason: Option<String>,
}

impl<'a> From<&'a InstallRecord> for RecordView<'a> {
  fn from(record: &'a InstallRecord) -> Self {
    let (outcome, mode, reason) = match &record.outcome {
      InstallOutcome::Copied { mode } => ("copied", mode.map(|m| format_mode(Some(m))), None),
      InstallOutcome::Skipped(reason) => ("skipped", None, Some(reason.to_string())),
      InstallOutcome::Failed(err) => ("failed", None, Some(err.to_string())),
    };
    Self {
      target: &record.target,
      source: record.source.as_deref(),
      outcome,
      mode,
      reason,
    }
  }
}

/// Execute the install-extras command.
///
/// Copies each declared extra, skipping existing destinations unless `force`
/// is set. Fails with a non-zero exit on the first entry that cannot be
/// installed; nothing after it is attempted.
pub fn cmd_install_extras(
  registry: Option<PathBuf>,
  source_root: Option<PathBuf>,
  force: bool,
  format: OutputFormat,
) -> Result<()> {
  let selection = Selection::load(registry)?;
  let options = InstallOptions {
    force,
    source_root: selection.source_root(source_root.as_deref())?,
  };

  let report = install(&selection.registry, &options);

  if format.is_json() {
    let views: Vec<RecordView> = report.records.iter().map(RecordView::from).collect();
    print_json(&views)?;
  } else {
    for record in &report.records {
      print_record(record);
    }
  }

  if let Some(failed) = report.failure() {
    bail!("Installing extras aborted at {}", failed.target.display());
  }

  if !format.is_json() {
    print_info(&format!(
      "Extras installed: {} copied, {} skipped",
      report.copied(),
      report.skipped()
    ));
  }

  Ok(())
}

fn print_record(record: &InstallRecord) {
  let target = record.target.display();
  let source = record
    .source
    .as_deref()
    .map(|p| p.display().to_string())
    .unwrap_or_default();

  match &record.outcome {
    InstallOutcome::Copied { mode: Some(mode) } => {
      print_success(&format!("Copied {} to {} and changed mode to {:o}", source, target, mode.bits()));
    }
    InstallOutcome::Copied { mode: None } => {
      print_success(&format!("Copied {} to {}", source, target));
    }
    InstallOutcome::Skipped(SkipReason::AlreadyExists) => {
      print_warning(&format!(
        "Skipping copying {} to {} as it already exists, use --force to overwrite",
        source, target
      ));
    }
    InstallOutcome::Skipped(SkipReason::Unparseable(err)) => {
      print_warning(&format!("Can't parse entry for target {}, skipping it: {}", target, err));
    }
    InstallOutcome::Failed(err) => {
      print_error(&format!(
        "Error while copying {} to {} ({}), aborting",
        source,
        target,
        error_reason(err)
      ));
    }
  }
}
