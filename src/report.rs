//! # Report Module
//!
//! This module defines the per-file outcome of a run, the aggregate verdict
//! that decides the exit status, and the optional JSON report.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;

/// Information about a processed file for reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
  /// Path to the file
  #[serde(serialize_with = "serialize_path")]
  pub path: PathBuf,
  /// What happened to the file
  #[serde(flatten)]
  pub action: FileAction,
}

impl FileReport {
  pub fn new(path: impl Into<PathBuf>, action: FileAction) -> Self {
    Self {
      path: path.into(),
      action,
    }
  }

  /// Whether this outcome contributes to the run's failure flag.
  pub const fn is_failure(&self) -> bool {
    matches!(self.action, FileAction::Missing | FileAction::Failed(_))
  }
}

/// Possible outcomes for a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "action", content = "reason")]
pub enum FileAction {
  /// License header was added to the file
  Added,
  /// File already had a license marker and was left untouched
  AlreadyLicensed,
  /// Check mode only: the file lacks a license header
  Missing,
  /// No comment style is known for the file's extension
  Unsupported,
  /// Reading, rendering or writing failed
  Failed(String),
}

fn serialize_path<S>(path: &Path, serializer: S) -> Result<S::Ok, S::Error>
where
  S: serde::Serializer,
{
  serializer.serialize_str(&path.to_string_lossy())
}

/// Summary of the processing results
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProcessingSummary {
  /// Total number of files handed to the processor
  pub total_files: usize,
  /// Number of license headers added
  pub licenses_added: usize,
  /// Number of files that already had a license
  pub already_licensed: usize,
  /// Number of files missing a license (check mode)
  pub missing: usize,
  /// Number of files with an unknown comment style
  pub unsupported: usize,
  /// Number of files that failed
  pub failed: usize,
  /// Number of directory entries skipped due to traversal errors
  pub traversal_errors: usize,
  /// Total processing time in seconds
  #[serde(rename = "processing_time_seconds")]
  pub processing_time_secs: f64,
}

impl ProcessingSummary {
  /// Create a ProcessingSummary from a collection of FileReports
  pub fn from_reports(files: &[FileReport], traversal_errors: usize, processing_time: Duration) -> Self {
    let mut summary = Self {
      traversal_errors,
      processing_time_secs: processing_time.as_secs_f64(),
      ..Self::default()
    };
    for file in files {
      summary.record(&file.action);
    }
    summary
  }

  /// Counts one file outcome.
  pub fn record(&mut self, action: &FileAction) {
    self.total_files += 1;
    match action {
      FileAction::Added => self.licenses_added += 1,
      FileAction::AlreadyLicensed => self.already_licensed += 1,
      FileAction::Missing => self.missing += 1,
      FileAction::Unsupported => self.unsupported += 1,
      FileAction::Failed(_) => self.failed += 1,
    }
  }

  /// Adds the per-file counts of `other` to this summary.
  pub const fn absorb(&mut self, other: &Self) {
    self.total_files += other.total_files;
    self.licenses_added += other.licenses_added;
    self.already_licensed += other.already_licensed;
    self.missing += other.missing;
    self.unsupported += other.unsupported;
    self.failed += other.failed;
  }
}

/// Aggregate result of a whole run.
#[derive(Debug, Clone)]
pub struct PipelineVerdict {
  /// Whether any file failed, any worker panicked, or (check mode) any file
  /// was missing a header
  pub failed: bool,
  /// Per-file outcomes sorted by path; empty unless the processor was asked
  /// to keep them
  pub reports: Vec<FileReport>,
  /// Per-action counts over every processed file
  pub counts: ProcessingSummary,
  /// Directory entries skipped because they could not be read
  pub traversal_errors: usize,
  /// Wall-clock duration of the run
  pub elapsed: Duration,
}

impl PipelineVerdict {
  pub const fn exit_code(&self) -> i32 {
    if self.failed { 1 } else { 0 }
  }

  pub fn summary(&self) -> ProcessingSummary {
    ProcessingSummary {
      traversal_errors: self.traversal_errors,
      processing_time_secs: self.elapsed.as_secs_f64(),
      ..self.counts.clone()
    }
  }

  /// Reports with the given action, in path order.
  pub fn files_with(&self, action: &FileAction) -> impl Iterator<Item = &FileReport> {
    self.reports.iter().filter(move |r| &r.action == action)
  }
}

#[derive(Serialize)]
struct JsonReport<'a> {
  generated_at: String,
  summary: ProcessingSummary,
  files: &'a [FileReport],
}

/// Renders the verdict as a pretty-printed JSON document.
pub fn render_json(verdict: &PipelineVerdict) -> Result<String> {
  let report = JsonReport {
    generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    summary: verdict.summary(),
    files: &verdict.reports,
  };

  serde_json::to_string_pretty(&report).context("Failed to serialize report")
}

/// Writes the JSON report to `output_path`.
pub fn write_json_report(verdict: &PipelineVerdict, output_path: &Path) -> Result<()> {
  let content = render_json(verdict)?;
  std::fs::write(output_path, content)
    .with_context(|| format!("Failed to write report to {}", output_path.display()))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn verdict() -> PipelineVerdict {
    let reports = vec![
      FileReport::new("a.go", FileAction::Added),
      FileReport::new("b.go", FileAction::AlreadyLicensed),
      FileReport::new("c.bin", FileAction::Unsupported),
      FileReport::new("d.go", FileAction::Failed("permission denied".to_string())),
    ];
    PipelineVerdict {
      failed: true,
      counts: ProcessingSummary::from_reports(&reports, 0, Duration::ZERO),
      reports,
      traversal_errors: 2,
      elapsed: Duration::from_millis(1500),
    }
  }

  #[test]
  fn test_summary_counts_each_action() {
    let summary = verdict().summary();

    assert_eq!(summary.total_files, 4);
    assert_eq!(summary.licenses_added, 1);
    assert_eq!(summary.already_licensed, 1);
    assert_eq!(summary.missing, 0);
    assert_eq!(summary.unsupported, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.traversal_errors, 2);
    assert!((summary.processing_time_secs - 1.5).abs() < f64::EPSILON);
  }

  #[test]
  fn test_absorb_merges_counts_only() {
    let mut total = ProcessingSummary::default();
    let mut a = ProcessingSummary::default();
    a.record(&FileAction::Added);
    a.record(&FileAction::Missing);
    let mut b = ProcessingSummary {
      traversal_errors: 9,
      ..ProcessingSummary::default()
    };
    b.record(&FileAction::Added);

    total.absorb(&a);
    total.absorb(&b);

    assert_eq!(total.total_files, 3);
    assert_eq!(total.licenses_added, 2);
    assert_eq!(total.missing, 1);
    assert_eq!(total.traversal_errors, 0);
  }

  #[test]
  fn test_failure_classification() {
    assert!(FileReport::new("x", FileAction::Missing).is_failure());
    assert!(FileReport::new("x", FileAction::Failed(String::new())).is_failure());
    assert!(!FileReport::new("x", FileAction::Added).is_failure());
    assert!(!FileReport::new("x", FileAction::Unsupported).is_failure());
  }

  #[test]
  fn test_exit_code() {
    let mut v = verdict();
    assert_eq!(v.exit_code(), 1);
    v.failed = false;
    assert_eq!(v.exit_code(), 0);
  }

  #[test]
  fn test_render_json() {
    let json = render_json(&verdict()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["summary"]["licenses_added"], 1);
    assert_eq!(value["summary"]["failed"], 1);
    assert_eq!(value["files"][0]["path"], "a.go");
    assert_eq!(value["files"][0]["action"], "added");
    assert_eq!(value["files"][1]["action"], "already_licensed");
    assert_eq!(value["files"][3]["action"], "failed");
    assert_eq!(value["files"][3]["reason"], "permission denied");
  }

  #[test]
  fn test_write_json_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");

    write_json_report(&verdict(), &path).unwrap();
    assert!(std::fs::read_to_string(&path).unwrap().contains("\"summary\""));
  }
}
