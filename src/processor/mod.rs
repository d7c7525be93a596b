//! # Processor Module
//!
//! This module contains the core functionality for processing files and
//! directories, adding license headers, and checking for existing licenses.
//!
//! The module is organized into several submodules:
//! - [`walker`] - Directory traversal and skip patterns
//! - [`file_io`] - File reading and writing operations
//! - [`content_transformer`] - Special first lines and header insertion
//!
//! The [`Processor`] struct is the main entry point. It walks every root on a
//! blocking thread, feeding a bounded channel that a fixed pool of async
//! workers drains. Every file is handled by exactly one worker, and the
//! verdict is computed only after all workers have finished.

pub mod content_transformer;
pub mod file_io;
pub mod walker;

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use anyhow::Result;
pub use content_transformer::{insert_header, special_first_line};
pub use file_io::FileIO;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinSet;
use tracing::{debug, error, trace};
pub use walker::{FileDescriptor, SkipPatterns, Walker};

use crate::comment_style;
use crate::config::{ConfigError, Settings};
use crate::license_detection::{LicenseDetector, SimpleLicenseDetector};
use crate::output;
use crate::report::{FileAction, FileReport, PipelineVerdict, ProcessingSummary};
use crate::templates::LicenseRenderer;
use crate::verbose_log;

/// Number of discovered files buffered between the walker and the workers.
pub const QUEUE_CAPACITY: usize = 1000;

/// Configuration for creating a Processor instance.
pub struct ProcessorConfig {
  pub renderer: LicenseRenderer,
  pub check_only: bool,
  pub skip_patterns: SkipPatterns,
  pub jobs: usize,
  pub license_detector: Option<Box<dyn LicenseDetector>>,
  /// Keep every per-file report in the verdict. When false only the counts
  /// are kept, so memory stays flat on large trees.
  pub keep_reports: bool,
}

impl ProcessorConfig {
  /// Creates a new ProcessorConfig with required fields and sensible defaults.
  ///
  /// Use struct update syntax to override specific fields:
  /// ```ignore
  /// ProcessorConfig {
  ///     check_only: true,
  ///     ..ProcessorConfig::new(renderer)
  /// }
  /// ```
  pub fn new(renderer: LicenseRenderer) -> Self {
    Self {
      renderer,
      check_only: false,
      skip_patterns: SkipPatterns::default(),
      jobs: crate::config::default_jobs(),
      license_detector: None,
      keep_reports: true,
    }
  }

  /// Builds the processor configuration from resolved settings.
  ///
  /// Loads the license template and compiles the skip patterns, so every
  /// configuration error surfaces here before any file is touched.
  pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
    let template = settings.load_template()?;
    let skip_patterns = SkipPatterns::new(&settings.skip_dirs, &settings.skip_files)?;

    Ok(Self {
      check_only: settings.check_only,
      skip_patterns,
      jobs: settings.jobs,
      ..Self::new(LicenseRenderer::new(template, settings.license_data()))
    })
  }
}

/// Read-only state shared by every worker.
struct FileProcessor {
  renderer: LicenseRenderer,
  license_detector: Box<dyn LicenseDetector>,
  check_only: bool,
}

impl FileProcessor {
  async fn process(&self, file: &FileDescriptor) -> FileReport {
    let path = &file.path;
    trace!("Processing file: {}", path.display());

    let action = match self.decide(file).await {
      Ok(action) => action,
      Err(err) => {
        let reason = format!("{:#}", err);
        output::print_file_error(path, &reason);
        FileAction::Failed(reason)
      }
    };

    match action {
      FileAction::Missing => output::print_missing_file(path),
      FileAction::Added => output::print_added_file(path),
      _ => {}
    }

    FileReport::new(path.clone(), action)
  }

  async fn decide(&self, file: &FileDescriptor) -> Result<FileAction> {
    let Some(style) = comment_style::resolve(&file.path) else {
      trace!("Skipping: {} (no comment style)", file.path.display());
      return Ok(FileAction::Unsupported);
    };

    let header = self.renderer.render_header(&style)?;
    let content = FileIO::read_file(&file.path).await?;

    if self.license_detector.has_license(&content) {
      trace!("Already licensed: {}", file.path.display());
      return Ok(FileAction::AlreadyLicensed);
    }

    if self.check_only {
      return Ok(FileAction::Missing);
    }

    let updated = insert_header(&header, &content);
    FileIO::write_file(&file.path, &updated, &file.permissions).await?;
    Ok(FileAction::Added)
  }
}

/// Processor for handling license operations on files.
///
/// The `Processor` is responsible for:
/// - Walking every root, honoring skip patterns
/// - Dispatching discovered files to a pool of workers
/// - Adding license headers, or reporting missing ones in check mode
/// - Collecting the per-file reports into a [`PipelineVerdict`]
pub struct Processor {
  files: Arc<FileProcessor>,
  skip_patterns: Arc<SkipPatterns>,
  jobs: usize,
  keep_reports: bool,
}

impl Processor {
  /// Creates a new processor with the specified configuration.
  pub fn new(config: ProcessorConfig) -> Self {
    Self {
      files: Arc::new(FileProcessor {
        renderer: config.renderer,
        license_detector: config
          .license_detector
          .unwrap_or_else(|| Box::new(SimpleLicenseDetector::new())),
        check_only: config.check_only,
      }),
      skip_patterns: Arc::new(config.skip_patterns),
      jobs: config.jobs.max(1),
      keep_reports: config.keep_reports,
    }
  }

  /// Processes a single file and returns its outcome.
  ///
  /// Skip patterns are not consulted; they apply only during traversal.
  pub async fn process_file(&self, file: &FileDescriptor) -> FileReport {
    self.files.process(file).await
  }

  /// Walks every root in order and processes each discovered file.
  ///
  /// Roots are walked sequentially on one blocking thread; files are processed
  /// concurrently by `jobs` workers. Each file runs in its own task, so a
  /// failing or panicking file never stops the others.
  ///
  /// # Returns
  ///
  /// The verdict, with reports sorted by path. `failed` is set if any file
  /// failed, any file lacked a header in check mode, or any task panicked.
  pub async fn process(&self, patterns: &[String]) -> Result<PipelineVerdict> {
    let started = Instant::now();
    let failed = Arc::new(AtomicBool::new(false));
    let (tx, rx) = mpsc::channel::<FileDescriptor>(QUEUE_CAPACITY);
    let rx = Arc::new(Mutex::new(rx));

    debug!("Starting {} workers", self.jobs);
    let mut workers = JoinSet::new();
    for worker_id in 0..self.jobs {
      let rx = Arc::clone(&rx);
      let files = Arc::clone(&self.files);
      let failed = Arc::clone(&failed);
      let keep_reports = self.keep_reports;

      workers.spawn(async move {
        let mut counts = ProcessingSummary::default();
        let mut reports = Vec::new();
        loop {
          // Holding the lock across recv hands each descriptor to one worker
          let next = rx.lock().await.recv().await;
          let Some(file) = next else {
            break;
          };

          let report = process_isolated(Arc::clone(&files), file).await;
          if report.is_failure() {
            failed.store(true, Ordering::Relaxed);
          }
          counts.record(&report.action);
          if keep_reports {
            reports.push(report);
          }
        }
        trace!("Worker {} finished after {} files", worker_id, counts.total_files);
        (counts, reports)
      });
    }
    drop(rx);

    let walker = Walker::new(Arc::clone(&self.skip_patterns));
    let roots: Vec<PathBuf> = patterns.iter().map(PathBuf::from).collect();
    let producer = tokio::task::spawn_blocking(move || {
      for root in &roots {
        verbose_log!("Walking: {}", root.display());
        for file in walker.walk(root) {
          if tx.blocking_send(file).is_err() {
            error!("All workers exited before the walk finished");
            return walker.traversal_errors();
          }
        }
      }
      walker.traversal_errors()
    });

    let traversal_errors = match producer.await {
      Ok(count) => count,
      Err(err) => {
        error!("Walker task failed: {}", err);
        failed.store(true, Ordering::Relaxed);
        0
      }
    };

    let mut counts = ProcessingSummary::default();
    let mut reports = Vec::new();
    while let Some(joined) = workers.join_next().await {
      match joined {
        Ok((batch_counts, mut batch)) => {
          counts.absorb(&batch_counts);
          reports.append(&mut batch);
        }
        Err(err) => {
          error!("Worker task failed: {}", err);
          failed.store(true, Ordering::Relaxed);
        }
      }
    }
    reports.sort_by(|a, b| a.path.cmp(&b.path));

    let verdict = PipelineVerdict {
      failed: failed.load(Ordering::Relaxed),
      reports,
      counts,
      traversal_errors,
      elapsed: started.elapsed(),
    };
    debug!(
      "Processed {} files in {:.2}s (failed: {})",
      verdict.counts.total_files,
      verdict.elapsed.as_secs_f64(),
      verdict.failed
    );

    Ok(verdict)
  }
}

/// Runs one file in its own task. A panic is turned into a failed report
/// instead of taking the calling worker down with it.
async fn process_isolated(files: Arc<FileProcessor>, file: FileDescriptor) -> FileReport {
  let path = file.path.clone();
  match tokio::spawn(async move { files.process(&file).await }).await {
    Ok(report) => report,
    Err(err) => {
      error!("Task for {} failed: {}", path.display(), err);
      output::print_file_error(&path, "panicked");
      FileReport::new(path, FileAction::Failed("panicked".to_string()))
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::templates::{LicenseData, LicenseKind, LicenseTemplate};

  fn renderer() -> LicenseRenderer {
    let template = LicenseTemplate::builtin(LicenseKind::Mit).unwrap();
    LicenseRenderer::new(
      template,
      LicenseData {
        year: "2024".to_string(),
        holder: "Acme Inc".to_string(),
      },
    )
  }

  /// Detector that never finds a license.
  struct NeverLicensed;

  impl LicenseDetector for NeverLicensed {
    fn has_license(&self, _content: &[u8]) -> bool {
      false
    }
  }

  #[tokio::test]
  async fn test_unsupported_extension_is_not_read() {
    let processor = Processor::new(ProcessorConfig::new(renderer()));
    // The file does not exist: reaching the read would be a failure
    let file = FileDescriptor {
      path: PathBuf::from("/nonexistent/blob.bin"),
      permissions: std::fs::metadata(".").unwrap().permissions(),
    };

    let report = processor.process_file(&file).await;
    assert_eq!(report.action, FileAction::Unsupported);
  }

  #[tokio::test]
  async fn test_custom_detector_is_used() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.go");
    std::fs::write(&path, "// Copyright 2020 Someone\npackage a\n").unwrap();

    let processor = Processor::new(ProcessorConfig {
      license_detector: Some(Box::new(NeverLicensed)),
      check_only: true,
      ..ProcessorConfig::new(renderer())
    });

    let report = processor
      .process_file(&FileDescriptor::from_path(&path).unwrap())
      .await;
    assert_eq!(report.action, FileAction::Missing);
  }

  #[tokio::test]
  async fn test_read_failure_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let file = FileDescriptor {
      path: dir.path().join("gone.py"),
      permissions: std::fs::metadata(dir.path()).unwrap().permissions(),
    };
    let processor = Processor::new(ProcessorConfig::new(renderer()));

    let report = processor.process_file(&file).await;
    assert!(matches!(report.action, FileAction::Failed(ref reason) if reason.contains("gone.py")));
    assert!(report.is_failure());
  }

  #[tokio::test]
  async fn test_zero_jobs_still_runs_one_worker() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.rs"), "fn main() {}\n").unwrap();

    let processor = Processor::new(ProcessorConfig {
      jobs: 0,
      ..ProcessorConfig::new(renderer())
    });
    let verdict = processor
      .process(&[dir.path().to_string_lossy().to_string()])
      .await
      .unwrap();

    assert_eq!(verdict.reports.len(), 1);
    assert_eq!(verdict.reports[0].action, FileAction::Added);
  }

  #[tokio::test]
  async fn test_counts_without_keeping_reports() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.rs"), "fn main() {}\n").unwrap();
    std::fs::write(dir.path().join("b.rs"), "// Copyright 2020 Someone\n").unwrap();
    std::fs::write(dir.path().join("c.bin"), "blob").unwrap();

    let processor = Processor::new(ProcessorConfig {
      jobs: 2,
      keep_reports: false,
      ..ProcessorConfig::new(renderer())
    });
    let verdict = processor
      .process(&[dir.path().to_string_lossy().to_string()])
      .await
      .unwrap();

    assert!(verdict.reports.is_empty());
    let summary = verdict.summary();
    assert_eq!(summary.total_files, 3);
    assert_eq!(summary.licenses_added, 1);
    assert_eq!(summary.already_licensed, 1);
    assert_eq!(summary.unsupported, 1);
  }
}
