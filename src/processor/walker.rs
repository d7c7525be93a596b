//! # Walker Module
//!
//! This module enumerates the regular files under a root path, pruning
//! directories and omitting files whose base names match the configured skip
//! patterns.

use std::fs::Permissions;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use regex::Regex;
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

use crate::config::ConfigError;
use crate::output;

/// A file discovered by the walker, handed to exactly one processing task.
#[derive(Debug, Clone)]
pub struct FileDescriptor {
  /// Path of the file as reached from its root
  pub path: PathBuf,
  /// Permission bits observed at discovery, restored after a rewrite
  pub permissions: Permissions,
}

impl FileDescriptor {
  /// Builds a descriptor for a single file by reading its metadata.
  pub fn from_path(path: impl Into<PathBuf>) -> std::io::Result<Self> {
    let path = path.into();
    let permissions = std::fs::metadata(&path)?.permissions();
    Ok(Self { path, permissions })
  }
}

/// Compiled skip rules.
///
/// Directory patterns are matched against directory base names and prune the
/// whole subtree; file patterns are matched against file base names. Matching
/// is unanchored: a pattern matches if it is found anywhere in the name.
#[derive(Debug, Default, Clone)]
pub struct SkipPatterns {
  dirs: Vec<Regex>,
  files: Vec<Regex>,
}

impl SkipPatterns {
  /// Compiles the directory and file patterns.
  ///
  /// # Errors
  ///
  /// Returns [`ConfigError::InvalidPattern`] for the first pattern that is not
  /// a valid regular expression.
  pub fn new(dirs: &[String], files: &[String]) -> Result<Self, ConfigError> {
    Ok(Self {
      dirs: compile_patterns(dirs)?,
      files: compile_patterns(files)?,
    })
  }

  pub fn skips_dir(&self, name: &str) -> bool {
    self.dirs.iter().any(|pattern| pattern.is_match(name))
  }

  pub fn skips_file(&self, name: &str) -> bool {
    self.files.iter().any(|pattern| pattern.is_match(name))
  }
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>, ConfigError> {
  patterns
    .iter()
    .map(|pattern| {
      Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
        pattern: pattern.clone(),
        source,
      })
    })
    .collect()
}

/// Recursive file enumerator.
///
/// Unreadable entries are reported on stderr and skipped; they never stop the
/// walk.
pub struct Walker {
  skip_patterns: Arc<SkipPatterns>,
  traversal_errors: AtomicUsize,
}

impl Walker {
  pub const fn new(skip_patterns: Arc<SkipPatterns>) -> Self {
    Self {
      skip_patterns,
      traversal_errors: AtomicUsize::new(0),
    }
  }

  /// Number of entries skipped so far because they could not be read.
  pub fn traversal_errors(&self) -> usize {
    self.traversal_errors.load(Ordering::Relaxed)
  }

  /// Lazily yields a descriptor for every regular file reachable from `root`.
  ///
  /// A root that is itself a file yields that file (subject to the file skip
  /// patterns). Symbolic links are not followed and are not yielded.
  pub fn walk<'a>(&'a self, root: &Path) -> impl Iterator<Item = FileDescriptor> + use<'a> {
    debug!("Walking: {}", root.display());
    let skip_patterns = Arc::clone(&self.skip_patterns);

    WalkDir::new(root)
      .into_iter()
      .filter_entry(move |entry| {
        let pruned = entry.file_type().is_dir() && skip_patterns.skips_dir(&entry.file_name().to_string_lossy());
        if pruned {
          trace!("Skipping: {} (matches skip-dirs pattern)", entry.path().display());
        }
        !pruned
      })
      .filter_map(move |entry| match entry {
        Ok(entry) => self.descriptor_for(entry),
        Err(err) => {
          self.report_traversal_error(&err);
          None
        }
      })
  }

  fn descriptor_for(&self, entry: DirEntry) -> Option<FileDescriptor> {
    let file_type = entry.file_type();
    if file_type.is_dir() {
      return None;
    }
    if !file_type.is_file() {
      trace!("Skipping: {} (not a regular file)", entry.path().display());
      return None;
    }

    if self.skip_patterns.skips_file(&entry.file_name().to_string_lossy()) {
      trace!("Skipping: {} (matches skip-files pattern)", entry.path().display());
      return None;
    }

    match entry.metadata() {
      Ok(metadata) => Some(FileDescriptor {
        permissions: metadata.permissions(),
        path: entry.into_path(),
      }),
      Err(err) => {
        self.report_traversal_error(&err);
        None
      }
    }
  }

  fn report_traversal_error(&self, err: &walkdir::Error) {
    self.traversal_errors.fetch_add(1, Ordering::Relaxed);
    debug!("Traversal error at depth {}: {:?}", err.depth(), err);

    let path = err.path().unwrap_or_else(|| Path::new(""));
    match err.io_error() {
      Some(io_err) => output::print_traversal_error(path, io_err),
      None => output::print_traversal_error(path, err),
    }
  }
}
