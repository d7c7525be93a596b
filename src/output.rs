//! # Output Module
//!
//! This module centralizes all user-facing output for the addlicense tool.
//!
//! stdout is kept predictable for scripting: in check mode it carries exactly
//! one line per file missing a license header, and in verbose mutate mode one
//! `"<path> added license"` line per modified file. Errors, hints and the
//! final summary go to stderr.

use std::fmt::Display;
use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::logging::{is_quiet, is_verbose};
use crate::report::ProcessingSummary;

/// Symbols used in output
pub mod symbols {
  /// Success/has license
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Missing license/failure
  pub const FAILURE: &str = "\u{2717}"; // ✗
}

/// Print a path that is missing a license header.
///
/// Printed even in quiet mode.
pub fn print_missing_file(path: &Path) {
  println!("{}", path.display());
}

/// Print a file that had a license added. Only shown in verbose mode.
pub fn print_added_file(path: &Path) {
  if is_verbose() {
    println!("{} added license", path.display());
  }
}

/// Print a per-file error as `"<path>: <error>"`.
pub fn print_file_error(path: &Path, error: impl Display) {
  eprintln!(
    "{}: {}",
    path.display(),
    error.if_supports_color(Stream::Stderr, |e| e.red())
  );
}

/// Print a directory entry that could not be read as `"<path> error: <error>"`.
pub fn print_traversal_error(path: &Path, error: impl Display) {
  eprintln!("{} error: {}", path.display(), error);
}

/// Print the final summary line.
///
/// Format (check mode): `"✗ 2 of 10 files missing license headers"`
/// Format (mutate mode): `"✓ Added license to 3 of 10 files"`
///
/// File counts exclude unsupported files. Unsupported and already-licensed
/// counts are appended in verbose mode, along with timing.
pub fn print_summary(summary: &ProcessingSummary, check_only: bool) {
  if is_quiet() {
    return;
  }

  let scanned = files_word(summary.total_files.saturating_sub(summary.unsupported));
  let mut line = if check_only && summary.missing > 0 {
    format!(
      "{} {} of {} missing license headers",
      symbols::FAILURE.if_supports_color(Stream::Stderr, |s| s.red()),
      summary
        .missing
        .if_supports_color(Stream::Stderr, |s| s.red()),
      scanned
    )
  } else if check_only {
    format!(
      "{} All {} have license headers",
      symbols::SUCCESS.if_supports_color(Stream::Stderr, |s| s.green()),
      scanned
    )
  } else {
    format!(
      "{} Added license to {} of {}",
      symbols::SUCCESS.if_supports_color(Stream::Stderr, |s| s.green()),
      summary
        .licenses_added
        .if_supports_color(Stream::Stderr, |s| s.cyan()),
      scanned
    )
  };

  if summary.failed > 0 {
    line.push_str(&format!(
      ", {} failed",
      summary.failed.if_supports_color(Stream::Stderr, |s| s.red())
    ));
  }
  if summary.traversal_errors > 0 {
    line.push_str(&format!(", {} unreadable", summary.traversal_errors));
  }

  if is_verbose() {
    line.push_str(&format!(
      " ({} already licensed, {} unsupported, {:.2}s)",
      summary.already_licensed, summary.unsupported, summary.processing_time_secs
    ));
  }

  eprintln!("{}", line);
}

/// Print a hint for the user about what to do next.
pub fn print_hint(message: &str) {
  if is_quiet() {
    return;
  }

  eprintln!("{}", message.if_supports_color(Stream::Stderr, |s| s.yellow()));
}

fn files_word(count: usize) -> String {
  format!("{} {}", count, if count == 1 { "file" } else { "files" })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_files_word() {
    assert_eq!(files_word(0), "0 files");
    assert_eq!(files_word(1), "1 file");
    assert_eq!(files_word(7), "7 files");
  }
}
