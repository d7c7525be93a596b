//! # License Detection Module
//!
//! This module contains the interfaces and implementations for license detection algorithms.
//! It allows for easily replacing the license detection algorithm without modifying the processor.

/// Number of leading bytes inspected for a license marker.
pub const LICENSE_CHECK_LIMIT: usize = 1000;

/// Substrings that count as an existing license header, matched
/// case-insensitively.
pub const LICENSE_MARKERS: [&[u8]; 2] = [b"copyright", b"mozilla public"];

/// Trait for license detectors.
///
/// Implementations of this trait are responsible for determining whether a file
/// already contains a license header based on its content.
pub trait LicenseDetector: Send + Sync {
  /// Checks if the content already has a license header.
  ///
  /// # Parameters
  ///
  /// * `content` - The raw file content to check
  ///
  /// # Returns
  ///
  /// `true` if the content appears to have a license header, `false` otherwise.
  fn has_license(&self, content: &[u8]) -> bool;
}

/// Default implementation of license detection.
///
/// Looks for `copyright` or `mozilla public` in the first
/// [`LICENSE_CHECK_LIMIT`] bytes, ignoring ASCII case. Any occurrence counts,
/// including one that is not part of a formal header.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimpleLicenseDetector;

impl SimpleLicenseDetector {
  pub const fn new() -> Self {
    SimpleLicenseDetector
  }
}

impl LicenseDetector for SimpleLicenseDetector {
  fn has_license(&self, content: &[u8]) -> bool {
    let check_len = content.len().min(LICENSE_CHECK_LIMIT);
    let lowered = content[..check_len].to_ascii_lowercase();

    LICENSE_MARKERS.iter().any(|marker| contains(&lowered, marker))
  }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
  haystack.windows(needle.len()).any(|window| window == needle)
}
