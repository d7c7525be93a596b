//! # File I/O Module
//!
//! This module provides file reading and writing utilities for the processor.
//! All operations go through `tokio::fs` so they never block a worker task.

use std::fs::Permissions;
use std::path::Path;

use anyhow::{Context, Result};
use tokio::io::AsyncWriteExt;

/// File I/O operations for the processor.
pub struct FileIO;

impl FileIO {
  /// Reads the whole file as raw bytes.
  ///
  /// Content is never decoded, so files that are not valid UTF-8 pass through
  /// untouched.
  pub async fn read_file(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path)
      .await
      .with_context(|| format!("Failed to read file: {}", path.display()))
  }

  /// Overwrites the file in place and restores its permission bits.
  ///
  /// # Parameters
  ///
  /// * `path` - Path to the file to write
  /// * `content` - New content of the file
  /// * `permissions` - Permission bits observed when the file was discovered
  pub async fn write_file(path: &Path, content: &[u8], permissions: &Permissions) -> Result<()> {
    let mut file = tokio::fs::OpenOptions::new()
      .write(true)
      .truncate(true)
      .create(true)
      .open(path)
      .await
      .with_context(|| format!("Failed to open file for writing: {}", path.display()))?;

    file
      .write_all(content)
      .await
      .with_context(|| format!("Failed to write file: {}", path.display()))?;
    file
      .flush()
      .await
      .with_context(|| format!("Failed to flush file: {}", path.display()))?;
    drop(file);

    tokio::fs::set_permissions(path, permissions.clone())
      .await
      .with_context(|| format!("Failed to restore permissions on: {}", path.display()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_write_then_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.go");
    std::fs::write(&path, b"package main\n").unwrap();
    let permissions = std::fs::metadata(&path).unwrap().permissions();

    FileIO::write_file(&path, b"// header\n\npackage main\n", &permissions)
      .await
      .unwrap();

    assert_eq!(
      FileIO::read_file(&path).await.unwrap(),
      b"// header\n\npackage main\n".to_vec()
    );
  }

  #[tokio::test]
  async fn test_read_missing_file_names_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.rs");

    let err = FileIO::read_file(&path).await.unwrap_err();
    assert!(err.to_string().contains("missing.rs"));
  }

  #[cfg(unix)]
  #[tokio::test]
  async fn test_write_preserves_mode() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.sh");
    std::fs::write(&path, b"echo hi\n").unwrap();
    std::fs::set_permissions(&path, Permissions::from_mode(0o750)).unwrap();
    let permissions = std::fs::metadata(&path).unwrap().permissions();

    FileIO::write_file(&path, b"# header\n\necho hi\n", &permissions)
      .await
      .unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o750);
  }
}
