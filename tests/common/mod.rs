#![allow(dead_code)]

use std::fs;
use std::path::Path;

use addlicense::processor::{Processor, ProcessorConfig, SkipPatterns};
use addlicense::templates::{LicenseData, LicenseKind, LicenseRenderer, LicenseTemplate};
use anyhow::Result;

/// Holder and year used by every fixture.
pub fn acme_2024() -> LicenseData {
  LicenseData {
    year: "2024".to_string(),
    holder: "Acme Inc".to_string(),
  }
}

pub fn renderer(kind: LicenseKind) -> Result<LicenseRenderer> {
  Ok(LicenseRenderer::new(LicenseTemplate::builtin(kind)?, acme_2024()))
}

/// Apache processor for Acme Inc, 2024, with a small worker pool.
pub fn processor(check_only: bool) -> Result<Processor> {
  Ok(Processor::new(ProcessorConfig {
    check_only,
    jobs: 4,
    ..ProcessorConfig::new(renderer(LicenseKind::Apache)?)
  }))
}

pub fn processor_with_skips(check_only: bool, dirs: &[&str], files: &[&str]) -> Result<Processor> {
  let dirs: Vec<String> = dirs.iter().map(|s| s.to_string()).collect();
  let files: Vec<String> = files.iter().map(|s| s.to_string()).collect();

  Ok(Processor::new(ProcessorConfig {
    check_only,
    jobs: 4,
    skip_patterns: SkipPatterns::new(&dirs, &files)?,
    ..ProcessorConfig::new(renderer(LicenseKind::Apache)?)
  }))
}

/// Writes `content` to `root/relative`, creating parent directories.
pub fn write(root: &Path, relative: &str, content: &str) -> Result<()> {
  let path = root.join(relative);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }
  fs::write(path, content)?;
  Ok(())
}

pub fn read(root: &Path, relative: &str) -> Result<String> {
  Ok(fs::read_to_string(root.join(relative))?)
}

pub fn root_arg(root: &Path) -> Vec<String> {
  vec![root.to_string_lossy().to_string()]
}
