use std::fs;
use std::path::Path;

use addlicense::comment_style::resolve;
use addlicense::config::{CliOverrides, ConfigError, LicenseSource, Settings};
use addlicense::license_detection::{LicenseDetector, SimpleLicenseDetector};
use addlicense::processor::{Processor, ProcessorConfig};
use addlicense::templates::{LicenseData, LicenseKind, LicenseRenderer, LicenseTemplate};
use anyhow::Result;
use tempfile::tempdir;

fn data() -> LicenseData {
  LicenseData {
    year: "2024".to_string(),
    holder: "Acme Inc".to_string(),
  }
}

#[test]
fn test_every_builtin_header_is_detected() -> Result<()> {
  let detector = SimpleLicenseDetector::new();

  for kind in [LicenseKind::Apache, LicenseKind::Bsd, LicenseKind::Mit, LicenseKind::Mpl] {
    let renderer = LicenseRenderer::new(LicenseTemplate::builtin(kind)?, data());
    for name in ["a.go", "a.c", "a.js", "a.py", "a.el", "a.erl", "a.sql", "a.html", "a.ml"] {
      let style = resolve(Path::new(name)).expect("style for supported extension");
      let header = renderer.render_header(&style)?;
      assert!(detector.has_license(&header), "{kind} in {name}");
    }
  }
  Ok(())
}

#[test]
fn test_bsd_header_in_ocaml_block() -> Result<()> {
  let renderer = LicenseRenderer::new(LicenseTemplate::builtin(LicenseKind::Bsd)?, data());
  let style = resolve(Path::new("lexer.mll")).expect("ml style");

  let header = String::from_utf8(renderer.render_header(&style)?)?;
  assert_eq!(
    header,
    "(**\n   Copyright (c) 2024 Acme Inc All rights reserved.\n   Use of this source code is governed by a BSD-style\n   license that can be found in the LICENSE file.\n*)\n\n"
  );
  Ok(())
}

#[test]
fn test_mpl_header_in_doc_block() -> Result<()> {
  let renderer = LicenseRenderer::new(LicenseTemplate::builtin(LicenseKind::Mpl)?, data());
  let style = resolve(Path::new("app.ts")).expect("doc block style");

  let header = String::from_utf8(renderer.render_header(&style)?)?;
  assert!(header.starts_with("/**\n * This Source Code Form is subject to the terms of the Mozilla Public\n"));
  assert!(header.ends_with(" */\n\n"));
  assert!(!header.contains("Acme Inc"));
  Ok(())
}

#[tokio::test]
async fn test_mpl_mutation_is_idempotent() -> Result<()> {
  let dir = tempdir()?;
  fs::write(dir.path().join("a.hs"), "main = pure ()\n")?;

  let processor = Processor::new(ProcessorConfig {
    jobs: 1,
    ..ProcessorConfig::new(LicenseRenderer::new(LicenseTemplate::builtin(LicenseKind::Mpl)?, data()))
  });
  let roots = vec![dir.path().to_string_lossy().to_string()];

  processor.process(&roots).await?;
  let first = fs::read_to_string(dir.path().join("a.hs"))?;
  processor.process(&roots).await?;
  let second = fs::read_to_string(dir.path().join("a.hs"))?;

  assert!(first.starts_with("-- This Source Code Form"));
  assert_eq!(first, second);
  Ok(())
}

#[test]
fn test_settings_load_custom_template() -> Result<()> {
  let dir = tempdir()?;
  let path = dir.path().join("HEADER.tmpl");
  fs::write(&path, "(c) {{.Year}} {{.Holder}}. Proprietary.\n")?;

  let settings = Settings::resolve(
    None,
    CliOverrides {
      license_file: Some(path.clone()),
      license: Some("apache".to_string()),
      ..CliOverrides::default()
    },
  )?;
  assert_eq!(settings.license, LicenseSource::File(path));

  let rendered = settings.load_template()?.render(&data())?;
  assert_eq!(rendered, "(c) 2024 Acme Inc. Proprietary.\n");
  Ok(())
}

#[test]
fn test_settings_reject_malformed_template() -> Result<()> {
  let dir = tempdir()?;
  let path = dir.path().join("HEADER.tmpl");
  fs::write(&path, "Copyright {{ Year }}\n")?;

  let settings = Settings::resolve(
    None,
    CliOverrides {
      license_file: Some(path),
      ..CliOverrides::default()
    },
  )?;

  let err = ProcessorConfig::from_settings(&settings).err().expect("malformed template");
  assert!(matches!(err, ConfigError::LicenseFileParse { .. }));
  Ok(())
}
