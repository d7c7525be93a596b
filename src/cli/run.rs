//! # Run Command
//!
//! This module implements the default (and only) command: add missing license
//! headers, or with `--check` report files that lack one.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Args;
use tracing::{debug, warn};

use crate::config::{CliOverrides, Settings, load_config};
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use crate::output::{print_hint, print_summary};
use crate::processor::{Processor, ProcessorConfig};
use crate::report::write_json_report;
use crate::verbose_log;

/// Arguments for the run command
#[derive(Args, Debug, Default)]
pub struct RunArgs {
  /// Files or directories to process. Directories are walked recursively.
  #[arg(required = true, value_name = "PATTERNS")]
  pub patterns: Vec<String>,

  /// Copyright holder [default: Google LLC]
  #[arg(short = 'c', long)]
  pub holder: Option<String>,

  /// License type: apache, bsd, mit or mpl [default: apache]. Ignored when
  /// --licensef is given
  #[arg(short = 'l', long, value_name = "LICENSE")]
  pub license: Option<String>,

  /// Custom license template file; takes precedence over --license
  #[arg(short = 'f', long = "licensef", value_name = "FILE")]
  pub license_file: Option<PathBuf>,

  /// Copyright year(s) [default: current year]
  #[arg(short = 'y', long)]
  pub year: Option<String>,

  /// Print modified files; repeat for more diagnostics (-vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors and missing files
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Check only: list files missing a license header and exit non-zero if any
  #[arg(long)]
  pub check: bool,

  /// Regular expressions of directory names to skip (repeatable,
  /// comma-separated)
  #[arg(long, value_name = "REGEX", value_delimiter = ',')]
  pub skip_dirs: Vec<String>,

  /// Regular expressions of file names to skip (repeatable, comma-separated)
  #[arg(long, value_name = "REGEX", value_delimiter = ',')]
  pub skip_files: Vec<String>,

  /// Number of files processed concurrently [default: 4 x CPUs]
  #[arg(short = 'j', long, value_name = "N")]
  pub jobs: Option<usize>,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,

  /// Path to config file (default: .addlicense.toml in the current directory)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long, conflicts_with = "config")]
  pub no_config: bool,

  /// Write a JSON report of every processed file to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,
}

impl RunArgs {
  fn cli_overrides(&self) -> CliOverrides {
    CliOverrides {
      holder: self.holder.clone(),
      license: self.license.clone(),
      license_file: self.license_file.clone(),
      year: self.year.clone(),
      check_only: self.check,
      skip_dirs: self.skip_dirs.clone(),
      skip_files: self.skip_files.clone(),
      jobs: self.jobs,
    }
  }
}

/// Run the command with the given arguments.
///
/// Configuration errors are returned before any file is touched. A run that
/// processed files but failed (unreadable files, or missing headers in check
/// mode) exits the process with status 1.
pub async fn run(args: RunArgs) -> Result<()> {
  init_tracing(args.quiet, args.verbose);

  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let current_dir = std::env::current_dir().context("Failed to determine current directory")?;
  let config = load_config(args.config.as_deref(), &current_dir, args.no_config)?;
  if config.is_some() {
    debug!("Using configuration file");
  }

  let settings = Settings::resolve(config, args.cli_overrides())?;
  debug!("Resolved settings: {:?}", settings);

  let processor = Processor::new(ProcessorConfig {
    keep_reports: args.report_json.is_some(),
    ..ProcessorConfig::from_settings(&settings)?
  });
  let verdict = processor.process(&args.patterns).await?;
  let summary = verdict.summary();

  print_summary(&summary, settings.check_only);
  if settings.check_only && summary.missing > 0 {
    print_hint("Run without --check to add missing license headers.");
  }

  if let Some(ref output_path) = args.report_json {
    match write_json_report(&verdict, output_path) {
      Ok(()) => verbose_log!("Generated JSON report at {}", output_path.display()),
      Err(e) => {
        warn!("Report generation failed: {:#}", e);
        eprintln!("Error generating JSON report: {:#}", e);
      }
    }
  }

  if verdict.failed {
    process::exit(verdict.exit_code());
  }

  Ok(())
}
