//! # addlicense
//!
//! A tool that ensures source code files have copyright license headers by walking directory trees recursively.
//!
//! `addlicense` modifies source files in place and never adds a license header to a file that already has one.
//! With `--check` it only lists the files that lack a header and exits non-zero if there are any.
//!
//! ## Features
//!
//! * Recursively walk directories and add license headers to source files
//! * Comment syntax chosen from the file extension (or whole name for `Dockerfile`-style files)
//! * Shebangs, XML declarations, doctypes, encoding pragmas and `<?php` stay on the first line
//! * Built-in Apache-2.0, BSD, MIT and MPL-2.0 templates, or a custom template file
//! * Regular expressions to skip directories and files
//! * Concurrent processing with a fixed pool of workers
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use addlicense::processor::{Processor, ProcessorConfig};
//! use addlicense::templates::{LicenseData, LicenseKind, LicenseRenderer, LicenseTemplate};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let template = LicenseTemplate::builtin(LicenseKind::Apache)?;
//!     let data = LicenseData {
//!         year: "2025".to_string(),
//!         holder: "Acme Inc".to_string(),
//!     };
//!
//!     let processor = Processor::new(ProcessorConfig {
//!         check_only: true,
//!         ..ProcessorConfig::new(LicenseRenderer::new(template, data))
//!     });
//!
//!     let verdict = processor.process(&["src".to_string()]).await?;
//!     if verdict.failed {
//!         println!("Some files are missing license headers");
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`processor`] - Walking, the worker pool and per-file processing
//! * [`templates`] - License templates and comment formatting
//! * [`comment_style`] - Extension to comment syntax table
//! * [`config`] - Config file and settings resolution
//! * [`logging`] - Logging utilities for verbose output
//!
//! [`processor`]: crate::processor
//! [`templates`]: crate::templates
//! [`comment_style`]: crate::comment_style
//! [`config`]: crate::config
//! [`logging`]: crate::logging

pub mod cli;
pub mod comment_style;
pub mod config;
pub mod license_detection;
pub mod logging;
pub mod output;
pub mod processor;
pub mod report;
pub mod templates;
