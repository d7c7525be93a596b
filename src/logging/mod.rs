//! # Logging Module
//!
//! This module provides logging utilities for the addlicense tool, including:
//! - Verbose logging that can be enabled/disabled
//! - Quiet mode, which silences everything but the scripting output
//! - Installation of the `tracing` subscriber for diagnostics
//!
//! Verbose logs go to stderr so that stdout stays scriptable.
//!
//! ## Example
//!
//! ```rust
//! use addlicense::logging::{ColorMode, set_verbose};
//! use addlicense::verbose_log;
//!
//! // Enable verbose logging
//! set_verbose();
//!
//! // Set color mode to Auto (uses owo-colors' automatic TTY detection)
//! ColorMode::Auto.apply();
//!
//! // Log a verbose message (goes to stderr)
//! verbose_log!("Walking: {}", "src");
//! ```

mod modes;

pub use modes::{ColorMode, init_tracing, is_quiet, is_verbose, set_quiet, set_verbose};

/// Logs a message to stderr if verbose mode is enabled.
///
/// It uses the same format string syntax as the standard [`eprintln!`] macro.
#[macro_export]
macro_rules! verbose_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}
