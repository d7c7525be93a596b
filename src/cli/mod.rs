//! # CLI Module
//!
//! This module contains the command-line interface implementation.
//! It uses clap for argument parsing.

mod run;

use clap::Parser;
use clap::builder::styling::{AnsiColor, Color, Style, Styles};
pub use run::{RunArgs, run};

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  name = "addlicense",
  author,
  version,
  long_version = env!("ADDLICENSE_LONG_VERSION"),
  about = "Ensures source files have a license header",
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Add Apache-2.0 headers held by Acme Inc to every supported file
  addlicense -c \"Acme Inc\" -l apache src/ cmd/

  # Check only: list files missing a header and exit non-zero if any
  addlicense --check .

  # Use a custom template with {{.Year}} and {{.Holder}} placeholders
  addlicense -f LICENSE.tmpl -y 2020-2024 .

  # Skip vendored directories and generated files
  addlicense --skip-dirs '^vendor$,^node_modules$' --skip-files '\\.pb\\.go$' .
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  #[command(flatten)]
  pub args: RunArgs,
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
