//! # addlicense
//!
//! A tool that ensures source code files have copyright license headers.

use addlicense::cli::{Cli, run};
use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse_args();
  run(cli.args).await
}
