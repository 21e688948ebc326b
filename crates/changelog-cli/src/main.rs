//! Changelog CLI
//!
//! Command-line interface for the changelog browser.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use anyhow::Result;
use changelog_cli::Args;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    changelog_cli::run(args).await?;
    Ok(())
}
