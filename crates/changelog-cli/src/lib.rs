//! # changelog-cli
//!
//! The `changelog` command: serve the browser, query the catalog from the
//! terminal, validate data, and manage configuration.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_handlers;
pub mod error;

use std::path::PathBuf;

use changelog_core::ConfigManager;
use tracing_subscriber::EnvFilter;

pub use cli::{Args, Command, ConfigAction};
pub use config::ChangelogConfig;
pub use error::{Error, Result};

/// Filter used with `-v`.
pub const VERBOSE_FILTER: &str =
    "info,changelog_core=debug,changelog_web=debug,changelog_cli=debug,tower_http=debug";

/// Effective filter when `RUST_LOG` is unset.
pub fn log_filter(verbose: bool, configured: &str) -> &str {
    if verbose { VERBOSE_FILTER } else { configured }
}

/// Install the global subscriber. `RUST_LOG` wins over `fallback`.
pub fn init_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    // A subscriber may already be installed when embedded or under test.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Config file, then environment, then `--data-dir`.
pub fn load_config(config_path: Option<&str>, data_dir: Option<PathBuf>) -> Result<ChangelogConfig> {
    let mut config = ChangelogConfig::load(config_path)?;
    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }
    Ok(config)
}

/// Run the parsed command line.
pub async fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Config { action } => {
            init_tracing(log_filter(args.verbose, config::DEFAULT_LOG_FILTER));
            config_handlers::handle_config_command(args.config.as_deref(), action)?;
            Ok(())
        }
        command => {
            let config = load_config(args.config.as_deref(), args.data_dir)?;
            init_tracing(log_filter(args.verbose, &config.log_filter));
            tracing::debug!(data_dir = %config.data_dir.display(), "configuration loaded");
            commands::execute(command, &config).await
        }
    }
}
