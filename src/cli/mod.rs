//! CLI module for the Accounts API
//!
//! - `serve`: run the HTTP API
//! - `migrate`: create the PostgreSQL schema

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};
use tracing::warn;

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Accounts API - user record management
#[derive(Parser)]
#[command(name = "accounts-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP API (default)
    Serve,

    /// Create the users table in PostgreSQL
    Migrate,
}

/// Load configuration from files and environment, then start logging
pub(crate) fn bootstrap() -> AppConfig {
    dotenvy::dotenv().ok();

    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    logging::init_logging(&config.logging);

    if let Some(e) = load_error {
        warn!(error = %e, "Failed to load configuration, falling back to defaults");
    }

    config
}
