//! Command handlers for the rebal CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod apply;
pub mod check;
pub mod configure;

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::config::Config;

/// Get the database path from the argument or the configured default
pub fn resolve_database(provided: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = provided {
        return Ok(path);
    }

    let config = Config::load()?;
    config.database.context(
        "Database path not provided. Run 'rebal configure --database PATH' to set a default.",
    )
}

/// Get the spec directory from the argument, the configured default, or `db/`
pub fn resolve_specs(provided: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = provided {
        return Ok(path);
    }

    let config = Config::load()?;
    Ok(config.specs.unwrap_or_else(|| PathBuf::from("db")))
}
