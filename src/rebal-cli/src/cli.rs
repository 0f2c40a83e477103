//! CLI argument definitions for rebal
//!
//! This module contains all clap-derived structs and enums for CLI parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rebal")]
#[command(about = "Item database rebalance patcher", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Apply the rebalance tables to a database dump
    #[command(visible_alias = "a")]
    Apply {
        /// Path to the database JSON (uses configured default if not provided)
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Directory holding armor.yaml, plates.yaml, and ammo.yaml
        #[arg(short, long)]
        specs: Option<PathBuf>,

        /// Write the patched database here instead of in place
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Run the pass and report stats without writing anything
        #[arg(long)]
        dry_run: bool,

        /// Keep a hash-tracked backup of the database before writing
        #[arg(short, long)]
        backup: bool,
    },

    /// Check the tables against a database without modifying it
    #[command(visible_alias = "k")]
    Check {
        /// Path to the database JSON (uses configured default if not provided)
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Directory holding armor.yaml, plates.yaml, and ammo.yaml
        #[arg(short, long)]
        specs: Option<PathBuf>,
    },

    /// Configure default settings
    #[command(visible_alias = "c")]
    Configure {
        /// Set the default database path
        #[arg(long)]
        database: Option<PathBuf>,

        /// Set the default spec table directory
        #[arg(long)]
        specs: Option<PathBuf>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}
