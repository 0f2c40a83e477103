mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Apply {
            database,
            specs,
            output,
            dry_run,
            backup,
        } => {
            commands::apply::handle(database, specs, output, dry_run, backup)?;
        }

        Commands::Check { database, specs } => {
            commands::check::handle(database, specs)?;
        }

        Commands::Configure {
            database,
            specs,
            show,
        } => {
            commands::configure::handle(database, specs, show)?;
        }
    }

    Ok(())
}
