//! Collection Mirror CLI
//!
//! Mirrors media-server collections into directories of symlinks.

mod cli;
mod commands;
mod error;
mod logging;
mod schedule;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: logging disabled: {}", "warning".yellow().bold(), e);
    }

    let config = commands::load_config(&cli.config, cli.api_key.as_deref())?;
    tracing::debug!(config = %cli.config.display(), "Configuration loaded");

    match cli.command {
        Commands::Run { interval_secs } => commands::run_scheduled(config, interval_secs),
        Commands::Sync { dry_run, json } => commands::run_sync(config, dry_run, json),
        Commands::Check { json } => commands::run_check(config, json),
        Commands::Validate => commands::run_validate(&config),
    }
}
