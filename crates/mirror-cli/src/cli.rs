//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Collection Mirror - Mirror media-server collections into directories of symlinks
#[derive(Parser, Debug)]
#[command(name = "mirror")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (.toml, .json, .yaml)
    #[arg(
        short,
        long,
        global = true,
        env = "MIRROR_CONFIG",
        default_value = "mirror.toml"
    )]
    pub config: PathBuf,

    /// API key, overriding the one in the configuration file
    #[arg(long, global = true, env = "MIRROR_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Mirror all collections now and then on every interval until Ctrl-C
    Run {
        /// Seconds between cycles, overriding the configured schedule
        #[arg(long)]
        interval_secs: Option<u64>,
    },

    /// Run a single mirror cycle
    Sync {
        /// Preview changes without applying them
        #[arg(long)]
        dry_run: bool,

        /// Output the cycle report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report what a sync would change; fails when a mirror is out of date
    Check {
        /// Output the cycle report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Load and validate the configuration without contacting the server
    Validate,
}
