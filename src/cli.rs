//! Command-line interface definitions using clap
//!
//! Without a subcommand the HTTP server is started.

use clap::{Parser, Subcommand};

/// ipinfo - geolocation echo service
#[derive(Parser, Debug)]
#[command(name = "ipinfo")]
#[command(version)]
#[command(about = "Resolve the caller's IP, city, country and region from proxy headers", long_about = None)]
pub struct Cli {
    /// Configuration file path (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Generate example configuration file (prints to stdout without a path)
    Generate {
        /// Output path
        output_path: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
