//! CLI argument definitions using clap
//!
//! Commands:
//! - gallery serve [--config <path>] [--port <port>]
//! - gallery config [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Gallery - photo, album and tag service with criteria queries
#[derive(Parser, Debug)]
#[command(name = "gallery")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP API server
    Serve {
        /// Path to configuration file; defaults apply when omitted
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print the effective configuration and exit
    Config {
        /// Path to configuration file; defaults apply when omitted
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
