//! CLI module for the gallery service
//!
//! Provides command-line interface for:
//! - serve: Start the HTTP API server
//! - config: Print the effective configuration

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{load_config, print_config, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
