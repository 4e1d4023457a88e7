//! CLI command implementations
//!
//! `serve` loads configuration, applies the log level and runs the HTTP
//! server on a tokio runtime until Ctrl-C. `config` prints the effective
//! configuration as JSON.

use std::io::{self, Write};
use std::path::Path;

use crate::config::GalleryConfig;
use crate::http_server::HttpServer;
use crate::observability::{log_event, log_event_with_fields, Event, Logger};

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port } => serve(config.as_deref(), port),
        Command::Config { config } => print_config(config.as_deref()),
    }
}

/// Resolve the effective configuration: file or defaults, then overrides
pub fn load_config(path: Option<&Path>, port: Option<u16>) -> CliResult<GalleryConfig> {
    let mut config = GalleryConfig::load_or_default(path)?;
    if let Some(port) = port {
        config.server.port = port;
    }
    Ok(config)
}

/// Start the HTTP API server
pub fn serve(config_path: Option<&Path>, port: Option<u16>) -> CliResult<()> {
    log_event(Event::BootStart);

    let config = load_config(config_path, port)?;
    Logger::set_min_severity(config.log_severity());

    let source = config_path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("source", source.as_str()),
            ("addr", config.server.socket_addr().as_str()),
            ("search", if config.search.enabled { "enabled" } else { "disabled" }),
        ],
    );

    let server = HttpServer::with_config(config);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })?;

    log_event(Event::ShutdownComplete);
    Ok(())
}

/// Print the effective configuration
pub fn print_config(config_path: Option<&Path>) -> CliResult<()> {
    let config = load_config(config_path, None)?;
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &config)?;
    writeln!(stdout)?;
    Ok(())
}
