//! # Main Entry Point
//!
//! Wires the layers together:
//! - Domain: Configuration, Types, and the CommandRunner seam
//! - Application: Argument building, Sanitizing, Scan handler
//! - Infrastructure: Process runner, MCP server and transports, Logging
//! - Interface: CLI
//!

mod application;
mod domain;
mod infrastructure;
mod interface;
mod strings;

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;

use crate::application::handler::ScanHandler;
use crate::domain::config::{AppConfig, Transport};
use crate::infrastructure::logging;
use crate::infrastructure::mcp::transport;
use crate::infrastructure::tools::runner::ProcessRunner;
use crate::interface::cli::Cli;
use crate::strings::logs;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load Configuration
    let cli = Cli::parse();
    let mut config = AppConfig::discover(cli.config.as_deref())?;
    cli.apply(&mut config);

    // 2. Logging Setup
    let _guard = logging::init(&config.logging)?;
    tracing::info!("{}", logs::SERVER_START);
    tracing::info!(
        "{}",
        logs::config_loaded(
            &config.scanner.command,
            &format!("{:?}", config.server.transport)
        )
    );

    // 3. Scanner pipeline
    let runner = Arc::new(ProcessRunner::new(config.scanner.timeout()));
    let handler = ScanHandler::new(runner, &config.scanner);

    // 4. Serve
    match config.server.transport {
        Transport::Stdio => transport::serve_stdio(handler).await,
        Transport::Http => transport::serve_http(handler, &config.server).await,
    }
}
