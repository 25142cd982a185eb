use clap::Parser;
use std::path::PathBuf;

use crate::domain::config::{AppConfig, Transport};

/// httpx-mcp: exposes projectdiscovery/httpx as an MCP tool.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "httpx-mcp",
    version,
    about = "MCP server that scans hosts for live HTTP/HTTPS services using projectdiscovery/httpx.",
    long_about = None
)]
pub struct Cli {
    /// Path to a YAML config file. Defaults to the per-user config if present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Scanner executable (looked up on PATH).
    #[arg(long)]
    pub command: Option<String>,

    /// MCP transport to serve.
    #[arg(long, value_enum)]
    pub transport: Option<Transport>,

    /// Listen address for the HTTP transport.
    #[arg(long)]
    pub bind: Option<String>,

    /// Kill the scanner if it runs longer than this many seconds.
    #[arg(long = "timeout-secs")]
    pub timeout_secs: Option<u64>,

    /// Report signal-terminated scans as errors.
    #[arg(long = "fail-on-signal", default_value_t = false)]
    pub fail_on_signal: bool,

    /// Also write logs to this file.
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Flags given on the command line win over the config file.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(command) = &self.command {
            config.scanner.command = command.clone();
        }
        if let Some(transport) = self.transport {
            config.server.transport = transport;
        }
        if let Some(bind) = &self.bind {
            config.server.bind = bind.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.scanner.timeout_secs = Some(secs);
        }
        if self.fail_on_signal {
            config.scanner.fail_on_signal = true;
        }
        if let Some(path) = &self.log_file {
            config.logging.file = Some(path.clone());
        }
    }
}
