//! # Domain Types
//!
//! Data structures that live for exactly one tool invocation:
//! the incoming request, the process outcome, and the response handed back to the caller.

use anyhow::{Result, ensure};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::strings::messages;

/// Parameters of the `httpx` tool call.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema, PartialEq)]
pub struct ScanRequest {
    /// List of domains/hosts (e.g., example.com) to scan for live HTTP/HTTPS services.
    #[serde(rename = "target")]
    #[schemars(length(min = 1))]
    pub targets: Vec<String>,

    /// Optional list of ports to probe (e.g., 80, 443, 8080).
    #[serde(default)]
    pub ports: Option<Vec<u16>>,

    /// Optional list of probe flags (e.g., status-code, title, web-server, tech-detect).
    #[serde(default)]
    pub probes: Option<Vec<String>>,
}

#[cfg(test)]
impl ScanRequest {
    pub fn new<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            targets: targets.into_iter().map(Into::into).collect(),
            ports: None,
            probes: None,
        }
    }

    pub fn with_ports(mut self, ports: Vec<u16>) -> Self {
        self.ports = Some(ports);
        self
    }

    pub fn with_probes<I, S>(mut self, probes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.probes = Some(probes.into_iter().map(Into::into).collect());
        self
    }
}

impl ScanRequest {
    /// Checks the invariants that must hold before a process is launched.
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.targets.is_empty(), messages::EMPTY_TARGETS);
        Ok(())
    }
}

/// How a single external process run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// Exited with the success code.
    Completed { stdout: String, exit_code: i32 },
    /// Closed without a reportable exit status (signal, or wait failure).
    CompletedUnknownCode {
        stdout: String,
        stderr: String,
        signal: Option<i32>,
    },
    /// The process could not be spawned at all.
    LaunchFailed { reason: String },
    /// Exited with a non-zero code.
    Failed { stderr: String, exit_code: i32 },
    /// Killed because the caller cancelled or the deadline passed.
    Cancelled { reason: String },
}

impl ProcessOutcome {
    /// Short label used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Completed { .. } => "completed",
            Self::CompletedUnknownCode { .. } => "completed_unknown_code",
            Self::LaunchFailed { .. } => "launch_failed",
            Self::Failed { .. } => "failed",
            Self::Cancelled { .. } => "cancelled",
        }
    }
}

/// What the caller receives for one tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolResponse {
    Ok { text: String },
    Error { message: String },
}
