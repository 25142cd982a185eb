//! # Scan Handler
//!
//! Orchestrates one `httpx` tool call: build arguments, run the scanner,
//! sanitize its output, and map the outcome to a `ToolResponse`.

use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::application::arguments::build_args;
use crate::application::sanitize::strip_ansi;
use crate::domain::config::ScannerConfig;
use crate::domain::traits::CommandRunner;
use crate::domain::types::{ProcessOutcome, ScanRequest, ToolResponse};
use crate::strings::messages;

/// Stateless between calls; clones share only the runner.
#[derive(Clone)]
pub struct ScanHandler {
    runner: Arc<dyn CommandRunner>,
    command: String,
    fail_on_signal: bool,
}

impl ScanHandler {
    pub fn new(runner: Arc<dyn CommandRunner>, config: &ScannerConfig) -> Self {
        Self {
            runner,
            command: config.command.clone(),
            fail_on_signal: config.fail_on_signal,
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// `request` must already have passed `ScanRequest::validate`.
    pub async fn handle(&self, request: &ScanRequest, cancel: CancellationToken) -> ToolResponse {
        let args = build_args(request);
        tracing::info!(command = %self.command, ?args, "Running scanner");

        let started = Instant::now();
        let outcome = self.runner.run(&self.command, &args, cancel).await;
        tracing::info!(
            command = %self.command,
            outcome = outcome.kind(),
            elapsed = ?started.elapsed(),
            "Scanner finished"
        );

        self.respond(outcome)
    }

    fn respond(&self, outcome: ProcessOutcome) -> ToolResponse {
        match outcome {
            ProcessOutcome::Completed { stdout, .. } => success(&stdout),
            ProcessOutcome::CompletedUnknownCode {
                stdout,
                stderr,
                signal,
            } => match signal {
                Some(signal) if self.fail_on_signal => ToolResponse::Error {
                    message: messages::terminated_by_signal(&self.command, signal, &stderr),
                },
                _ => {
                    if let Some(signal) = signal {
                        tracing::warn!(
                            command = %self.command,
                            signal,
                            "Scanner terminated by signal, returning captured output"
                        );
                    }
                    success(&stdout)
                }
            },
            ProcessOutcome::Failed { stderr, exit_code } => ToolResponse::Error {
                message: messages::exited_with_code(&self.command, exit_code, &stderr),
            },
            ProcessOutcome::LaunchFailed { reason } => ToolResponse::Error {
                message: messages::launch_failed(&self.command, &reason),
            },
            ProcessOutcome::Cancelled { reason } => ToolResponse::Error {
                message: messages::cancelled(&self.command, &reason),
            },
        }
    }
}

/// The placeholder check runs before sanitizing, so output made only of color codes
/// comes back as empty text rather than `(no output)`.
fn success(stdout: &str) -> ToolResponse {
    let trimmed = stdout.trim();
    let text = if trimmed.is_empty() {
        messages::NO_OUTPUT
    } else {
        trimmed
    };
    ToolResponse::Ok {
        text: strip_ansi(text),
    }
}
