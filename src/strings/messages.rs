//! # Messages
//!
//! Contains constant strings and format functions for caller-facing messages.
//! Includes the tool description, output placeholders, and error templates.

pub const SERVER_INSTRUCTIONS: &str = "Scan target domains and detect active HTTP/HTTPS services using projectdiscovery/httpx. \
Call the `httpx` tool with a list of hosts, optional ports, and optional probe flags.";

/// Substituted when the scanner printed nothing but whitespace.
pub const NO_OUTPUT: &str = "(no output)";

/// Substituted when a failing scanner wrote nothing to stderr.
pub const EMPTY_STDERR: &str = "(empty)";

pub const EMPTY_TARGETS: &str = "`target` must contain at least one host";

pub fn launch_failed(command: &str, reason: &str) -> String {
    format!("Failed to start {command}: {reason}")
}

pub fn exited_with_code(command: &str, code: i32, stderr: &str) -> String {
    format!("{command} exited with code {code}. stderr: {}", or_empty(stderr))
}

pub fn terminated_by_signal(command: &str, signal: i32, stderr: &str) -> String {
    format!("{command} was terminated by signal {signal}. stderr: {}", or_empty(stderr))
}

pub fn cancelled(command: &str, reason: &str) -> String {
    format!("{command} was cancelled: {reason}")
}

pub const CANCELLED_BY_CALLER: &str = "request cancelled by caller";

pub fn deadline_exceeded(secs: u64) -> String {
    format!("no result within {secs}s")
}

pub fn invalid_params(err: &str) -> String {
    format!("Invalid httpx parameters: {err}")
}

fn or_empty(stderr: &str) -> &str {
    if stderr.is_empty() { EMPTY_STDERR } else { stderr }
}
