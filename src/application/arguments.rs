//! # Argument Builder
//!
//! Turns a `ScanRequest` into the argument vector handed to the scanner.
//! Each entry is a discrete token; nothing here goes through a shell.

use crate::domain::types::ScanRequest;

const FLAG_PREFIX: char = '-';
const TARGET_FLAG: &str = "-u";
const SILENT_FLAG: &str = "-silent";
const PORTS_FLAG: &str = "-p";

pub fn build_args(request: &ScanRequest) -> Vec<String> {
    let mut args = vec![
        TARGET_FLAG.to_string(),
        request.targets.join(","),
        SILENT_FLAG.to_string(),
    ];

    if let Some(ports) = request.ports.as_deref().filter(|p| !p.is_empty()) {
        let joined = ports
            .iter()
            .map(u16::to_string)
            .collect::<Vec<_>>()
            .join(",");
        args.push(PORTS_FLAG.to_string());
        args.push(joined);
    }

    for probe in request.probes.iter().flatten() {
        args.push(probe_flag(probe));
    }

    args
}

/// Callers may pass either `title` or an already-prefixed `-title`.
fn probe_flag(probe: &str) -> String {
    if probe.starts_with(FLAG_PREFIX) {
        probe.to_string()
    } else {
        format!("{FLAG_PREFIX}{probe}")
    }
}
