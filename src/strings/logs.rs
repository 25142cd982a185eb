pub fn config_read_error(path: &str) -> String {
    format!("Failed to read config file {path}")
}

pub fn config_parse_error(path: &str) -> String {
    format!("Failed to parse config file {path}")
}

pub fn config_loaded(command: &str, transport: &str) -> String {
    format!("Loaded configuration: scanner command `{command}`, transport {transport}")
}

pub const SERVER_START: &str = "Starting httpx MCP server...";
pub const STDIO_READY: &str = "Serving MCP over stdio";
pub const SHUTDOWN: &str = "Shutting down...";

pub fn http_ready(bind: &str, path: &str) -> String {
    format!("Serving MCP over streamable HTTP at http://{bind}{path}")
}

pub fn shutdown_fail(err: &str) -> String {
    format!("Unable to listen for shutdown signal: {err}")
}

pub fn stream_read_failed(stream: &str, err: &str) -> String {
    format!("Failed to read {stream} of scanner process: {err}")
}

pub fn wait_failed(err: &str) -> String {
    format!("Failed to wait on scanner process, exit status unknown: {err}")
}
