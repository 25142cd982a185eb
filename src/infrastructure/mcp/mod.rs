//! # MCP Module
//!
//! Model Context Protocol surface of the server.
//! Includes the tool-serving `ServerHandler` and the stdio / streamable HTTP transports.

pub mod server;
pub mod transport;
