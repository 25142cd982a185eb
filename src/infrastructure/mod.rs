//! # Infrastructure Layer
//!
//! Handles interactions with external systems: the scanner process, the MCP transports,
//! and log sinks. Implements the traits defined in the Domain layer (e.g., CommandRunner).

pub mod logging;
pub mod mcp;
pub mod tools;
