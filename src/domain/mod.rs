//! # Domain Layer
//!
//! Core definitions, types, and traits that describe a scan invocation.
//! Independent of the MCP transport, serving as the contract for other layers.

pub mod config;
pub mod traits;
pub mod types;
