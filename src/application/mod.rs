//! # Application Layer
//!
//! The scan pipeline: argument building, output sanitizing, and the
//! tool invocation handler that ties them to a `CommandRunner`.

pub mod arguments;
pub mod handler;
pub mod sanitize;
