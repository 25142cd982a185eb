//! # Tools Module
//!
//! External process execution for the scanner tool.

pub mod runner;
