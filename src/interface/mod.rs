//! # Interface Layer
//!
//! Command-line entry surface: argument parsing and config overrides.

pub mod cli;
