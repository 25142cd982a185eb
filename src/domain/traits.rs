//! # Domain Traits
//!
//! Abstract interfaces for core system components.
//! Allows for pluggable implementations in the Infrastructure layer.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::domain::types::ProcessOutcome;

/// Abstract interface for launching an external command and collecting its outcome.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args` to completion, or until `cancel` fires.
    ///
    /// Never fails: every way the run can end is a `ProcessOutcome` variant.
    async fn run(&self, program: &str, args: &[String], cancel: CancellationToken)
    -> ProcessOutcome;
}
