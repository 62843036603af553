//! Error types for the warming engine
//!
//! Per-request failures never show up here: they are recorded as
//! [`crate::Outcome::Error`] results. Only precondition failures and broken
//! internal invariants are surfaced to the caller.

use thiserror::Error;

pub type EngineResult<T> = Result<T, EngineError>;

/// Warming engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("No URLs to warm")]
    NoUrls,

    #[error("Concurrency must be a positive integer, got {0}")]
    InvalidConcurrency(usize),

    #[error("Request timeout must be greater than zero")]
    InvalidTimeout,

    #[error("Worker task failed: {0}")]
    WorkerFailed(String),

    #[error("Profile '{profile}' finished with {missing} URL(s) missing a result")]
    IncompleteProfile { profile: String, missing: usize },

    #[error("Profile '{profile}' received a second result for work item {index}")]
    DuplicateResult { profile: String, index: usize },
}

impl EngineError {
    /// Whether the error was raised before any request was dispatched
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            EngineError::NoUrls | EngineError::InvalidConcurrency(_) | EngineError::InvalidTimeout
        )
    }
}
