//! Error types for the probity audit engine.
//!
//! Errors are grouped by where they originate: the metric source, the
//! configuration surface, or the engine itself. Evaluator errors are caught at
//! the entity boundary by the report builder and surfaced as `Error` sections,
//! so a single broken entity never aborts a whole audit run.

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ProbityError>;

/// The error type for all probity operations.
#[derive(Error, Debug)]
pub enum ProbityError {
    /// The metric source could not be reached or a query failed to execute.
    ///
    /// Fatal for the affected entity section only; the report builder records
    /// the failure and continues with the remaining entities.
    #[error("metric source unavailable: {0}")]
    SourceUnavailable(String),

    /// A referenced table or column does not exist in the metric source.
    #[error("unknown table or column: {0}")]
    MalformedColumnSet(String),

    /// An identifier failed validation before query construction.
    #[error("security violation: {0}")]
    Security(String),

    /// Invalid static configuration (thresholds, entity definitions).
    #[error("configuration error: {0}")]
    Config(String),

    /// An invariant inside the engine was violated.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Extension trait for attaching context to errors.
pub trait ErrorContext<T> {
    /// Wraps the error with a contextual message, preserving the original
    /// error text.
    fn context(self, msg: impl Into<String>) -> Result<T>;
}

impl<T> ErrorContext<T> for Result<T> {
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| match e {
            ProbityError::SourceUnavailable(inner) => {
                ProbityError::SourceUnavailable(format!("{}: {inner}", msg.into()))
            }
            ProbityError::MalformedColumnSet(inner) => {
                ProbityError::MalformedColumnSet(format!("{}: {inner}", msg.into()))
            }
            ProbityError::Security(inner) => {
                ProbityError::Security(format!("{}: {inner}", msg.into()))
            }
            ProbityError::Config(inner) => {
                ProbityError::Config(format!("{}: {inner}", msg.into()))
            }
            ProbityError::Internal(inner) => {
                ProbityError::Internal(format!("{}: {inner}", msg.into()))
            }
        })
    }
}
