//! Core error types.
//!
//! Adapters map `CoreError` to their own surfaces (HTTP status codes,
//! CLI exit codes) rather than exposing it directly.

use thiserror::Error;

use crate::task::TaskId;

/// Core error type for semantic domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No task is registered under the given identifier.
    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),

    /// Internal error (unexpected condition).
    #[error("Internal error: {0}")]
    Internal(String),
}
