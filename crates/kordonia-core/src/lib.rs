//! Core domain for kordonia: server-side tasks that report percentage
//! progress, the event types they emit, and the ports adapters implement.
//!
//! This crate is transport-agnostic. The Axum adapter streams
//! [`TaskEvent`]s to web clients over SSE; the client crate consumes the
//! same wire payloads; the CLI renders them. None of that lives here.

#![deny(unused_crate_dependencies)]

pub mod error;
pub mod events;
pub mod ports;
pub mod task;

// Re-export commonly used types for convenience
pub use error::CoreError;
pub use events::{ProgressFrame, TaskEvent};
pub use ports::{NoopEmitter, TaskEventEmitter, TracingEmitter};
pub use task::{
    COMPLETION_EPSILON, Progress, RunnerConfig, TaskId, TaskRegistry, TaskSubscription,
};

// Silence unused dev-dependency warnings until we add timing-based tests
#[cfg(test)]
use tokio_test as _;
