//! Client for the kordonia task API.
//!
//! Two pieces, mirroring the two operations the server exposes:
//!
//! - [`ApiClient`] triggers a task (`POST /push`) and opens its progress
//!   stream (`GET /stream?task_id=...`).
//! - [`ProgressWatcher`] holds the client-side state: an optional task
//!   identifier and the subscription watching it. Setting a new identifier
//!   resets the displayed progress to zero and tears down the previous
//!   stream before opening the next; dropping the watcher closes the
//!   stream. A stream is open if and only if a task identifier is set.
//!
//! There is no retry or reconnection: stream errors are logged and the
//! subscription ends. Callers that need to resume construct a new
//! subscription; a closed one cannot be reopened.

#![deny(unused_crate_dependencies)]

pub mod api;
pub mod error;
mod sse;
pub mod subscription;

pub use api::{ApiClient, DEFAULT_BASE_URL};
pub use error::ClientError;
pub use subscription::{ProgressSubscription, ProgressWatcher};

// Silence unused dev-dependency warnings; the integration tests in tests/
// spin up the real server.
#[cfg(test)]
use axum as _;
#[cfg(test)]
use kordonia_axum as _;
#[cfg(test)]
use tokio_test as _;
