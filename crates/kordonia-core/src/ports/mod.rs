//! Port definitions (trait abstractions) for adapters.
//!
//! Ports define the interfaces the core domain expects from infrastructure.
//! They contain no transport details and use only domain types.

pub mod event_emitter;

pub use event_emitter::{NoopEmitter, TaskEventEmitter, TracingEmitter};
