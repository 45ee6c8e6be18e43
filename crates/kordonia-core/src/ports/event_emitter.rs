//! Event emitter trait for cross-crate event broadcasting.
//!
//! The task registry forwards every [`TaskEvent`] to one of these. The
//! per-task SSE streams have their own channels; this port exists for
//! listeners that want the whole firehose (logging, future transports).

use crate::events::TaskEvent;

/// Trait for emitting task events.
///
/// Implementations handle transport details (logging, channels, SSE).
/// `emit` must not block; buffer or drop instead.
pub trait TaskEventEmitter: Send + Sync {
    /// Emit a task event.
    fn emit(&self, event: TaskEvent);

    /// Clone this emitter into a boxed trait object.
    ///
    /// This enables cloning of `Arc<dyn TaskEventEmitter>` without requiring
    /// the underlying type to implement Clone.
    fn clone_box(&self) -> Box<dyn TaskEventEmitter>;
}

/// A no-op event emitter for tests and contexts without listeners.
#[derive(Debug, Clone, Default)]
pub struct NoopEmitter;

impl NoopEmitter {
    /// Create a new no-op emitter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl TaskEventEmitter for NoopEmitter {
    fn emit(&self, _event: TaskEvent) {
        // Intentionally do nothing
    }

    fn clone_box(&self) -> Box<dyn TaskEventEmitter> {
        Box::new(self.clone())
    }
}

/// Emitter that logs every event through `tracing`.
///
/// The server wires this in so each task tick shows up in the log, one line
/// per event.
#[derive(Debug, Clone, Default)]
pub struct TracingEmitter;

impl TracingEmitter {
    /// Create a new tracing emitter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl TaskEventEmitter for TracingEmitter {
    fn emit(&self, event: TaskEvent) {
        match &event {
            TaskEvent::TaskProgress { task_id, frame } => {
                tracing::info!(
                    target: "kordonia.task",
                    task_id = %task_id,
                    progress = frame.progress.value(),
                    "{}", event.event_name(),
                );
            }
            TaskEvent::TaskStarted { task_id } | TaskEvent::TaskCompleted { task_id } => {
                tracing::info!(
                    target: "kordonia.task",
                    task_id = %task_id,
                    "{}", event.event_name(),
                );
            }
        }
    }

    fn clone_box(&self) -> Box<dyn TaskEventEmitter> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn noop_emitter_discards_events() {
        let emitter = NoopEmitter::new();

        // Should not panic
        emitter.emit(TaskEvent::started("t-1"));
    }

    #[test]
    fn emitters_clone_into_boxes() {
        let _boxed: Box<dyn TaskEventEmitter> = NoopEmitter::new().clone_box();
        let _boxed: Box<dyn TaskEventEmitter> = TracingEmitter::new().clone_box();
    }

    #[test]
    fn arc_emitter_is_usable() {
        let emitter: Arc<dyn TaskEventEmitter> = Arc::new(NoopEmitter::new());
        emitter.emit(TaskEvent::completed("t-1"));
    }
}
