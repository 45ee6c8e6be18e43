//! Canonical event union for task lifecycle events.
//!
//! This module is the single source of truth for events shared by the
//! task runner, the SSE handlers, and the client.
//!
//! # Wire Format
//!
//! Only [`ProgressFrame`] crosses the wire: each SSE `data:` payload is one
//! frame, e.g.
//!
//! ```json
//! { "time": "2026-08-29T12:00:00+00:00", "progress": 42 }
//! ```
//!
//! Clients are required to understand `progress` only; `time` is
//! informational and optional.

use serde::{Deserialize, Serialize};

use crate::task::{Progress, TaskId};

/// The SSE data payload for one progress update.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProgressFrame {
    /// Percent completion in `[0, 100]`.
    pub progress: Progress,
    /// Server-side timestamp (RFC 3339). Absent frames still parse.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

impl ProgressFrame {
    /// Create a frame stamped with the current server time.
    #[must_use]
    pub fn now(progress: Progress) -> Self {
        Self {
            progress,
            time: Some(chrono::Utc::now().to_rfc3339()),
        }
    }

    /// Create a frame without a timestamp.
    #[must_use]
    pub const fn bare(progress: Progress) -> Self {
        Self {
            progress,
            time: None,
        }
    }

    /// Whether this frame reports a completed task.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.progress.is_complete()
    }
}

/// Canonical event types for all adapters.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskEvent {
    /// A task has been created and its runner spawned.
    TaskStarted {
        /// Identifier of the task.
        task_id: TaskId,
    },

    /// A progress update for a running task.
    TaskProgress {
        /// Identifier of the task.
        task_id: TaskId,
        /// The progress payload as it will appear on the wire.
        frame: ProgressFrame,
    },

    /// The task reached 100% and its runner exited.
    TaskCompleted {
        /// Identifier of the task.
        task_id: TaskId,
    },
}

impl TaskEvent {
    /// Create a task started event.
    pub fn started(task_id: impl Into<TaskId>) -> Self {
        Self::TaskStarted {
            task_id: task_id.into(),
        }
    }

    /// Create a progress event stamped with the current time.
    pub fn progress(task_id: impl Into<TaskId>, progress: Progress) -> Self {
        Self::TaskProgress {
            task_id: task_id.into(),
            frame: ProgressFrame::now(progress),
        }
    }

    /// Create a task completed event.
    pub fn completed(task_id: impl Into<TaskId>) -> Self {
        Self::TaskCompleted {
            task_id: task_id.into(),
        }
    }

    /// Get the task ID from any event type.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        match self {
            Self::TaskStarted { task_id }
            | Self::TaskProgress { task_id, .. }
            | Self::TaskCompleted { task_id } => task_id,
        }
    }

    /// Get the event name for wire protocols and logging.
    #[must_use]
    pub const fn event_name(&self) -> &'static str {
        match self {
            Self::TaskStarted { .. } => "task:started",
            Self::TaskProgress { .. } => "task:progress",
            Self::TaskCompleted { .. } => "task:completed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_wire_format_carries_progress_field() {
        let frame = ProgressFrame::now(Progress::new(42.0));
        let json = serde_json::to_string(&frame).unwrap();
        assert!(json.contains("\"progress\":42.0"));
        assert!(json.contains("\"time\":"));
    }

    #[test]
    fn frame_parses_without_time_field() {
        let frame: ProgressFrame = serde_json::from_str(r#"{"progress": 73}"#).unwrap();
        assert_eq!(frame.progress.value(), 73.0);
        assert!(frame.time.is_none());
    }

    #[test]
    fn event_serialization_is_tagged() {
        let event = TaskEvent::started("t-1");
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"task_started\""));
        assert!(json.contains("\"task_id\":\"t-1\""));
    }

    #[test]
    fn event_names_are_stable() {
        assert_eq!(TaskEvent::started("t").event_name(), "task:started");
        assert_eq!(
            TaskEvent::progress("t", Progress::new(10.0)).event_name(),
            "task:progress"
        );
        assert_eq!(TaskEvent::completed("t").event_name(), "task:completed");
    }

    #[test]
    fn event_id_extraction() {
        let event = TaskEvent::completed("t-9");
        assert_eq!(event.task_id().as_str(), "t-9");
    }
}
