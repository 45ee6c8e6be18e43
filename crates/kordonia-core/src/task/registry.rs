//! Task registry - owns running and finished tasks.
//!
//! The registry spawns one runner per created task and keeps a handle so
//! later subscribers can attach. Finished tasks are retained: a client
//! that connects after completion gets the terminal snapshot instead of a
//! stream that never speaks.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{RwLock, broadcast, watch};

use crate::error::CoreError;
use crate::events::TaskEvent;
use crate::ports::TaskEventEmitter;

use super::runner::{self, RunnerConfig};
use super::types::{Progress, TaskId};

/// Buffered events per task. Slow subscribers may miss ticks if they lag
/// behind by more than this.
const EVENT_CHANNEL_CAPACITY: usize = 256;

struct TaskHandle {
    events: broadcast::Sender<TaskEvent>,
    progress: watch::Receiver<Progress>,
}

/// A subscription to one task's event feed.
#[derive(Debug)]
pub struct TaskSubscription {
    /// Progress at subscription time. Late subscribers start from here
    /// rather than from zero.
    pub initial: Progress,
    /// Live events from the runner. Closed once the task has completed.
    pub events: broadcast::Receiver<TaskEvent>,
}

/// Registry of tasks, keyed by [`TaskId`].
pub struct TaskRegistry {
    tasks: RwLock<HashMap<TaskId, TaskHandle>>,
    emitter: Arc<dyn TaskEventEmitter>,
    config: RunnerConfig,
}

impl TaskRegistry {
    /// Create a registry that forwards all events to `emitter`.
    pub fn new(config: RunnerConfig, emitter: Arc<dyn TaskEventEmitter>) -> Self {
        Self {
            tasks: RwLock::new(HashMap::new()),
            emitter,
            config,
        }
    }

    /// Create a registry with the default runner pacing and no listener.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(RunnerConfig::default(), Arc::new(crate::ports::NoopEmitter))
    }

    /// Create a new task and spawn its runner.
    ///
    /// Returns the fresh identifier; progress starts at zero.
    pub async fn create(&self) -> TaskId {
        let task_id = TaskId::generate();
        let (events_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let (progress_tx, progress_rx) = watch::channel(Progress::ZERO);

        self.emitter.emit(TaskEvent::started(task_id.clone()));

        tokio::spawn(runner::run(
            task_id.clone(),
            self.config,
            events_tx.clone(),
            progress_tx,
            Arc::clone(&self.emitter),
        ));

        let handle = TaskHandle {
            events: events_tx,
            progress: progress_rx,
        };
        self.tasks.write().await.insert(task_id.clone(), handle);

        task_id
    }

    /// Subscribe to a task's event feed.
    ///
    /// The returned subscription carries the current progress snapshot; the
    /// event channel of an already-completed task is closed so consumers
    /// terminate after the snapshot.
    pub async fn subscribe(&self, task_id: &TaskId) -> Result<TaskSubscription, CoreError> {
        let tasks = self.tasks.read().await;
        let handle = tasks
            .get(task_id)
            .ok_or_else(|| CoreError::TaskNotFound(task_id.clone()))?;

        // Attach before reading the snapshot: events published after this
        // point are delivered, and anything earlier is covered by `initial`.
        let live = handle.events.subscribe();
        let initial = *handle.progress.borrow();
        let events = if initial.is_complete() {
            closed_receiver()
        } else {
            live
        };

        Ok(TaskSubscription { initial, events })
    }

    /// Number of tasks the registry knows about (running or finished).
    pub async fn len(&self) -> usize {
        self.tasks.read().await.len()
    }

    /// Whether the registry holds no tasks.
    pub async fn is_empty(&self) -> bool {
        self.tasks.read().await.is_empty()
    }
}

/// A broadcast receiver whose channel is already closed.
fn closed_receiver() -> broadcast::Receiver<TaskEvent> {
    let (tx, rx) = broadcast::channel(1);
    drop(tx);
    rx
}
