//! The task runner loop.
//!
//! Drives one task from 0 to 100 percent: sleep a tick, add a random step,
//! publish the new value. The runner writes to the task's watch snapshot
//! and broadcast channel and forwards to the shared emitter; it never
//! touches the registry's locks.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::sync::{broadcast, watch};

use crate::events::TaskEvent;
use crate::ports::TaskEventEmitter;

use super::types::{Progress, TaskId};

/// Pacing and step size for the task runner.
#[derive(Clone, Copy, Debug)]
pub struct RunnerConfig {
    /// Time between progress updates.
    pub tick: Duration,
    /// Minimum progress step per tick (inclusive).
    pub min_step: u32,
    /// Maximum progress step per tick (exclusive).
    pub max_step: u32,
}

impl Default for RunnerConfig {
    /// One tick per second, stepping 5..15 percent (the demo workload).
    fn default() -> Self {
        Self {
            tick: Duration::from_secs(1),
            min_step: 5,
            max_step: 15,
        }
    }
}

impl RunnerConfig {
    /// Config for tests: millisecond ticks, same step distribution.
    #[must_use]
    pub const fn fast() -> Self {
        Self {
            tick: Duration::from_millis(1),
            min_step: 5,
            max_step: 15,
        }
    }

    fn step(&self) -> u32 {
        if self.max_step > self.min_step {
            rand::thread_rng().gen_range(self.min_step..self.max_step)
        } else {
            self.min_step
        }
    }
}

/// Run one task to completion.
///
/// Progress is monotonically non-decreasing, the final update is exactly
/// 100, and `TaskCompleted` is sent exactly once, after the final update.
pub(super) async fn run(
    task_id: TaskId,
    config: RunnerConfig,
    events: broadcast::Sender<TaskEvent>,
    progress: watch::Sender<Progress>,
    emitter: Arc<dyn TaskEventEmitter>,
) {
    let mut percent: u32 = 0;
    while percent < 100 {
        tokio::time::sleep(config.tick).await;
        percent = (percent + config.step()).min(100);

        let value = Progress::new(f64::from(percent));
        // Send errors just mean nobody is listening right now.
        let _ = progress.send(value);
        let event = TaskEvent::progress(task_id.clone(), value);
        let _ = events.send(event.clone());
        emitter.emit(event);
    }

    let event = TaskEvent::completed(task_id);
    let _ = events.send(event.clone());
    emitter.emit(event);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::NoopEmitter;

    #[test]
    fn step_stays_within_configured_bounds() {
        let config = RunnerConfig::default();
        for _ in 0..1000 {
            let step = config.step();
            assert!((5..15).contains(&step));
        }
    }

    #[test]
    fn degenerate_step_range_falls_back_to_min() {
        let config = RunnerConfig {
            tick: Duration::from_millis(1),
            min_step: 10,
            max_step: 10,
        };
        assert_eq!(config.step(), 10);
    }

    #[tokio::test]
    async fn runner_reaches_exactly_one_hundred() {
        let (events_tx, mut events_rx) = broadcast::channel(256);
        let (progress_tx, progress_rx) = watch::channel(Progress::ZERO);

        run(
            TaskId::from("t-run"),
            RunnerConfig::fast(),
            events_tx,
            progress_tx,
            Arc::new(NoopEmitter::new()),
        )
        .await;

        assert_eq!(*progress_rx.borrow(), Progress::COMPLETE);

        // Progress events are non-decreasing and followed by exactly one
        // completion event.
        let mut last = Progress::ZERO;
        let mut completed = 0;
        while let Ok(event) = events_rx.try_recv() {
            match event {
                TaskEvent::TaskProgress { frame, .. } => {
                    assert_eq!(completed, 0, "progress after completion");
                    assert!(frame.progress >= last);
                    last = frame.progress;
                }
                TaskEvent::TaskCompleted { .. } => completed += 1,
                TaskEvent::TaskStarted { .. } => {}
            }
        }
        assert_eq!(completed, 1);
        assert!(last.is_complete());
    }
}
