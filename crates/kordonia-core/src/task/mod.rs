//! Server-side task execution.
//!
//! A task is a unit of simulated work that advances a percentage until it
//! reaches 100. [`TaskRegistry`] owns the running tasks and hands out
//! per-task subscriptions; [`runner`] is the loop that drives one task.

mod registry;
mod runner;
mod types;

pub use registry::{TaskRegistry, TaskSubscription};
pub use runner::RunnerConfig;
pub use types::{COMPLETION_EPSILON, Progress, TaskId};
