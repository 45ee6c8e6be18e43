//! Watch command handler.

use kordonia_client::{ApiClient, ProgressWatcher};
use kordonia_core::task::TaskId;

use crate::error::CliError;
use crate::progress::ProgressPrinter;

/// Follow an existing task's progress until its stream closes.
pub async fn execute(api: &ApiClient, task_id: TaskId) -> Result<(), CliError> {
    let mut watcher = ProgressWatcher::new(api.clone());
    watcher.set_task(task_id).await?;
    render_to_close(&watcher).await;
    Ok(())
}

/// Drive the progress display until the subscription closes.
///
/// Prints a warning if the stream ends short of 100%; there is no
/// reconnection, so the task may still be running server-side.
pub(crate) async fn render_to_close(watcher: &ProgressWatcher) {
    let Some(mut updates) = watcher.updates() else {
        return;
    };

    let mut printer = ProgressPrinter::new();
    printer.update(*updates.borrow());
    while updates.changed().await.is_ok() {
        printer.update(*updates.borrow());
    }
    printer.finish();

    let last = *updates.borrow();
    if !last.is_complete() {
        tracing::debug!("stream closed early at {}", last.value());
        eprintln!(
            "Warning: stream ended at {:.0}% before completion (no reconnection attempted)",
            last.value()
        );
    }
}
