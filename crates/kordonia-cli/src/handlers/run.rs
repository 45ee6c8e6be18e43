//! Run command handler: push then watch.

use kordonia_client::{ApiClient, ProgressWatcher};

use crate::error::CliError;
use crate::handlers::watch::render_to_close;

/// Create a task and follow it to completion.
pub async fn execute(api: &ApiClient) -> Result<(), CliError> {
    let mut watcher = ProgressWatcher::new(api.clone());
    let task_id = watcher.push().await?;
    println!("Task {task_id}");
    render_to_close(&watcher).await;
    Ok(())
}
