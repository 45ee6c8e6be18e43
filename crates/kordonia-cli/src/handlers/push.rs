//! Push command handler.

use kordonia_client::ApiClient;

use crate::error::CliError;

/// Create a task and print its identifier.
///
/// The bare id on stdout makes the output easy to feed into `watch`.
pub async fn execute(api: &ApiClient) -> Result<(), CliError> {
    let task_id = api.create_task().await?;
    println!("{task_id}");
    Ok(())
}
