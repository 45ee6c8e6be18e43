//! Task handlers - task creation.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::state::AppState;
use kordonia_core::TaskId;

/// Response from `POST /push`.
///
/// The `task_id` field is the contract with clients; they treat the value
/// as opaque.
#[derive(Debug, Serialize, Deserialize)]
pub struct PushResponse {
    /// Identifier of the newly created task.
    pub task_id: TaskId,
}

/// Create a task and start running it.
pub async fn push(State(state): State<AppState>) -> Json<PushResponse> {
    let task_id = state.tasks.create().await;
    tracing::info!(task_id = %task_id, "Task created");
    Json(PushResponse { task_id })
}
