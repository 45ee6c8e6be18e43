//! SSE events handler - per-task progress streaming.

use std::convert::Infallible;

use axum::extract::{Query, State};
use axum::response::sse::{Event, Sse};
use futures_util::stream::Stream;
use serde::Deserialize;

use crate::error::HttpError;
use crate::state::AppState;
use kordonia_core::TaskId;

/// Query parameters for `GET /stream`.
#[derive(Debug, Deserialize)]
pub struct StreamQuery {
    /// Identifier returned by `POST /push`.
    pub task_id: TaskId,
}

/// Stream one task's progress as server-sent events.
///
/// Unknown task ids get a 404 rather than an endless silent stream.
pub async fn stream(
    State(state): State<AppState>,
    Query(query): Query<StreamQuery>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>> + Send + 'static>, HttpError> {
    let sub = state.tasks.subscribe(&query.task_id).await?;
    Ok(crate::sse::subscribe(sub))
}
