//! SSE stream assembly for task progress.
//!
//! Turns a [`TaskSubscription`] into the event stream served on
//! `GET /stream`: the current snapshot first, then one event per progress
//! tick, ending after the terminal (100%) frame.

use std::convert::Infallible;

use axum::response::sse::{Event, KeepAlive, Sse};
use futures_util::stream::{Stream, StreamExt};
use tokio::sync::broadcast;

use kordonia_core::events::{ProgressFrame, TaskEvent};
use kordonia_core::task::TaskSubscription;

/// Keep-alive ping interval, so proxies do not drop slow tasks.
const KEEP_ALIVE_SECS: u64 = 30;

struct StreamState {
    events: broadcast::Receiver<TaskEvent>,
    pending: Option<ProgressFrame>,
    done: bool,
}

/// The ordered progress frames for one subscription.
///
/// Starts with the snapshot taken at subscription time and ends after the
/// first complete (100%) frame, or earlier if the channel closes.
fn frame_stream(sub: TaskSubscription) -> impl Stream<Item = ProgressFrame> + Send + 'static {
    let state = StreamState {
        events: sub.events,
        pending: Some(ProgressFrame::now(sub.initial)),
        done: false,
    };

    futures_util::stream::unfold(state, |mut state| async move {
        if state.done {
            return None;
        }

        // The snapshot frame goes out before anything from the channel.
        if let Some(frame) = state.pending.take() {
            state.done = frame.is_complete();
            return Some((frame, state));
        }

        loop {
            match state.events.recv().await {
                Ok(TaskEvent::TaskProgress { frame, .. }) => {
                    state.done = frame.is_complete();
                    return Some((frame, state));
                }
                // Completion closes the stream; the 100% frame preceded it.
                Ok(TaskEvent::TaskCompleted { .. }) => return None,
                Ok(TaskEvent::TaskStarted { .. }) => {}
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    // Skipped ticks are fine, progress is monotonic.
                    tracing::debug!(missed, "SSE subscriber lagged, skipping ticks");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    })
}

/// Build the SSE response for one subscription.
pub fn subscribe(
    sub: TaskSubscription,
) -> Sse<impl Stream<Item = Result<Event, Infallible>> + Send + 'static> {
    let stream = frame_stream(sub).map(|frame| frame_event(&frame));

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(std::time::Duration::from_secs(KEEP_ALIVE_SECS))
            .text("ping"),
    )
}

fn frame_event(frame: &ProgressFrame) -> Result<Event, Infallible> {
    match serde_json::to_string(frame) {
        Ok(json) => Ok(Event::default().data(json)),
        Err(e) => {
            // A frame is two scalar fields; this should never happen.
            tracing::warn!("Failed to serialize progress frame: {e}");
            Ok(Event::default().comment("serialization error"))
        }
    }
}
