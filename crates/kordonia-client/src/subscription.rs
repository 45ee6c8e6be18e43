//! Progress subscription lifecycle.
//!
//! [`ProgressSubscription`] owns one task's event stream; at most one
//! exists per task identifier. [`ProgressWatcher`] ties the pieces
//! together the way a page would: trigger, store the identifier, watch.

use futures_util::stream::Stream;
use futures_util::StreamExt;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use kordonia_core::events::ProgressFrame;
use kordonia_core::task::{Progress, TaskId};

use crate::api::ApiClient;
use crate::error::ClientError;

/// An active subscription to one task's progress stream.
///
/// A reader task consumes the frame stream and publishes the latest
/// progress through a watch channel. The subscription closes itself when
/// a frame reports completion; [`close`](Self::close) and dropping close
/// it early. Closing is idempotent, and a closed subscription cannot be
/// reopened - construct a new one instead.
///
/// Stream errors are logged and otherwise ignored: no retry, no
/// reconnection, no user-visible failure state.
pub struct ProgressSubscription {
    task_id: TaskId,
    progress: watch::Receiver<Progress>,
    cancel: CancellationToken,
}

impl ProgressSubscription {
    /// Spawn a reader over `frames` for `task_id`.
    ///
    /// The published progress starts at zero, before any frame arrives.
    pub fn spawn<S>(task_id: TaskId, frames: S) -> Self
    where
        S: Stream<Item = Result<ProgressFrame, ClientError>> + Send + 'static,
    {
        let (tx, rx) = watch::channel(Progress::ZERO);
        let cancel = CancellationToken::new();

        let reader_cancel = cancel.clone();
        let reader_id = task_id.clone();
        tokio::spawn(async move {
            let mut frames = std::pin::pin!(frames);
            loop {
                tokio::select! {
                    () = reader_cancel.cancelled() => break,
                    next = frames.next() => match next {
                        Some(Ok(frame)) => {
                            let _ = tx.send(frame.progress);
                            if frame.is_complete() {
                                // Proactively close; the server may keep
                                // sending or close on its own.
                                reader_cancel.cancel();
                                break;
                            }
                        }
                        Some(Err(e)) => {
                            tracing::warn!(task_id = %reader_id, "Progress stream error: {e}");
                        }
                        None => {
                            // Server closed the stream.
                            reader_cancel.cancel();
                            break;
                        }
                    }
                }
            }
        });

        Self {
            task_id,
            progress: rx,
            cancel,
        }
    }

    /// The task this subscription watches.
    #[must_use]
    pub fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// The most recently received progress value.
    #[must_use]
    pub fn progress(&self) -> Progress {
        *self.progress.borrow()
    }

    /// A receiver that observes every progress change.
    ///
    /// `changed()` fails once the subscription has closed and the last
    /// value has been observed.
    #[must_use]
    pub fn updates(&self) -> watch::Receiver<Progress> {
        self.progress.clone()
    }

    /// Whether the subscription has been closed (by completion, by
    /// [`close`](Self::close), or by the server ending the stream).
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Close the subscription. A no-op if already closed.
    pub fn close(&self) {
        self.cancel.cancel();
    }

    /// Resolves once the subscription has closed.
    pub async fn closed(&self) {
        self.cancel.cancelled().await;
    }
}

impl Drop for ProgressSubscription {
    fn drop(&mut self) {
        // The cleanup path that runs on every exit.
        self.cancel.cancel();
    }
}

/// Client-side task state: an optional identifier plus the subscription
/// watching it.
///
/// Invariant: a subscription exists if and only if a task identifier is
/// set. [`set_task`](Self::set_task) tears the previous stream down
/// before opening the next one.
pub struct ProgressWatcher {
    api: ApiClient,
    task_id: Option<TaskId>,
    subscription: Option<ProgressSubscription>,
}

impl ProgressWatcher {
    /// Create a watcher with no task.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self {
            api,
            task_id: None,
            subscription: None,
        }
    }

    /// Trigger a task and start watching it.
    ///
    /// Returns the identifier the server handed back.
    pub async fn push(&mut self) -> Result<TaskId, ClientError> {
        let task_id = self.api.create_task().await?;
        self.set_task(task_id.clone()).await?;
        Ok(task_id)
    }

    /// Switch to a task: close any previous stream, reset progress to
    /// zero, open the new stream.
    pub async fn set_task(&mut self, task_id: TaskId) -> Result<(), ClientError> {
        self.clear();
        let frames = self.api.stream_progress(&task_id).await?;
        self.subscription = Some(ProgressSubscription::spawn(task_id.clone(), frames));
        self.task_id = Some(task_id);
        Ok(())
    }

    /// Drop the current task and close its stream, if any.
    pub fn clear(&mut self) {
        self.task_id = None;
        if let Some(subscription) = self.subscription.take() {
            subscription.close();
        }
    }

    /// The identifier currently watched.
    #[must_use]
    pub fn task_id(&self) -> Option<&TaskId> {
        self.task_id.as_ref()
    }

    /// The displayed progress: zero before any task is set.
    #[must_use]
    pub fn progress(&self) -> Progress {
        self.subscription
            .as_ref()
            .map_or(Progress::ZERO, ProgressSubscription::progress)
    }

    /// The active subscription, if a task is set.
    #[must_use]
    pub fn subscription(&self) -> Option<&ProgressSubscription> {
        self.subscription.as_ref()
    }

    /// A change receiver for the active subscription.
    #[must_use]
    pub fn updates(&self) -> Option<watch::Receiver<Progress>> {
        self.subscription
            .as_ref()
            .map(ProgressSubscription::updates)
    }
}
