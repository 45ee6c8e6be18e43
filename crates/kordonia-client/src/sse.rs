//! Server-sent event parsing for progress streams.
//!
//! Buffers incoming byte chunks, splits on newlines, and parses `data:`
//! lines as JSON [`ProgressFrame`]s:
//!
//! ```text
//! data: {"time":"...","progress":12}
//!
//! data: {"time":"...","progress":25}
//! ```
//!
//! Comments (keep-alive pings) and non-`data` fields are skipped.

use std::collections::VecDeque;
use std::pin::Pin;

use futures_util::stream::Stream;

use kordonia_core::events::ProgressFrame;

use crate::error::ClientError;

struct ParserState<S> {
    inner: Pin<Box<S>>,
    buffer: String,
    pending: VecDeque<Result<ProgressFrame, ClientError>>,
}

/// Opaque wrapper so the frame stream can implement `Debug`.
struct FrameStream {
    inner: Pin<Box<dyn Stream<Item = Result<ProgressFrame, ClientError>> + Send + 'static>>,
}

impl std::fmt::Debug for FrameStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameStream").finish_non_exhaustive()
    }
}

impl Stream for FrameStream {
    type Item = Result<ProgressFrame, ClientError>;

    fn poll_next(
        mut self: Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

/// Parse a raw byte stream (a reqwest response body) into progress frames.
pub(crate) fn frames<S>(
    byte_stream: S,
) -> impl Stream<Item = Result<ProgressFrame, ClientError>> + std::fmt::Debug + Send + 'static
where
    S: Stream<Item = Result<bytes::Bytes, reqwest::Error>> + Send + 'static,
{
    let state = ParserState {
        inner: Box::pin(byte_stream),
        buffer: String::new(),
        pending: VecDeque::new(),
    };

    let stream = futures_util::stream::unfold(state, |mut state| async move {
        // Flush already-parsed frames first (FIFO order)
        if let Some(frame) = state.pending.pop_front() {
            return Some((frame, state));
        }

        loop {
            use futures_util::StreamExt;
            match state.inner.next().await {
                Some(Ok(chunk)) => {
                    state.buffer.push_str(&String::from_utf8_lossy(&chunk));

                    // Process complete lines
                    while let Some(pos) = state.buffer.find('\n') {
                        let line = state.buffer[..pos].to_string();
                        state.buffer = state.buffer[pos + 1..].to_string();

                        if let Some(frame) = parse_sse_line(&line) {
                            state.pending.push_back(frame);
                        }
                    }

                    if let Some(frame) = state.pending.pop_front() {
                        return Some((frame, state));
                    }
                    // No complete event yet, keep reading
                }
                Some(Err(e)) => {
                    return Some((Err(ClientError::Network(e)), state));
                }
                None => {
                    // Stream ended; a final unterminated line may remain.
                    if !state.buffer.is_empty() {
                        let remaining = std::mem::take(&mut state.buffer);
                        if let Some(frame) = parse_sse_line(&remaining) {
                            return Some((frame, state));
                        }
                    }
                    return None;
                }
            }
        }
    });

    FrameStream {
        inner: Box::pin(stream),
    }
}

/// Parse a single SSE line into an optional progress frame.
///
/// Returns `None` for empty lines, comments, and non-data fields.
fn parse_sse_line(line: &str) -> Option<Result<ProgressFrame, ClientError>> {
    let trimmed = line.trim_end_matches('\r');

    // Empty lines separate events; lines starting with ':' are comments
    // (the server uses them as keep-alive pings).
    if trimmed.is_empty() || trimmed.starts_with(':') {
        return None;
    }

    let data = trimmed.strip_prefix("data:")?.trim_start();

    match serde_json::from_str::<ProgressFrame>(data) {
        Ok(frame) => Some(Ok(frame)),
        Err(e) => Some(Err(ClientError::InvalidResponse(format!(
            "Failed to parse SSE event: {e} (data: {data})"
        )))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    fn byte_chunks(chunks: &[&str]) -> impl Stream<Item = Result<bytes::Bytes, reqwest::Error>> {
        let owned: Vec<Result<bytes::Bytes, reqwest::Error>> = chunks
            .iter()
            .map(|c| Ok(bytes::Bytes::copy_from_slice(c.as_bytes())))
            .collect();
        futures_util::stream::iter(owned)
    }

    #[test]
    fn empty_and_comment_lines_are_skipped() {
        assert!(parse_sse_line("").is_none());
        assert!(parse_sse_line("   ").is_none());
        assert!(parse_sse_line(": ping").is_none());
    }

    #[test]
    fn non_data_fields_are_skipped() {
        assert!(parse_sse_line("event: message").is_none());
        assert!(parse_sse_line("id: 123").is_none());
        assert!(parse_sse_line("retry: 5000").is_none());
    }

    #[test]
    fn data_line_parses_progress() {
        let frame = parse_sse_line(r#"data: {"progress": 42}"#).unwrap().unwrap();
        assert_eq!(frame.progress.value(), 42.0);
    }

    #[test]
    fn data_line_without_space_parses() {
        let frame = parse_sse_line(r#"data:{"progress": 7}"#).unwrap().unwrap();
        assert_eq!(frame.progress.value(), 7.0);
    }

    #[test]
    fn invalid_json_is_an_item_error() {
        let result = parse_sse_line("data: not-json").unwrap();
        assert!(matches!(result, Err(ClientError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn whole_events_in_one_chunk() {
        let stream = frames(byte_chunks(&[
            "data: {\"progress\": 10}\n\ndata: {\"progress\": 20}\n\n",
        ]));
        let values: Vec<f64> = stream
            .map(|r| r.unwrap().progress.value())
            .collect()
            .await;
        assert_eq!(values, vec![10.0, 20.0]);
    }

    #[tokio::test]
    async fn events_split_across_chunks() {
        let stream = frames(byte_chunks(&[
            "data: {\"prog",
            "ress\": 55}\n\nda",
            "ta: {\"progress\": 60}\n",
        ]));
        let values: Vec<f64> = stream
            .map(|r| r.unwrap().progress.value())
            .collect()
            .await;
        assert_eq!(values, vec![55.0, 60.0]);
    }

    #[tokio::test]
    async fn final_unterminated_line_is_parsed() {
        let stream = frames(byte_chunks(&["data: {\"progress\": 100}"]));
        let values: Vec<f64> = stream
            .map(|r| r.unwrap().progress.value())
            .collect()
            .await;
        assert_eq!(values, vec![100.0]);
    }

    #[tokio::test]
    async fn comments_and_blank_lines_between_events() {
        let stream = frames(byte_chunks(&[
            ": ping\n\ndata: {\"progress\": 30}\n\n: ping\n\n",
        ]));
        let values: Vec<f64> = stream
            .map(|r| r.unwrap().progress.value())
            .collect()
            .await;
        assert_eq!(values, vec![30.0]);
    }
}
