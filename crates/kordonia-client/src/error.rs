//! Client-side error types.

use thiserror::Error;

/// Errors from the kordonia client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The base URL could not be parsed.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// Transport-level failure (connect, send, read).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP error {status}: {body}")]
    Http {
        /// Response status code.
        status: u16,
        /// Response body, if readable.
        body: String,
    },

    /// The server answered 2xx but the payload made no sense.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
