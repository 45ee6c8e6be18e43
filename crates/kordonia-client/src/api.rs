//! HTTP API client for the kordonia server.

use futures_util::stream::Stream;
use reqwest::Url;
use serde::Deserialize;

use kordonia_core::events::ProgressFrame;
use kordonia_core::task::TaskId;

use crate::error::ClientError;
use crate::sse;

/// Where the server lives unless told otherwise.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

/// Response body of `POST /push`.
#[derive(Debug, Deserialize)]
struct CreateTaskResponse {
    task_id: TaskId,
}

/// Client for the two task endpoints.
///
/// Cheap to clone; the underlying `reqwest::Client` is reference-counted.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client against the given base URL.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ClientError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
        })
    }

    /// Create a client against [`DEFAULT_BASE_URL`].
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_BASE_URL).expect("default base URL is valid")
    }

    /// The base URL this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn request_url(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidBaseUrl(format!("{path}: {e}")))
    }

    /// Create a task on the server.
    ///
    /// Returns the opaque identifier to subscribe with.
    pub async fn create_task(&self) -> Result<TaskId, ClientError> {
        let url = self.request_url("/push")?;
        let response = self.http.post(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Http {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let body: CreateTaskResponse = response.json().await.map_err(|e| {
            ClientError::InvalidResponse(format!("Failed to parse task response: {e}"))
        })?;

        Ok(body.task_id)
    }

    /// Open the progress event stream for one task.
    ///
    /// Returns the parsed frames; transport and parse failures surface as
    /// item-level errors. The stream ends when the server closes the
    /// connection.
    pub async fn stream_progress(
        &self,
        task_id: &TaskId,
    ) -> Result<
        impl Stream<Item = Result<ProgressFrame, ClientError>> + std::fmt::Debug + Send + 'static,
        ClientError,
    > {
        let url = self.request_url("/stream")?;
        let response = self
            .http
            .get(url)
            .query(&[("task_id", task_id.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Http {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        Ok(sse::frames(response.bytes_stream()))
    }
}
