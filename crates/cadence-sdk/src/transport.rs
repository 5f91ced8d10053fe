//! Transport layer - JSON over HTTP
//!
//! Everything above this module talks to the API through [`Transport`], so
//! tests can swap in [`MockTransport`](crate::mock::MockTransport).

use crate::config::ClientConfig;
use crate::error::SdkError;
use serde_json::Value;
use std::future::Future;
use tracing::debug;

/// Minimal JSON API surface used by the SDK
///
/// Non-success statuses must come back as [`SdkError::Api`] so callers can
/// tell a 404 apart from other failures. An empty success body is `Null`.
pub trait Transport: Send + Sync {
    /// `GET path`
    fn get(&self, path: &str) -> impl Future<Output = Result<Value, SdkError>> + Send;

    /// `POST path` with a JSON body
    fn post(&self, path: &str, body: &Value)
        -> impl Future<Output = Result<Value, SdkError>> + Send;
}

/// reqwest-backed [`Transport`]
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport for the configured endpoint and timeout
    pub fn new(config: &ClientConfig) -> Result<Self, SdkError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SdkError::TransportError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Endpoint this transport talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read(response: reqwest::Response) -> Result<Value, SdkError> {
        let status = response.status();

        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            return Err(SdkError::from_error_body(status.as_u16(), &body));
        }

        let body = response.bytes().await?;
        if status == reqwest::StatusCode::NO_CONTENT || body.is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

impl Transport for HttpTransport {
    async fn get(&self, path: &str) -> Result<Value, SdkError> {
        let url = self.url(path);
        debug!(%url, "GET");
        let response = self.client.get(&url).send().await?;
        Self::read(response).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, SdkError> {
        let url = self.url(path);
        debug!(%url, "POST");
        let response = self.client.post(&url).json(body).send().await?;
        Self::read(response).await
    }
}
