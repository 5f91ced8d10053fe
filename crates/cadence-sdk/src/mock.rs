//! In-memory transport for deterministic testing
//!
//! Routes are registered per method and path; every call is recorded so
//! tests can assert how many requests were made and what was sent.
//!
//! # Examples
//!
//! ```
//! use cadence_sdk::mock::{MockTransport, Method};
//! use cadence_sdk::Transport;
//! use serde_json::json;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let transport = MockTransport::new();
//! transport.on_get("/api/clones", json!({"items": [], "total": 0}));
//!
//! let body = transport.get("/api/clones").await.unwrap();
//! assert_eq!(body["total"], 0);
//! assert_eq!(transport.calls_to(Method::Get, "/api/clones"), 1);
//! # });
//! ```

use crate::error::SdkError;
use crate::transport::Transport;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// HTTP method of a recorded call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
}

/// A call seen by the mock
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Method used
    pub method: Method,
    /// Request path
    pub path: String,
    /// JSON body, for POST
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
enum Reply {
    Json(Value),
    Error { status: u16, code: String, detail: String },
    Unreachable,
}

/// Mock [`Transport`] with shared state across clones
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    routes: Arc<Mutex<HashMap<(Method, String), Reply>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    latency: Option<Duration>,
}

impl MockTransport {
    /// Create a mock with no routes; unknown routes answer 404
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every reply, to observe in-flight behavior
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Answer `GET path` with a JSON body
    pub fn on_get(&self, path: impl Into<String>, body: Value) {
        self.route(Method::Get, path, Reply::Json(body));
    }

    /// Answer `GET path` with an API error
    pub fn on_get_error(&self, path: impl Into<String>, status: u16, code: &str, detail: &str) {
        self.route(Method::Get, path, error_reply(status, code, detail));
    }

    /// Answer `POST path` with a JSON body
    pub fn on_post(&self, path: impl Into<String>, body: Value) {
        self.route(Method::Post, path, Reply::Json(body));
    }

    /// Answer `POST path` with an API error
    pub fn on_post_error(&self, path: impl Into<String>, status: u16, code: &str, detail: &str) {
        self.route(Method::Post, path, error_reply(status, code, detail));
    }

    /// Fail `GET path` as if the server were unreachable
    pub fn fail_get(&self, path: impl Into<String>) {
        self.route(Method::Get, path, Reply::Unreachable);
    }

    /// Every call so far, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    /// Total number of calls
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Number of calls to one route
    pub fn calls_to(&self, method: Method, path: &str) -> usize {
        lock(&self.calls)
            .iter()
            .filter(|c| c.method == method && c.path == path)
            .count()
    }

    /// Forget recorded calls
    pub fn reset_calls(&self) {
        lock(&self.calls).clear();
    }

    fn route(&self, method: Method, path: impl Into<String>, reply: Reply) {
        lock(&self.routes).insert((method, path.into()), reply);
    }

    async fn respond(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, SdkError> {
        lock(&self.calls).push(RecordedCall {
            method,
            path: path.to_string(),
            body,
        });

        let reply = lock(&self.routes).get(&(method, path.to_string())).cloned();

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        match reply {
            Some(Reply::Json(value)) => Ok(value),
            Some(Reply::Error { status, code, detail }) => Err(SdkError::Api { status, code, detail }),
            Some(Reply::Unreachable) => Err(SdkError::ConnectionError(format!(
                "Connection refused: {}",
                path
            ))),
            None => Err(SdkError::Api {
                status: 404,
                code: "NOT_FOUND".to_string(),
                detail: format!("No mock route for {}", path),
            }),
        }
    }
}

impl Transport for MockTransport {
    async fn get(&self, path: &str) -> Result<Value, SdkError> {
        self.respond(Method::Get, path, None).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, SdkError> {
        self.respond(Method::Post, path, Some(body.clone())).await
    }
}

fn error_reply(status: u16, code: &str, detail: &str) -> Reply {
    Reply::Error {
        status,
        code: code.to_string(),
        detail: detail.to_string(),
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let transport = MockTransport::new();
        let err = transport.get("/nope").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_clones_share_call_log() {
        let transport = MockTransport::new();
        let other = transport.clone();
        transport.on_post("/x", json!({}));

        other.post("/x", &json!({"a": 1})).await.unwrap();

        assert_eq!(transport.call_count(), 1);
        assert_eq!(transport.calls()[0].body, Some(json!({"a": 1})));
    }

    #[tokio::test]
    async fn test_unreachable_route() {
        let transport = MockTransport::new();
        transport.fail_get("/down");
        assert!(matches!(
            transport.get("/down").await,
            Err(SdkError::ConnectionError(_))
        ));
    }
}
