//! Client configuration

use std::time::Duration;

/// Default API endpoint
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default timeout for API requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default time a cached query stays fresh (60 seconds)
pub const DEFAULT_STALE_AFTER_SECS: u64 = 60;

/// Settings shared by the transport and the query cache
///
/// # Examples
///
/// ```
/// use cadence_sdk::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::new("http://api.example.com")
///     .with_timeout(Duration::from_secs(5));
/// assert_eq!(config.timeout, Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, without a trailing slash
    pub base_url: String,

    /// Per-request timeout
    pub timeout: Duration,

    /// How long a cached query result is reused before re-fetching
    pub stale_after: Duration,
}

impl ClientConfig {
    /// Configuration for an endpoint with default timings
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the cache freshness window
    pub fn with_stale_after(mut self, stale_after: Duration) -> Self {
        self.stale_after = stale_after;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            stale_after: Duration::from_secs(DEFAULT_STALE_AFTER_SECS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = ClientConfig::new("http://localhost:8000/");
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }
}
