//! Cadence client implementation.

use crate::aggregator::{ProfileAggregator, ProfileOutcome};
use crate::api::{CloneList, CloneResponse, CLONES_PATH};
use crate::cache::{QueryCache, QueryKey};
use crate::config::ClientConfig;
use crate::error::SdkError;
use crate::merge::{MergeSubmitter, SubmissionState};
use crate::transport::{HttpTransport, Transport};
use cadence_domain::{CloneId, WeightMatrix};
use std::sync::Arc;
use tracing::debug;

/// Cadence SDK client
///
/// Owns one transport and one query cache, shared by the profile
/// aggregator and the merge submitter.
pub struct CadenceClient<T = HttpTransport> {
    transport: Arc<T>,
    cache: Arc<QueryCache>,
    aggregator: ProfileAggregator<T>,
    submitter: MergeSubmitter<T>,
}

impl CadenceClient<HttpTransport> {
    /// Create an HTTP client for an endpoint with default settings
    pub fn new(base_url: &str) -> Result<Self, SdkError> {
        Self::from_config(ClientConfig::new(base_url))
    }

    /// Create an HTTP client from a full configuration
    pub fn from_config(config: ClientConfig) -> Result<Self, SdkError> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(transport, &config))
    }
}

impl<T: Transport> CadenceClient<T> {
    /// Create a client over any transport
    pub fn with_transport(transport: T, config: &ClientConfig) -> Self {
        let transport = Arc::new(transport);
        let cache = Arc::new(QueryCache::new(config.stale_after));

        Self {
            aggregator: ProfileAggregator::new(Arc::clone(&transport), Arc::clone(&cache)),
            submitter: MergeSubmitter::new(Arc::clone(&transport), Arc::clone(&cache)),
            transport,
            cache,
        }
    }

    /// List clones, reusing the cached list while it is fresh
    pub async fn list_clones(&self) -> Result<CloneList, SdkError> {
        if let Some(cached) = self.cache.get_fresh(&QueryKey::ClonesList) {
            debug!("Clone list served from cache");
            return Ok(serde_json::from_value(cached)?);
        }

        let body = self.transport.get(CLONES_PATH).await?;
        let list: CloneList = serde_json::from_value(body.clone())?;
        self.cache.insert(QueryKey::ClonesList, body);
        Ok(list)
    }

    /// Fetch DNA profiles for several sources concurrently
    pub async fn fetch_profiles(&self, ids: &[CloneId]) -> Vec<(CloneId, ProfileOutcome)> {
        self.aggregator.fetch_profiles(ids).await
    }

    /// Fetch one source's DNA profile
    pub async fn fetch_profile(&self, clone_id: &CloneId) -> ProfileOutcome {
        self.aggregator.fetch_profile(clone_id).await
    }

    /// Submit a merge of the matrix under `name`
    pub async fn merge(&self, name: &str, matrix: &WeightMatrix) -> Result<CloneResponse, SdkError> {
        self.submitter.submit(name, matrix).await
    }

    /// State of the latest merge attempt
    pub fn submission_state(&self) -> SubmissionState {
        self.submitter.state()
    }

    /// Shared query cache
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }
}
