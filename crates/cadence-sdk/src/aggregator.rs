//! Profile fetch aggregator
//!
//! Fetches the DNA profile of every requested source concurrently and
//! reports each one independently. A 404 means "not analyzed yet" and is
//! reported as [`ProfileOutcome::Absent`], never as an error.

use crate::api::{decode_profile, dna_path, is_missing_dna};
use crate::cache::{QueryCache, QueryKey};
use crate::error::SdkError;
use crate::transport::Transport;
use cadence_domain::{CloneId, SourceProfile};
use futures::future::join_all;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Result of looking up one source's profile
#[derive(Debug)]
pub enum ProfileOutcome {
    /// The source has a profile
    Present(SourceProfile),
    /// The source exists but has not been analyzed yet
    Absent,
    /// The lookup failed; only this source is affected
    Failed(SdkError),
}

impl ProfileOutcome {
    /// The profile, when present
    pub fn profile(&self) -> Option<&SourceProfile> {
        match self {
            ProfileOutcome::Present(profile) => Some(profile),
            _ => None,
        }
    }

    /// Whether the source has a profile
    pub fn is_present(&self) -> bool {
        matches!(self, ProfileOutcome::Present(_))
    }

    /// Whether the source has no profile yet
    pub fn is_absent(&self) -> bool {
        matches!(self, ProfileOutcome::Absent)
    }

    /// The error, when the lookup failed
    pub fn error(&self) -> Option<&SdkError> {
        match self {
            ProfileOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Fan-out/fan-in DNA fetcher
///
/// Results are cached per source; failures are not.
pub struct ProfileAggregator<T> {
    transport: Arc<T>,
    cache: Arc<QueryCache>,
}

impl<T: Transport> ProfileAggregator<T> {
    /// Create an aggregator sharing a transport and cache
    pub fn new(transport: Arc<T>, cache: Arc<QueryCache>) -> Self {
        Self { transport, cache }
    }

    /// Fetch every profile concurrently
    ///
    /// Results are in input order with duplicates removed. Dropping the
    /// future discards every pending fetch.
    pub async fn fetch_profiles(&self, ids: &[CloneId]) -> Vec<(CloneId, ProfileOutcome)> {
        let mut unique: Vec<&CloneId> = Vec::with_capacity(ids.len());
        for id in ids {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }

        let futures = unique.into_iter().map(|id| async move {
            let outcome = self.fetch_profile(id).await;
            (id.clone(), outcome)
        });

        join_all(futures).await
    }

    /// Fetch a single profile, reusing a fresh cached result
    pub async fn fetch_profile(&self, clone_id: &CloneId) -> ProfileOutcome {
        let key = QueryKey::Dna(clone_id.clone());

        if let Some(cached) = self.cache.get_fresh(&key) {
            debug!(clone_id = %clone_id, "DNA served from cache");
            return match cached {
                Value::Null => ProfileOutcome::Absent,
                body => into_outcome(clone_id, &body),
            };
        }

        match self.transport.get(&dna_path(clone_id)).await {
            Ok(body) if is_missing_dna(&body) => {
                debug!(clone_id = %clone_id, "Empty DNA body");
                self.cache.insert(key, Value::Null);
                ProfileOutcome::Absent
            }
            Ok(body) => {
                let outcome = into_outcome(clone_id, &body);
                if outcome.is_present() {
                    self.cache.insert(key, body);
                }
                outcome
            }
            Err(e) if e.is_not_found() => {
                debug!(clone_id = %clone_id, "No DNA yet");
                self.cache.insert(key, Value::Null);
                ProfileOutcome::Absent
            }
            Err(e) => {
                warn!(clone_id = %clone_id, error = %e, "DNA fetch failed");
                ProfileOutcome::Failed(e)
            }
        }
    }
}

fn into_outcome(clone_id: &CloneId, body: &Value) -> ProfileOutcome {
    match decode_profile(clone_id.clone(), body) {
        Ok(profile) => ProfileOutcome::Present(profile),
        Err(e) => {
            warn!(clone_id = %clone_id, error = %e, "Undecodable DNA body");
            ProfileOutcome::Failed(e)
        }
    }
}
