//! Merge submission
//!
//! One submitter, one request at a time. The lifecycle of an attempt is
//! `Idle -> Submitting -> Succeeded | Failed`; a new attempt may start from
//! any state except `Submitting`.

use crate::api::{CloneResponse, MergeRequest, MERGE_PATH};
use crate::cache::{QueryCache, QueryKey};
use crate::error::SdkError;
use crate::transport::Transport;
use cadence_domain::WeightMatrix;
use serde_json::Value;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Where the latest submission attempt stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SubmissionState {
    /// Nothing submitted yet, or the last attempt was abandoned
    Idle = 0,
    /// A request is in flight
    Submitting = 1,
    /// The last attempt created a clone
    Succeeded = 2,
    /// The last attempt failed
    Failed = 3,
}

impl SubmissionState {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => SubmissionState::Submitting,
            2 => SubmissionState::Succeeded,
            3 => SubmissionState::Failed,
            _ => SubmissionState::Idle,
        }
    }
}

/// Submits merge requests and invalidates the clone list on success
pub struct MergeSubmitter<T> {
    transport: Arc<T>,
    cache: Arc<QueryCache>,
    state: AtomicU8,
}

impl<T: Transport> MergeSubmitter<T> {
    /// Create a submitter sharing a transport and cache
    pub fn new(transport: Arc<T>, cache: Arc<QueryCache>) -> Self {
        Self {
            transport,
            cache,
            state: AtomicU8::new(SubmissionState::Idle as u8),
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> SubmissionState {
        SubmissionState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Whether a submission is in flight
    pub fn is_submitting(&self) -> bool {
        self.state() == SubmissionState::Submitting
    }

    /// Validate, send exactly one merge request, and return the new clone
    ///
    /// # Errors
    ///
    /// - [`SdkError::Validation`] for an empty name or matrix, before any
    ///   request is made
    /// - [`SdkError::SubmissionInFlight`] if another submit is pending
    /// - any transport or decode error, unchanged
    ///
    /// The clone list is invalidated whenever the server accepts the request,
    /// including when the response body cannot be decoded.
    ///
    /// The matrix is only read, so a failed attempt can be resubmitted as is.
    pub async fn submit(&self, name: &str, matrix: &WeightMatrix) -> Result<CloneResponse, SdkError> {
        let request = MergeRequest::build(name, matrix)?;
        let guard = InFlight::acquire(&self.state).ok_or(SdkError::SubmissionInFlight)?;

        debug!(
            name = %request.name,
            sources = request.source_clones.len(),
            "Submitting merge"
        );

        let response = match self.send(&request).await {
            Ok(response) => response,
            Err(e) => {
                guard.finish(SubmissionState::Failed);
                warn!(error = %e, "Merge failed");
                return Err(e);
            }
        };

        // The server created the clone even if its body fails to decode
        self.cache.invalidate(&QueryKey::ClonesList);

        match serde_json::from_value::<CloneResponse>(response) {
            Ok(created) => {
                guard.finish(SubmissionState::Succeeded);
                info!(clone_id = %created.id, name = %created.name, "Merge created");
                Ok(created)
            }
            Err(e) => {
                guard.finish(SubmissionState::Failed);
                warn!(error = %e, "Merge accepted but response was undecodable");
                Err(e.into())
            }
        }
    }

    async fn send(&self, request: &MergeRequest) -> Result<Value, SdkError> {
        let body = serde_json::to_value(request)?;
        self.transport.post(MERGE_PATH, &body).await
    }
}

/// Single in-flight slot over the submission state
///
/// Dropping an unfinished guard (the submit future was cancelled) returns
/// the state to `Idle`.
struct InFlight<'a> {
    state: &'a AtomicU8,
    finished: bool,
}

impl<'a> InFlight<'a> {
    fn acquire(state: &'a AtomicU8) -> Option<Self> {
        let submitting = SubmissionState::Submitting as u8;
        state
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                (current != submitting).then_some(submitting)
            })
            .ok()
            .map(|_| Self {
                state,
                finished: false,
            })
    }

    fn finish(mut self, outcome: SubmissionState) {
        self.state.store(outcome as u8, Ordering::Release);
        self.finished = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.state.store(SubmissionState::Idle as u8, Ordering::Release);
        }
    }
}
