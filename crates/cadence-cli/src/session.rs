//! Interactive merge session state.
//!
//! Keeps the [`SourceSelection`] and the [`WeightMatrix`] in step: every
//! selected source has exactly one matrix row, in selection order.

use crate::error::{CliError, Result};
use cadence_domain::{Category, CloneId, SourceProfile, SourceSelection, Toggle, Weight, WeightMatrix};
use cadence_sdk::{CadenceClient, CloneResponse, ProfileOutcome, SdkError, Transport};
use std::collections::HashMap;

/// What happened to one id passed to [`MergeSession::add_sources`]
#[derive(Debug)]
pub enum SourceReport {
    /// Added with weights from its DNA profile
    Loaded(CloneId),
    /// Added with default weights; the clone has no DNA yet
    Defaulted(CloneId),
    /// Already part of the session; left untouched
    AlreadySelected(CloneId),
    /// Not added, the selection is at capacity
    SelectionFull(CloneId),
    /// Not added, the profile fetch failed
    Failed(CloneId, SdkError),
}

/// Sources and weights being prepared for one merge
#[derive(Debug, Default)]
pub struct MergeSession {
    selection: SourceSelection,
    matrix: WeightMatrix,
}

impl MergeSession {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch profiles for `ids` and add the usable ones
    ///
    /// Reports follow the order of `ids`. Nothing changes until every fetch
    /// has resolved, so dropping the future leaves the session untouched.
    pub async fn add_sources<T: Transport>(
        &mut self,
        client: &CadenceClient<T>,
        ids: &[CloneId],
    ) -> Vec<SourceReport> {
        let new_ids: Vec<CloneId> = ids
            .iter()
            .filter(|id| !self.selection.contains(id))
            .cloned()
            .collect();
        let mut fetched: HashMap<CloneId, ProfileOutcome> =
            client.fetch_profiles(&new_ids).await.into_iter().collect();

        let mut reports = Vec::with_capacity(ids.len());
        let mut profiles: Vec<SourceProfile> = Vec::new();
        for id in ids {
            let Some(outcome) = fetched.remove(id) else {
                if self.selection.contains(id) {
                    reports.push(SourceReport::AlreadySelected(id.clone()));
                }
                continue;
            };

            let id = id.clone();
            let report = match outcome {
                ProfileOutcome::Failed(e) => SourceReport::Failed(id, e),
                ProfileOutcome::Present(profile) => match self.selection.toggle(&id) {
                    Toggle::Full => SourceReport::SelectionFull(id),
                    _ => {
                        profiles.push(profile);
                        SourceReport::Loaded(id)
                    }
                },
                ProfileOutcome::Absent => match self.selection.toggle(&id) {
                    Toggle::Full => SourceReport::SelectionFull(id),
                    _ => SourceReport::Defaulted(id),
                },
            };
            reports.push(report);
        }

        self.matrix.retain_sources(self.selection.ids(), |id| {
            profiles.iter().find(|p| p.clone_id() == id)
        });
        reports
    }

    /// Drop a source and its row
    pub fn remove_source(&mut self, clone_id: &CloneId) -> bool {
        if !self.selection.contains(clone_id) {
            return false;
        }
        self.selection.toggle(clone_id);
        self.matrix.remove_source(clone_id)
    }

    /// Set one weight, returning the clamped value actually stored
    pub fn set_weight(&mut self, clone_id: &CloneId, category: Category, value: f64) -> Result<Weight> {
        Ok(self.matrix.set_weight(clone_id, category, value)?)
    }

    /// Submit the current matrix
    ///
    /// The session is cleared only when the merge succeeds; on failure every
    /// edit is kept for another attempt.
    pub async fn submit<T: Transport>(
        &mut self,
        client: &CadenceClient<T>,
        name: &str,
    ) -> Result<CloneResponse> {
        let created = client.merge(name, &self.matrix).await?;
        self.clear();
        Ok(created)
    }

    /// Forget all sources
    pub fn clear(&mut self) {
        self.selection.clear();
        self.matrix.clear();
    }

    /// Current weights
    pub fn matrix(&self) -> &WeightMatrix {
        &self.matrix
    }

    /// Selected sources in order
    pub fn sources(&self) -> &[CloneId] {
        self.selection.ids()
    }

    /// Whether no source is selected
    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }
}

impl SourceReport {
    /// Turn a failure report into an error; other reports pass through
    pub fn into_result(self) -> Result<SourceReport> {
        match self {
            SourceReport::Failed(id, e) => Err(CliError::SourceUnavailable {
                id: id.to_string(),
                reason: e.to_string(),
            }),
            SourceReport::SelectionFull(id) => Err(CliError::InvalidInput(format!(
                "Cannot add '{}': at most {} sources per merge",
                id,
                cadence_domain::MAX_SOURCES
            ))),
            other => Ok(other),
        }
    }
}
