//! Weight matrix - the editable source x category state behind a merge
//!
//! Display percentages are never stored. [`percentages`] derives them from
//! the current weights on every call.

use crate::{Category, CategoryWeights, CloneId, SourceProfile, Weight};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors raised by matrix edits
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// The source has no row in the matrix
    #[error("Source '{0}' is not in the merge")]
    UnknownSource(CloneId),
}

/// Per-source, per-category weights for a merge in progress
///
/// Rows keep the order in which sources were added. Every row is complete
/// over all categories.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightMatrix {
    rows: Vec<(CloneId, CategoryWeights)>,
}

impl WeightMatrix {
    /// Create an empty matrix
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source row
    ///
    /// The row starts from the profile's weights, or [`Weight::DEFAULT`]
    /// everywhere when the source has no profile. Returns `false` (and keeps
    /// the existing row untouched) if the source is already present.
    pub fn add_source(&mut self, clone_id: CloneId, profile: Option<&SourceProfile>) -> bool {
        if self.contains(&clone_id) {
            return false;
        }
        let weights = profile.map(|p| *p.weights()).unwrap_or_default();
        self.rows.push((clone_id, weights));
        true
    }

    /// Remove a source's row from every category at once
    pub fn remove_source(&mut self, clone_id: &CloneId) -> bool {
        let before = self.rows.len();
        self.rows.retain(|(id, _)| id != clone_id);
        self.rows.len() != before
    }

    /// Reconcile rows with a new selection
    ///
    /// Rows end up in `ids` order. Existing rows keep their edits, new ids
    /// are initialized from `profile_for`, and rows not in `ids` are dropped.
    pub fn retain_sources<'a>(
        &mut self,
        ids: &[CloneId],
        mut profile_for: impl FnMut(&CloneId) -> Option<&'a SourceProfile>,
    ) {
        let mut previous = std::mem::take(&mut self.rows);
        for id in ids {
            if self.contains(id) {
                continue;
            }
            let weights = match previous.iter().position(|(existing, _)| existing == id) {
                Some(pos) => previous.swap_remove(pos).1,
                None => profile_for(id).map(|p| *p.weights()).unwrap_or_default(),
            };
            self.rows.push((id.clone(), weights));
        }
    }

    /// Set one cell, clamping the raw value into `[0, 100]`
    ///
    /// Returns the weight actually stored.
    pub fn set_weight(
        &mut self,
        clone_id: &CloneId,
        category: Category,
        value: f64,
    ) -> Result<Weight, MatrixError> {
        let (_, weights) = self
            .rows
            .iter_mut()
            .find(|(id, _)| id == clone_id)
            .ok_or_else(|| MatrixError::UnknownSource(clone_id.clone()))?;
        let weight = Weight::clamped(value);
        weights.set(category, weight);
        Ok(weight)
    }

    /// Read one cell
    pub fn weight(&self, clone_id: &CloneId, category: Category) -> Option<Weight> {
        self.row(clone_id).map(|w| w.get(category))
    }

    /// Read a source's full row
    pub fn row(&self, clone_id: &CloneId) -> Option<&CategoryWeights> {
        self.rows
            .iter()
            .find(|(id, _)| id == clone_id)
            .map(|(_, weights)| weights)
    }

    /// Whether the source has a row
    pub fn contains(&self, clone_id: &CloneId) -> bool {
        self.rows.iter().any(|(id, _)| id == clone_id)
    }

    /// Source ids in row order
    pub fn sources(&self) -> impl Iterator<Item = &CloneId> {
        self.rows.iter().map(|(id, _)| id)
    }

    /// Rows in order
    pub fn rows(&self) -> impl Iterator<Item = (&CloneId, &CategoryWeights)> {
        self.rows.iter().map(|(id, weights)| (id, weights))
    }

    /// Number of sources
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the matrix has no sources
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Drop every row
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Sum of one category's weights across all sources
    pub fn row_total(&self, category: Category) -> u32 {
        self.rows.iter().map(|(_, w)| u32::from(w.get(category))).sum()
    }

    /// Display percentages for one category; see [`percentages`]
    pub fn percentages(&self, category: Category) -> BTreeMap<CloneId, u32> {
        percentages(self, category)
    }
}

/// Display percentage of each source for one category
///
/// `round(weight / total * 100)`, or `round(100 / n)` for every source when
/// the category's total is zero. Rounding is half away from zero. The
/// values need not sum to exactly 100.
///
/// # Examples
///
/// ```
/// use cadence_domain::{percentages, Category, CloneId, WeightMatrix};
///
/// let s1 = CloneId::new("s1").unwrap();
/// let s2 = CloneId::new("s2").unwrap();
/// let mut matrix = WeightMatrix::new();
/// matrix.add_source(s1.clone(), None);
/// matrix.add_source(s2.clone(), None);
/// matrix.set_weight(&s1, Category::Tone, 80.0).unwrap();
/// matrix.set_weight(&s2, Category::Tone, 20.0).unwrap();
///
/// let pct = percentages(&matrix, Category::Tone);
/// assert_eq!(pct[&s1], 80);
/// assert_eq!(pct[&s2], 20);
/// ```
pub fn percentages(matrix: &WeightMatrix, category: Category) -> BTreeMap<CloneId, u32> {
    let count = matrix.len();
    if count == 0 {
        return BTreeMap::new();
    }

    let total = matrix.row_total(category);
    matrix
        .rows()
        .map(|(id, weights)| {
            let pct = if total > 0 {
                (f64::from(weights.get(category).value()) / f64::from(total) * 100.0).round()
            } else {
                (100.0 / count as f64).round()
            };
            (id.clone(), pct as u32)
        })
        .collect()
}
