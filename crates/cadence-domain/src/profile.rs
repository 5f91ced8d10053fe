//! Source profiles - one clone's per-category DNA weights

use crate::{Category, CloneId, Weight};

/// A complete mapping from every [`Category`] to a [`Weight`]
///
/// Backed by a fixed array so a row can never be sparse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CategoryWeights([Weight; Category::COUNT]);

impl CategoryWeights {
    /// Every category set to the same weight
    pub fn uniform(weight: Weight) -> Self {
        Self([weight; Category::COUNT])
    }

    /// Build from a per-category lookup; `None` falls back to [`Weight::DEFAULT`]
    pub fn from_fn(mut lookup: impl FnMut(Category) -> Option<Weight>) -> Self {
        let mut weights = Self::default();
        for category in Category::ALL {
            if let Some(weight) = lookup(category) {
                weights.set(category, weight);
            }
        }
        weights
    }

    /// Weight for a category
    pub fn get(&self, category: Category) -> Weight {
        self.0[category.index()]
    }

    /// Replace the weight for a category
    pub fn set(&mut self, category: Category, weight: Weight) {
        self.0[category.index()] = weight;
    }

    /// Iterate in canonical category order
    pub fn iter(&self) -> impl Iterator<Item = (Category, Weight)> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self::uniform(Weight::DEFAULT)
    }
}

/// The DNA weight profile of a single source clone
#[derive(Debug, Clone, PartialEq)]
pub struct SourceProfile {
    clone_id: CloneId,
    weights: CategoryWeights,
}

impl SourceProfile {
    /// Create a profile from complete weights
    pub fn new(clone_id: CloneId, weights: CategoryWeights) -> Self {
        Self { clone_id, weights }
    }

    /// Create a profile from raw `(key, score)` pairs
    ///
    /// Unknown keys are ignored, scores are clamped, and categories that do
    /// not appear keep [`Weight::DEFAULT`].
    ///
    /// # Examples
    ///
    /// ```
    /// use cadence_domain::{Category, CloneId, SourceProfile};
    ///
    /// let id = CloneId::new("c1").unwrap();
    /// let profile = SourceProfile::from_scores(id, [("tone", 80.0), ("humor", 140.0), ("mood", 1.0)]);
    /// assert_eq!(profile.weight(Category::Tone).value(), 80);
    /// assert_eq!(profile.weight(Category::Humor).value(), 100);
    /// assert_eq!(profile.weight(Category::Vocabulary).value(), 50);
    /// ```
    pub fn from_scores<K, I>(clone_id: CloneId, scores: I) -> Self
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, f64)>,
    {
        let mut weights = CategoryWeights::default();
        for (key, score) in scores {
            if let Some(category) = Category::parse(key.as_ref()) {
                weights.set(category, Weight::clamped(score));
            }
        }
        Self { clone_id, weights }
    }

    /// Source clone this profile belongs to
    pub fn clone_id(&self) -> &CloneId {
        &self.clone_id
    }

    /// All weights
    pub fn weights(&self) -> &CategoryWeights {
        &self.weights
    }

    /// Weight for one category
    pub fn weight(&self, category: Category) -> Weight {
        self.weights.get(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fn_defaults_missing() {
        let weights = CategoryWeights::from_fn(|c| match c {
            Category::Tone => Weight::new(10),
            _ => None,
        });
        assert_eq!(weights.get(Category::Tone).value(), 10);
        assert_eq!(weights.get(Category::Signatures), Weight::DEFAULT);
    }

    #[test]
    fn test_iter_covers_every_category() {
        let weights = CategoryWeights::uniform(Weight::MAX);
        let collected: Vec<_> = weights.iter().collect();
        assert_eq!(collected.len(), Category::COUNT);
        assert!(collected.iter().all(|(_, w)| *w == Weight::MAX));
    }
}
