//! Merge plans - the validated snapshot of a matrix at submission time

use crate::{CategoryWeights, CloneId, WeightMatrix};
use thiserror::Error;

/// Maximum number of source clones in one merge
pub const MAX_SOURCES: usize = 5;

/// Reasons a merge is rejected before anything is sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The merged clone name is empty or whitespace
    #[error("Merged clone name must not be empty")]
    EmptyName,

    /// The matrix has no source rows
    #[error("Select at least one source clone")]
    NoSources,

    /// More sources than [`MAX_SOURCES`]
    #[error("Too many source clones: {count} (max {max})")]
    TooManySources {
        /// Sources in the matrix
        count: usize,
        /// Allowed maximum
        max: usize,
    },
}

/// A merge ready to be sent: trimmed name plus every row copied verbatim
///
/// Weights are not renormalized; the backend owns final normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct MergePlan {
    name: String,
    sources: Vec<(CloneId, CategoryWeights)>,
}

impl MergePlan {
    /// Validate and snapshot a matrix
    pub fn new(name: &str, matrix: &WeightMatrix) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if matrix.is_empty() {
            return Err(ValidationError::NoSources);
        }
        if matrix.len() > MAX_SOURCES {
            return Err(ValidationError::TooManySources {
                count: matrix.len(),
                max: MAX_SOURCES,
            });
        }

        Ok(Self {
            name: name.to_string(),
            sources: matrix.rows().map(|(id, w)| (id.clone(), *w)).collect(),
        })
    }

    /// Name for the merged clone
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source rows in matrix order
    pub fn sources(&self) -> &[(CloneId, CategoryWeights)] {
        &self.sources
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Category, Weight};

    fn matrix_with(n: usize) -> WeightMatrix {
        let mut matrix = WeightMatrix::new();
        for i in 0..n {
            matrix.add_source(CloneId::new(format!("c{}", i)).unwrap(), None);
        }
        matrix
    }

    #[test]
    fn test_empty_name_rejected() {
        let matrix = matrix_with(2);
        assert_eq!(MergePlan::new("", &matrix), Err(ValidationError::EmptyName));
        assert_eq!(MergePlan::new("   ", &matrix), Err(ValidationError::EmptyName));
    }

    #[test]
    fn test_empty_matrix_rejected() {
        assert_eq!(
            MergePlan::new("Blend", &WeightMatrix::new()),
            Err(ValidationError::NoSources)
        );
    }

    #[test]
    fn test_too_many_sources_rejected() {
        let result = MergePlan::new("Blend", &matrix_with(MAX_SOURCES + 1));
        assert_eq!(
            result,
            Err(ValidationError::TooManySources { count: 6, max: 5 })
        );
    }

    #[test]
    fn test_rows_copied_verbatim() {
        let mut matrix = matrix_with(2);
        let c0 = CloneId::new("c0").unwrap();
        matrix.set_weight(&c0, Category::Tone, 80.0).unwrap();

        let plan = MergePlan::new("  Blend A ", &matrix).unwrap();
        assert_eq!(plan.name(), "Blend A");
        assert_eq!(plan.sources().len(), 2);
        assert_eq!(plan.sources()[0].0, c0);
        assert_eq!(plan.sources()[0].1.get(Category::Tone).value(), 80);
        assert_eq!(plan.sources()[1].1.get(Category::Tone), Weight::DEFAULT);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ValidationError::TooManySources { count: 6, max: 5 }.to_string(),
            "Too many source clones: 6 (max 5)"
        );
        let err: Box<dyn std::error::Error> = Box::new(ValidationError::EmptyName);
        assert_eq!(err.to_string(), "Merged clone name must not be empty");
    }
}
