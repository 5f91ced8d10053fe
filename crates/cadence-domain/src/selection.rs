//! Source selection - which clones take part in a merge

use crate::{CloneId, MAX_SOURCES};

/// Result of toggling a clone in a [`SourceSelection`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// The clone was added
    Selected,
    /// The clone was removed
    Deselected,
    /// The selection is full; nothing changed
    Full,
}

/// Ordered set of selected source clones, capped at [`MAX_SOURCES`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSelection {
    ids: Vec<CloneId>,
}

impl SourceSelection {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the clone if absent, deselect it if present
    pub fn toggle(&mut self, clone_id: &CloneId) -> Toggle {
        if let Some(pos) = self.ids.iter().position(|id| id == clone_id) {
            self.ids.remove(pos);
            return Toggle::Deselected;
        }
        if self.is_full() {
            return Toggle::Full;
        }
        self.ids.push(clone_id.clone());
        Toggle::Selected
    }

    /// Whether another clone can be added
    pub fn is_full(&self) -> bool {
        self.ids.len() >= MAX_SOURCES
    }

    /// Whether the clone is selected
    pub fn contains(&self, clone_id: &CloneId) -> bool {
        self.ids.contains(clone_id)
    }

    /// Selected ids in selection order
    pub fn ids(&self) -> &[CloneId] {
        &self.ids
    }

    /// Number of selected clones
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is selected
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Deselect everything
    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(i: usize) -> CloneId {
        CloneId::new(format!("c{}", i)).unwrap()
    }

    #[test]
    fn test_toggle_selects_and_deselects() {
        let mut selection = SourceSelection::new();
        assert_eq!(selection.toggle(&id(1)), Toggle::Selected);
        assert!(selection.contains(&id(1)));
        assert_eq!(selection.toggle(&id(1)), Toggle::Deselected);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_cap_at_max_sources() {
        let mut selection = SourceSelection::new();
        for i in 0..MAX_SOURCES {
            assert_eq!(selection.toggle(&id(i)), Toggle::Selected);
        }
        assert_eq!(selection.toggle(&id(99)), Toggle::Full);
        assert_eq!(selection.len(), MAX_SOURCES);

        // Deselecting is always allowed
        assert_eq!(selection.toggle(&id(0)), Toggle::Deselected);
        assert_eq!(selection.toggle(&id(99)), Toggle::Selected);
        assert_eq!(selection.ids().last(), Some(&id(99)));
    }
}
