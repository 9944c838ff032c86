//! Selected-record tracking for bulk actions.
//!
//! Invariant: the selection is always a subset of the IDs currently passing
//! the filter. The [`crate::directory::UserDirectory`] enforces this by
//! pruning on every filter or record change, so a bulk action can never
//! silently touch a hidden record.

use std::collections::BTreeSet;

/// A set of selected record IDs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: BTreeSet<String>,
}

impl SelectionSet {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Iterate the selected IDs in stable order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Toggle a single ID in or out of the selection.
    pub fn toggle(&mut self, id: &str) {
        if !self.ids.remove(id) {
            self.ids.insert(id.to_string());
        }
    }

    /// Header-checkbox semantics: if the full visible set is already
    /// selected, clear; otherwise select exactly the visible IDs.
    /// Previously selected IDs that are no longer visible are never
    /// carried over.
    pub fn toggle_all<'a, I>(&mut self, visible: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let visible: BTreeSet<String> = visible.into_iter().map(str::to_string).collect();
        if self.ids == visible {
            self.ids.clear();
        } else {
            self.ids = visible;
        }
    }

    /// Drop every selected ID not present in the visible set.
    pub fn retain_visible<'a, I>(&mut self, visible: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let visible: BTreeSet<&str> = visible.into_iter().collect();
        self.ids.retain(|id| visible.contains(id.as_str()));
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut selection = SelectionSet::new();
        selection.toggle("a");
        assert!(selection.contains("a"));
        selection.toggle("a");
        assert!(selection.is_empty());
    }

    #[test]
    fn test_toggle_all_selects_visible() {
        let mut selection = SelectionSet::new();
        selection.toggle("a");
        selection.toggle_all(["a", "b", "c"]);
        assert_eq!(selection.len(), 3);
        assert!(selection.contains("b"));
    }

    #[test]
    fn test_toggle_all_clears_when_fully_selected() {
        let mut selection = SelectionSet::new();
        selection.toggle_all(["a", "b", "c"]);
        assert_eq!(selection.len(), 3);
        selection.toggle_all(["a", "b", "c"]);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_toggle_all_replaces_stale_selection() {
        let mut selection = SelectionSet::new();
        selection.toggle("stale");
        selection.toggle_all(["a", "b"]);
        assert!(!selection.contains("stale"));
        assert_eq!(selection.len(), 2);
    }

    #[test]
    fn test_retain_visible() {
        let mut selection = SelectionSet::new();
        selection.toggle_all(["a", "b", "c"]);
        selection.retain_visible(["b"]);
        assert_eq!(selection.len(), 1);
        assert!(selection.contains("b"));
    }
}
