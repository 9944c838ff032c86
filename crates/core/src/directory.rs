//! In-memory state container for a user list view.
//!
//! One [`UserDirectory`] replaces the per-screen copies of records, filter,
//! sort and selection state. The record array is swapped wholesale on every
//! fetch and never patched in place, so the view can never show stale
//! merged state; every filter change prunes the selection down to the
//! visible set.

use crate::filter::UserFilter;
use crate::selection::SelectionSet;
use crate::sort::{sort_records, SortField, SortState};
use chrono::{DateTime, Utc};
use study_console_domain::UserRecord;

/// Records plus view state for one admin list.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    records: Vec<UserRecord>,
    filter: UserFilter,
    sort: SortState,
    selection: SelectionSet,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole record array after a fetch.
    ///
    /// The previous array is discarded, never merged. Selected IDs that no
    /// longer pass the filter against the new records are dropped.
    pub fn replace_records(&mut self, records: Vec<UserRecord>, now: DateTime<Utc>) {
        self.records = records;
        self.prune_selection(now);
    }

    /// All records, unfiltered.
    pub fn records(&self) -> &[UserRecord] {
        &self.records
    }

    pub fn filter(&self) -> &UserFilter {
        &self.filter
    }

    /// Install a new filter state and prune the selection to what remains
    /// visible, so a later bulk action cannot touch hidden records.
    pub fn set_filter(&mut self, filter: UserFilter, now: DateTime<Utc>) {
        self.filter = filter;
        self.prune_selection(now);
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    /// Header-click sort handling; see [`SortState::toggle`].
    pub fn toggle_sort(&mut self, field: SortField) {
        self.sort.toggle(field);
    }

    /// The filtered, sorted view the rows are rendered from.
    pub fn visible(&self, now: DateTime<Utc>) -> Vec<&UserRecord> {
        let mut view = self.filter.apply(&self.records, now);
        sort_records(&mut view, self.sort);
        view
    }

    /// IDs of the currently visible records, in view order.
    pub fn visible_ids(&self, now: DateTime<Utc>) -> Vec<String> {
        self.visible(now).iter().map(|r| r.id.clone()).collect()
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Toggle one row. IDs outside the visible set are ignored to keep the
    /// selection a subset of what is on screen.
    pub fn toggle_selected(&mut self, id: &str, now: DateTime<Utc>) {
        if self.selection.contains(id) {
            self.selection.toggle(id);
            return;
        }
        if self.visible(now).iter().any(|r| r.id == id) {
            self.selection.toggle(id);
        }
    }

    /// Header-checkbox toggle over the visible set.
    pub fn toggle_all(&mut self, now: DateTime<Utc>) {
        let ids = self.visible_ids(now);
        self.selection.toggle_all(ids.iter().map(String::as_str));
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    fn prune_selection(&mut self, now: DateTime<Utc>) {
        let ids = self.visible_ids(now);
        self.selection.retain_visible(ids.iter().map(String::as_str));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use study_console_domain::{UserRole, UserStatus};

    fn record(id: &str, role: UserRole) -> UserRecord {
        UserRecord {
            id: id.to_string(),
            legacy_id: None,
            display_name: format!("User {id}"),
            email: format!("{id}@x.com"),
            role,
            status: UserStatus::Active,
            created_at: None,
            last_activity_at: None,
            studies_created: 0,
            engagement_score: 5.0,
            subscription_plan: None,
            total_revenue: 0.0,
        }
    }

    fn directory() -> UserDirectory {
        let mut dir = UserDirectory::new();
        dir.replace_records(
            vec![
                record("a", UserRole::Researcher),
                record("b", UserRole::Researcher),
                record("c", UserRole::Participant),
            ],
            Utc::now(),
        );
        dir
    }

    #[test]
    fn test_filter_change_prunes_selection() {
        let now = Utc::now();
        let mut dir = directory();
        dir.toggle_all(now);
        assert_eq!(dir.selection().len(), 3);

        dir.set_filter(UserFilter::new().role(UserRole::Researcher), now);
        assert_eq!(dir.selection().len(), 2);
        assert!(!dir.selection().contains("c"));
    }

    #[test]
    fn test_toggle_ignores_hidden_ids() {
        let now = Utc::now();
        let mut dir = directory();
        dir.set_filter(UserFilter::new().role(UserRole::Researcher), now);

        dir.toggle_selected("c", now);
        assert!(dir.selection().is_empty());

        dir.toggle_selected("a", now);
        assert!(dir.selection().contains("a"));
    }

    #[test]
    fn test_replace_records_prunes_selection() {
        let now = Utc::now();
        let mut dir = directory();
        dir.toggle_all(now);

        dir.replace_records(vec![record("a", UserRole::Researcher)], now);
        assert_eq!(dir.selection().len(), 1);
        assert!(dir.selection().contains("a"));
    }

    #[test]
    fn test_visible_applies_filter_and_sort() {
        let now = Utc::now();
        let mut dir = directory();
        dir.set_filter(UserFilter::new().role(UserRole::Researcher), now);
        dir.toggle_sort(crate::sort::SortField::Email);
        dir.toggle_sort(crate::sort::SortField::Email); // flip to ascending

        let ids: Vec<&str> = dir.visible(now).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
