//! Filter/search predicate engine.
//!
//! A [`UserFilter`] is a pure value object re-derived on every keystroke or
//! selection change. All active constraints are combined with logical AND;
//! an unset dimension means "no constraint". [`UserFilter::matches`] is
//! total: it cannot fail for any record/filter combination.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use study_console_domain::{ActivityWindow, EngagementBand, UserRecord, UserRole, UserStatus};

/// Filter state for a user list view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserFilter {
    /// Free-text search; empty matches everything.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub search: String,
    /// Exact role constraint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    /// Exact status constraint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
    /// Exact subscription-plan constraint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_plan: Option<String>,
    /// Records created inside this trailing window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_within: Option<ActivityWindow>,
    /// Engagement band constraint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engagement: Option<EngagementBand>,
}

impl UserFilter {
    /// Create an empty filter (matches everything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the free-text search.
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }

    /// Constrain to one role.
    pub fn role(mut self, role: UserRole) -> Self {
        self.role = Some(role);
        self
    }

    /// Constrain to one status.
    pub fn status(mut self, status: UserStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Constrain to one subscription plan.
    pub fn subscription_plan(mut self, plan: impl Into<String>) -> Self {
        self.subscription_plan = Some(plan.into());
        self
    }

    /// Constrain to records created inside a trailing window.
    pub fn created_within(mut self, window: ActivityWindow) -> Self {
        self.created_within = Some(window);
        self
    }

    /// Constrain to one engagement band.
    pub fn engagement(mut self, band: EngagementBand) -> Self {
        self.engagement = Some(band);
        self
    }

    /// Whether no constraint is active.
    pub fn is_empty(&self) -> bool {
        self.search.is_empty()
            && self.role.is_none()
            && self.status.is_none()
            && self.subscription_plan.is_none()
            && self.created_within.is_none()
            && self.engagement.is_none()
    }

    /// Evaluate the filter against one record.
    ///
    /// `now` anchors the trailing date window; passing it in keeps the
    /// predicate pure and reproducible in tests.
    pub fn matches(&self, record: &UserRecord, now: DateTime<Utc>) -> bool {
        self.matches_search(record)
            && self.role.map_or(true, |role| record.role == role)
            && self.status.map_or(true, |status| record.status == status)
            && self
                .subscription_plan
                .as_ref()
                .map_or(true, |plan| record.subscription_plan.as_deref() == Some(plan.as_str()))
            && self.created_within.map_or(true, |window| {
                // A record with no creation timestamp can never satisfy a
                // date constraint.
                record
                    .created_at
                    .map_or(false, |ts| window.contains(ts, now))
            })
            && self
                .engagement
                .map_or(true, |band| band.contains(record.engagement_score))
    }

    /// Filter a record slice, preserving input order.
    pub fn apply<'a>(&self, records: &'a [UserRecord], now: DateTime<Utc>) -> Vec<&'a UserRecord> {
        records.iter().filter(|r| self.matches(r, now)).collect()
    }

    /// Case-insensitive substring match over display name, email, and the
    /// subscription plan as the secondary field.
    fn matches_search(&self, record: &UserRecord) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        record.display_name.to_lowercase().contains(&needle)
            || record.email.to_lowercase().contains(&needle)
            || record
                .subscription_plan
                .as_ref()
                .map_or(false, |plan| plan.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(id: &str) -> UserRecord {
        UserRecord {
            id: id.to_string(),
            legacy_id: None,
            display_name: "John Doe".to_string(),
            email: "john@x.com".to_string(),
            role: UserRole::Researcher,
            status: UserStatus::Active,
            created_at: Some(Utc::now() - Duration::days(2)),
            last_activity_at: None,
            studies_created: 3,
            engagement_score: 8.0,
            subscription_plan: Some("pro".to_string()),
            total_revenue: 50.0,
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = UserFilter::new();
        assert!(filter.is_empty());
        assert!(filter.matches(&record("u1"), Utc::now()));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let now = Utc::now();
        assert!(UserFilter::new().search("JOHN").matches(&record("u1"), now));
        assert!(UserFilter::new().search("x.com").matches(&record("u1"), now));
        assert!(UserFilter::new().search("PRO").matches(&record("u1"), now));
        assert!(!UserFilter::new().search("alice").matches(&record("u1"), now));
    }

    #[test]
    fn test_role_mismatch_beats_text_match() {
        // Text matches the name but the role constraint fails, so the
        // conjunction fails.
        let filter = UserFilter::new().role(UserRole::Admin).search("john");
        assert!(!filter.matches(&record("u1"), Utc::now()));
    }

    #[test]
    fn test_categorical_exact_match() {
        let now = Utc::now();
        assert!(UserFilter::new()
            .status(UserStatus::Active)
            .matches(&record("u1"), now));
        assert!(!UserFilter::new()
            .status(UserStatus::Suspended)
            .matches(&record("u1"), now));
        assert!(UserFilter::new()
            .subscription_plan("pro")
            .matches(&record("u1"), now));
        assert!(!UserFilter::new()
            .subscription_plan("free")
            .matches(&record("u1"), now));
    }

    #[test]
    fn test_date_window() {
        let now = Utc::now();
        let filter = UserFilter::new().created_within(ActivityWindow::PastWeek);
        assert!(filter.matches(&record("u1"), now));

        let mut old = record("u2");
        old.created_at = Some(now - Duration::days(40));
        assert!(!filter.matches(&old, now));

        let mut never = record("u3");
        never.created_at = None;
        assert!(!filter.matches(&never, now));
    }

    #[test]
    fn test_engagement_band() {
        let now = Utc::now();
        assert!(UserFilter::new()
            .engagement(EngagementBand::High)
            .matches(&record("u1"), now));
        assert!(!UserFilter::new()
            .engagement(EngagementBand::Low)
            .matches(&record("u1"), now));
    }

    #[test]
    fn test_apply_preserves_order() {
        let now = Utc::now();
        let mut a = record("a");
        a.role = UserRole::Participant;
        let b = record("b");
        let c = record("c");
        let records = vec![a, b, c];

        let filtered = UserFilter::new()
            .role(UserRole::Researcher)
            .apply(&records, now);
        let ids: Vec<&str> = filtered.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }
}
