//! Fluent builder for constructing canonical records in tests.

use chrono::{DateTime, Duration, Utc};
use study_console_domain::{UserRecord, UserRole, UserStatus};
use uuid::Uuid;

/// Builder for [`UserRecord`] test instances.
///
/// Defaults to an active participant created a week ago with a mid-range
/// engagement score; every field can be overridden.
#[derive(Clone)]
pub struct UserRecordBuilder {
    id: String,
    legacy_id: Option<String>,
    display_name: String,
    email: String,
    role: UserRole,
    status: UserStatus,
    created_at: Option<DateTime<Utc>>,
    last_activity_at: Option<DateTime<Utc>>,
    studies_created: u64,
    engagement_score: f64,
    subscription_plan: Option<String>,
    total_revenue: f64,
}

impl UserRecordBuilder {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            legacy_id: None,
            display_name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            role: UserRole::Participant,
            status: UserStatus::Active,
            created_at: Some(Utc::now() - Duration::days(7)),
            last_activity_at: Some(Utc::now() - Duration::hours(3)),
            studies_created: 0,
            engagement_score: 5.0,
            subscription_plan: None,
            total_revenue: 0.0,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_legacy_id(mut self, legacy_id: impl Into<String>) -> Self {
        self.legacy_id = Some(legacy_id.into());
        self
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = role;
        self
    }

    pub fn with_status(mut self, status: UserStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Creation timestamp `days` days before now.
    pub fn created_days_ago(mut self, days: i64) -> Self {
        self.created_at = Some(Utc::now() - Duration::days(days));
        self
    }

    /// No creation timestamp at all; renders as "Never".
    pub fn never_created(mut self) -> Self {
        self.created_at = None;
        self
    }

    pub fn with_last_activity_at(mut self, ts: DateTime<Utc>) -> Self {
        self.last_activity_at = Some(ts);
        self
    }

    pub fn with_studies_created(mut self, count: u64) -> Self {
        self.studies_created = count;
        self
    }

    pub fn with_engagement_score(mut self, score: f64) -> Self {
        self.engagement_score = score;
        self
    }

    pub fn with_subscription_plan(mut self, plan: impl Into<String>) -> Self {
        self.subscription_plan = Some(plan.into());
        self
    }

    pub fn with_total_revenue(mut self, revenue: f64) -> Self {
        self.total_revenue = revenue;
        self
    }

    pub fn admin(mut self) -> Self {
        self.role = UserRole::Admin;
        self
    }

    pub fn researcher(mut self) -> Self {
        self.role = UserRole::Researcher;
        self
    }

    pub fn suspended(mut self) -> Self {
        self.status = UserStatus::Suspended;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.status = UserStatus::Inactive;
        self
    }

    pub fn build(self) -> UserRecord {
        UserRecord {
            id: self.id,
            legacy_id: self.legacy_id,
            display_name: self.display_name,
            email: self.email,
            role: self.role,
            status: self.status,
            created_at: self.created_at,
            last_activity_at: self.last_activity_at,
            studies_created: self.studies_created,
            engagement_score: self.engagement_score,
            subscription_plan: self.subscription_plan,
            total_revenue: self.total_revenue,
        }
    }
}

impl Default for UserRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}
