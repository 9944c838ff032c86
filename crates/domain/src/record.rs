//! Canonical user record and its closed enums.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label rendered for a record with no creation timestamp.
pub const NEVER_LABEL: &str = "Never";

/// Canonical user record used uniformly across admin views.
///
/// Produced by the normalizer from loosely-typed API payloads; once
/// normalized, exactly one status value exists and all counts are concrete
/// numbers, so downstream aggregation never needs null checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Unique identifier. The client never originates one of these.
    pub id: String,
    /// Original `_id` value when the source supplied one, kept as a
    /// cross-reference. When the source supplied only `_id`, `id` is a
    /// copy of it and this field still holds the original.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub legacy_id: Option<String>,
    /// Non-empty label for the UI: explicit name, else first+last, else the
    /// full email verbatim.
    pub display_name: String,
    /// Email address (required, unique within a fetch).
    pub email: String,
    /// Platform role.
    pub role: UserRole,
    /// Canonical account status.
    pub status: UserStatus,
    /// Creation timestamp; `None` renders as [`NEVER_LABEL`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last observed activity, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_activity_at: Option<DateTime<Utc>>,
    /// Number of studies this user created.
    pub studies_created: u64,
    /// Engagement score on a 0-10 scale; absent in the source means 0.
    pub engagement_score: f64,
    /// Active subscription plan, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_plan: Option<String>,
    /// Lifetime revenue attributed to this user, in account currency.
    pub total_revenue: f64,
}

impl UserRecord {
    /// Label for the creation timestamp column.
    pub fn created_at_label(&self) -> String {
        match self.created_at {
            Some(ts) => ts.to_rfc3339(),
            None => NEVER_LABEL.to_string(),
        }
    }

    /// Engagement band this record falls into.
    pub fn engagement_band(&self) -> crate::bands::EngagementBand {
        crate::bands::EngagementBand::of_score(self.engagement_score)
    }
}

/// Platform roles. Closed set; filters match these case-sensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Participant,
    Researcher,
    Admin,
}

impl UserRole {
    /// Parse a raw role string, tolerating case differences.
    ///
    /// Returns `None` for values outside the closed set; the normalizer
    /// decides what to do with those.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "participant" => Some(Self::Participant),
            "researcher" => Some(Self::Researcher),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    pub fn can_create_studies(&self) -> bool {
        *self >= Self::Researcher
    }

    pub fn can_manage_users(&self) -> bool {
        *self >= Self::Admin
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Participant => "participant",
            Self::Researcher => "researcher",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical account status.
///
/// Source payloads carry either an explicit status string or an `isActive`
/// boolean (sometimes both); the normalizer resolves them to exactly one of
/// these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    Inactive,
    Suspended,
    Pending,
}

impl UserStatus {
    /// Canonicalize an explicit status string.
    ///
    /// Returns `None` for values outside the closed set.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "suspended" => Some(Self::Suspended),
            "pending" => Some(Self::Pending),
            _ => None,
        }
    }

    /// Derive a status from a bare `isActive` flag.
    pub fn from_active_flag(active: bool) -> Self {
        if active {
            Self::Active
        } else {
            Self::Inactive
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Suspended => "suspended",
            Self::Pending => "pending",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!(UserRole::parse("researcher"), Some(UserRole::Researcher));
        assert_eq!(UserRole::parse("  Admin "), Some(UserRole::Admin));
        assert_eq!(UserRole::parse("superuser"), None);
    }

    #[test]
    fn test_role_permissions() {
        assert!(!UserRole::Participant.can_create_studies());
        assert!(UserRole::Researcher.can_create_studies());
        assert!(!UserRole::Researcher.can_manage_users());
        assert!(UserRole::Admin.can_manage_users());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(UserStatus::parse("ACTIVE"), Some(UserStatus::Active));
        assert_eq!(UserStatus::parse("pending"), Some(UserStatus::Pending));
        assert_eq!(UserStatus::parse("banned"), None);
    }

    #[test]
    fn test_status_from_flag() {
        assert_eq!(UserStatus::from_active_flag(true), UserStatus::Active);
        assert_eq!(UserStatus::from_active_flag(false), UserStatus::Inactive);
    }

    #[test]
    fn test_created_at_label_never() {
        let record = UserRecord {
            id: "u1".to_string(),
            legacy_id: None,
            display_name: "a@x.com".to_string(),
            email: "a@x.com".to_string(),
            role: UserRole::Participant,
            status: UserStatus::Active,
            created_at: None,
            last_activity_at: None,
            studies_created: 0,
            engagement_score: 0.0,
            subscription_plan: None,
            total_revenue: 0.0,
        };
        assert_eq!(record.created_at_label(), NEVER_LABEL);
    }

    #[test]
    fn test_enum_serde_round_trip() {
        let json = serde_json::to_string(&UserStatus::Suspended).unwrap();
        assert_eq!(json, "\"suspended\"");
        let back: UserStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, UserStatus::Suspended);
    }
}
