//! Record normalizer: loose API payloads to canonical [`UserRecord`]s.
//!
//! The backend returns user objects in more than one shape: snake_case or
//! camelCase field names, `id` or `_id`, an explicit status string or a bare
//! `isActive` boolean, optional counts. All of that variation is absorbed
//! here, in one place, so downstream code only ever sees the canonical
//! shape. Normalizing an already-canonical array is a no-op.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use study_console_domain::{RecordError, UserRecord, UserRole, UserStatus};
use thiserror::Error;
use tracing::warn;

/// Why a whole normalization batch failed.
///
/// Per-record problems never produce this; they are logged and the record
/// is skipped. Only a payload that is not an array of records at all is a
/// batch-level failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// The payload was not a JSON array.
    #[error("expected an array of user records, found {found}")]
    NotAnArray {
        /// JSON type name that was found instead.
        found: &'static str,
    },
}

/// Raw user shape as the API may deliver it.
///
/// Every field is optional; aliases cover the camelCase spellings. The
/// resolution order per canonical field is applied in [`normalize_record`].
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawUser {
    id: Option<String>,
    #[serde(rename = "_id")]
    legacy_id: Option<String>,
    #[serde(alias = "displayName")]
    display_name: Option<String>,
    name: Option<String>,
    #[serde(alias = "firstName")]
    first_name: Option<String>,
    #[serde(alias = "lastName")]
    last_name: Option<String>,
    email: Option<String>,
    role: Option<String>,
    status: Option<String>,
    #[serde(alias = "isActive")]
    is_active: Option<bool>,
    #[serde(alias = "createdAt")]
    created_at: Option<String>,
    #[serde(alias = "lastActivityAt", alias = "lastActiveAt")]
    last_activity_at: Option<String>,
    #[serde(alias = "studiesCreated")]
    studies_created: Option<u64>,
    #[serde(alias = "engagementScore")]
    engagement_score: Option<f64>,
    #[serde(alias = "subscriptionPlan")]
    subscription_plan: Option<String>,
    #[serde(alias = "totalRevenue")]
    total_revenue: Option<f64>,
}

/// Normalize an array of loosely-typed user objects.
///
/// Malformed individual records are skipped with a logged warning; the
/// batch only fails when the payload itself is not an array.
pub fn normalize_users(payload: &Value) -> Result<Vec<UserRecord>, NormalizeError> {
    let items = payload.as_array().ok_or(NormalizeError::NotAnArray {
        found: json_type_name(payload),
    })?;

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match normalize_record(item) {
            Ok(record) => records.push(record),
            Err(err) => {
                warn!(
                    index,
                    code = err.error_code(),
                    error = %err,
                    "skipping malformed user record"
                );
            }
        }
    }
    Ok(records)
}

/// Normalize a single raw user object.
pub fn normalize_record(value: &Value) -> Result<UserRecord, RecordError> {
    if !value.is_object() {
        return Err(RecordError::NotAnObject {
            found: json_type_name(value),
        });
    }

    let raw: RawUser =
        RawUser::deserialize(value).map_err(|e| RecordError::Malformed {
            detail: e.to_string(),
        })?;

    // ID resolution: prefer `id`, fall back to `_id`. IDs are never
    // synthesized; a record with neither is dropped. The `_id` value is
    // kept as a cross-reference either way.
    let legacy_id = non_empty(raw.legacy_id);
    let id = match (non_empty(raw.id), legacy_id.clone()) {
        (Some(id), _) => id,
        (None, Some(legacy)) => legacy,
        (None, None) => return Err(RecordError::MissingId),
    };

    let email = non_empty(raw.email).ok_or_else(|| RecordError::MissingEmail { id: id.clone() })?;

    let display_name = resolve_display_name(
        raw.display_name.as_deref(),
        raw.name.as_deref(),
        raw.first_name.as_deref(),
        raw.last_name.as_deref(),
        &email,
    );

    // Role policy: an unknown role string (typically a value the server
    // added after this client shipped) coerces to participant instead of
    // dropping the record. Dropping would hide the account from admins
    // entirely; coercing shows it with the least-privileged role, and the
    // warning keeps the substitution visible in logs.
    let role = match raw.role.as_deref() {
        Some(s) => UserRole::parse(s).unwrap_or_else(|| {
            warn!(id = %id, role = s, "unknown role, defaulting to participant");
            UserRole::Participant
        }),
        None => UserRole::Participant,
    };

    let status = resolve_status(&id, raw.status.as_deref(), raw.is_active);

    let created_at = parse_timestamp(&id, "created_at", raw.created_at.as_deref());
    let last_activity_at = parse_timestamp(&id, "last_activity_at", raw.last_activity_at.as_deref());

    Ok(UserRecord {
        id,
        legacy_id,
        display_name,
        email,
        role,
        status,
        created_at,
        last_activity_at,
        // Missing counts become 0, never null, so aggregation downstream
        // needs no null checks.
        studies_created: raw.studies_created.unwrap_or(0),
        engagement_score: raw.engagement_score.unwrap_or(0.0).clamp(0.0, 10.0),
        subscription_plan: non_empty(raw.subscription_plan),
        total_revenue: raw.total_revenue.unwrap_or(0.0).max(0.0),
    })
}

/// Name resolution order: explicit name, else first+last (trimmed, single
/// space, empty parts omitted), else the full email verbatim so the UI
/// always has a non-empty label.
fn resolve_display_name(
    display_name: Option<&str>,
    name: Option<&str>,
    first: Option<&str>,
    last: Option<&str>,
    email: &str,
) -> String {
    if let Some(explicit) = first_non_blank(&[display_name, name]) {
        return explicit;
    }

    let joined = [first, last]
        .iter()
        .filter_map(|part| part.map(str::trim).filter(|p| !p.is_empty()))
        .collect::<Vec<_>>()
        .join(" ");
    if !joined.is_empty() {
        return joined;
    }

    email.to_string()
}

/// Status resolution.
///
/// Policy: when both an explicit status string and an `isActive` boolean are
/// present and disagree, the explicit string wins. The source data carries
/// both fields with independent meanings (a suspended account may still be
/// flagged `isActive: true`), so the derived boolean is only trusted when
/// nothing explicit is available.
fn resolve_status(id: &str, explicit: Option<&str>, is_active: Option<bool>) -> UserStatus {
    if let Some(raw) = explicit {
        if let Some(status) = UserStatus::parse(raw) {
            return status;
        }
        warn!(id = %id, status = raw, "unknown status string, falling back");
    }
    match is_active {
        Some(flag) => UserStatus::from_active_flag(flag),
        // Neither field present: the account has not been confirmed in
        // either direction, treat it as pending.
        None => UserStatus::Pending,
    }
}

fn parse_timestamp(id: &str, field: &'static str, raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => Some(ts.with_timezone(&Utc)),
        Err(err) => {
            warn!(id = %id, field, value = raw, %err, "unparseable timestamp, treating as absent");
            None
        }
    }
}

fn first_non_blank(candidates: &[Option<&str>]) -> Option<String> {
    candidates
        .iter()
        .filter_map(|c| c.map(str::trim).filter(|s| !s.is_empty()))
        .next()
        .map(str::to_string)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
