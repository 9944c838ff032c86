//! Fixtures for canonical records and raw API payloads.
//!
//! The raw payload fixtures deliberately exercise both field conventions
//! the backend has shipped over time: modern camelCase records keyed by
//! `id`, and legacy records keyed by `_id` with `firstName`/`lastName` and
//! an `isActive` flag.

use fake::{
    faker::{internet::en::FreeEmail, name::en::Name},
    Fake,
};
use serde_json::{json, Value};
use study_console_domain::{UserRecord, UserRole};

use crate::builders::UserRecordBuilder;

/// Create a canonical record with randomized identity fields.
pub fn create_test_record() -> UserRecord {
    create_test_record_with_role(UserRole::Participant)
}

/// Create a canonical record with a specific role.
pub fn create_test_record_with_role(role: UserRole) -> UserRecord {
    UserRecordBuilder::new()
        .with_display_name(Name().fake::<String>())
        .with_email(FreeEmail().fake::<String>())
        .with_role(role)
        .build()
}

/// Create a test admin record.
pub fn create_test_admin() -> UserRecord {
    create_test_record_with_role(UserRole::Admin)
}

/// Create a test researcher record.
pub fn create_test_researcher() -> UserRecord {
    create_test_record_with_role(UserRole::Researcher)
}

/// Raw user object in the modern convention: `id`, `displayName`,
/// explicit `status`, camelCase counters.
pub fn raw_user_modern(id: &str) -> Value {
    json!({
        "id": id,
        "displayName": "Dana Researcher",
        "email": format!("{id}@example.com"),
        "role": "researcher",
        "status": "active",
        "createdAt": "2026-07-01T12:00:00Z",
        "lastActivityAt": "2026-08-30T09:30:00Z",
        "studiesCreated": 4,
        "engagementScore": 7.5,
        "subscriptionPlan": "pro",
        "totalRevenue": 240.0
    })
}

/// Raw user object in the legacy convention: `_id`, first/last name
/// parts, and an `isActive` flag instead of a status string.
pub fn raw_user_legacy(id: &str) -> Value {
    json!({
        "_id": id,
        "firstName": "Lee",
        "lastName": "Participant",
        "email": format!("{id}@example.com"),
        "role": "participant",
        "isActive": false,
        "createdAt": "2026-05-15T08:00:00Z",
        "engagementScore": 2.0
    })
}

/// Raw user object missing every optional field; only what the
/// normalizer strictly requires.
pub fn raw_user_minimal(id: &str) -> Value {
    json!({
        "id": id,
        "email": format!("{id}@example.com")
    })
}

/// List envelope in the consolidated shape, `{success, data: {users}}`.
pub fn user_list_envelope_nested(users: Vec<Value>) -> Value {
    json!({
        "success": true,
        "data": {
            "users": users.clone(),
            "total": users.len()
        }
    })
}

/// List envelope in the older shape, `{success, users}` at the top level.
pub fn user_list_envelope_top_level(users: Vec<Value>) -> Value {
    json!({
        "success": true,
        "users": users
    })
}

/// Failure envelope; servers send these on HTTP 200 as well as on error
/// statuses.
pub fn failure_envelope(error: &str) -> Value {
    json!({
        "success": false,
        "error": error
    })
}

/// Success envelope with no payload, as returned by mutations.
pub fn ack_envelope() -> Value {
    json!({ "success": true })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_randomized_records_differ() {
        let a = create_test_record();
        let b = create_test_record();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_legacy_fixture_has_no_modern_id() {
        let raw = raw_user_legacy("u1");
        assert!(raw.get("id").is_none());
        assert_eq!(raw["_id"], "u1");
    }

    #[test]
    fn test_nested_envelope_counts_users() {
        let envelope = user_list_envelope_nested(vec![raw_user_modern("u1")]);
        assert_eq!(envelope["data"]["total"], 1);
    }
}
