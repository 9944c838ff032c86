//! Response envelope decoding.
//!
//! Every backend response uses the `{success, data?, error?, message?}`
//! convention. `success: false` is the failure signal regardless of HTTP
//! status; some failures arrive as HTTP 200 with `success: false`, so the
//! status code alone is never trusted.

use crate::error::{ApiError, ApiResult};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Generic response envelope.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    /// Failure signal; absent counts as false.
    #[serde(default)]
    pub success: bool,
    /// Payload on success.
    pub data: Option<T>,
    /// Server-supplied error detail.
    pub error: Option<String>,
    /// Server-supplied human message.
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Unwrap the payload, treating `success: false` uniformly as failure.
    pub fn into_data(self) -> ApiResult<T> {
        if !self.success {
            return Err(ApiError::application(self.error, self.message));
        }
        self.data.ok_or_else(|| ApiError::InvalidResponse {
            message: "envelope reported success but carried no data".to_string(),
        })
    }

    /// Check the success flag only, for mutations that return no payload.
    pub fn into_ack(self) -> ApiResult<()> {
        if self.success {
            Ok(())
        } else {
            Err(ApiError::application(self.error, self.message))
        }
    }
}

/// Decode an envelope from a raw JSON body.
pub fn decode<T: DeserializeOwned>(body: &Value) -> ApiResult<Envelope<T>> {
    serde_json::from_value(body.clone()).map_err(|e| ApiError::InvalidResponse {
        message: format!("failed to decode envelope: {e}"),
    })
}

/// User list payloads come in two shapes: `{data: {users: [...]}}` from the
/// consolidated endpoint and `{users: [...]}` at the top level from the
/// older one. Both are absorbed here.
#[derive(Debug, Deserialize)]
pub struct UserListEnvelope {
    /// Failure signal; absent counts as false.
    #[serde(default)]
    pub success: bool,
    /// Consolidated-endpoint shape.
    pub data: Option<UserListData>,
    /// Older top-level shape.
    pub users: Option<Vec<Value>>,
    /// Server-supplied error detail.
    pub error: Option<String>,
    /// Server-supplied human message.
    pub message: Option<String>,
}

/// Nested list payload.
#[derive(Debug, Deserialize)]
pub struct UserListData {
    /// Raw user objects, pre-normalization.
    pub users: Vec<Value>,
    /// Optional total count.
    pub total: Option<u64>,
}

impl UserListEnvelope {
    /// Extract the raw user array from whichever shape was used.
    pub fn into_users(self) -> ApiResult<Vec<Value>> {
        if !self.success {
            return Err(ApiError::application(self.error, self.message));
        }
        if let Some(data) = self.data {
            return Ok(data.users);
        }
        self.users.ok_or_else(|| ApiError::InvalidResponse {
            message: "user list response carried neither data.users nor users".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_false_is_failure_even_with_data() {
        let envelope: Envelope<Value> =
            decode(&json!({"success": false, "data": {"x": 1}, "error": "nope"})).unwrap();
        let err = envelope.into_data().unwrap_err();
        assert_eq!(err.to_string(), "nope");
    }

    #[test]
    fn test_missing_success_defaults_to_failure() {
        let envelope: Envelope<Value> = decode(&json!({"data": {}})).unwrap();
        assert!(envelope.into_ack().is_err());
    }

    #[test]
    fn test_nested_user_list_shape() {
        let envelope: UserListEnvelope = serde_json::from_value(json!({
            "success": true,
            "data": {"users": [{"id": "u1"}], "total": 1}
        }))
        .unwrap();
        let users = envelope.into_users().unwrap();
        assert_eq!(users.len(), 1);
    }

    #[test]
    fn test_top_level_user_list_shape() {
        let envelope: UserListEnvelope = serde_json::from_value(json!({
            "success": true,
            "users": [{"id": "u1"}, {"id": "u2"}]
        }))
        .unwrap();
        let users = envelope.into_users().unwrap();
        assert_eq!(users.len(), 2);
    }

    #[test]
    fn test_user_list_without_either_shape() {
        let envelope: UserListEnvelope =
            serde_json::from_value(json!({"success": true})).unwrap();
        assert!(matches!(
            envelope.into_users().unwrap_err(),
            ApiError::InvalidResponse { .. }
        ));
    }

    #[test]
    fn test_ack_success() {
        let envelope: Envelope<Value> = decode(&json!({"success": true})).unwrap();
        assert!(envelope.into_ack().is_ok());
    }
}
