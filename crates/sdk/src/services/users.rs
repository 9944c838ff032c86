//! User administration service.
//!
//! Wraps the admin user endpoints and implements the [`UserActions`] port
//! the bulk coordinator dispatches through. Requests that fail validation
//! are rejected before anything is sent to the server.

use crate::client::Client;
use crate::envelope::{decode, UserListEnvelope};
use crate::error::{ApiError, ApiResult, FieldError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use study_console_core::{normalize_users, ActionError, BulkAction, UserActions};
use study_console_domain::{UserRecord, UserRole, UserStatus};
use tracing::instrument;
use validator::Validate;

/// Path of the consolidated user-list endpoint.
const USERS_LIST_PATH: &str = "/api/admin?action=users";

/// Service for user administration operations.
#[derive(Clone)]
pub struct UserAdminService {
    client: Client,
}

impl UserAdminService {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Fetch and normalize the full user list.
    ///
    /// The response may nest the array under `data.users` or carry it at
    /// the top level; both shapes are accepted. Malformed individual
    /// records are skipped by the normalizer, never fabricated.
    #[instrument(skip(self))]
    pub async fn list(&self) -> ApiResult<Vec<UserRecord>> {
        let body = self.client.get_json(USERS_LIST_PATH).await?;
        let envelope: UserListEnvelope =
            serde_json::from_value(body).map_err(|e| ApiError::InvalidResponse {
                message: format!("failed to decode user list: {e}"),
            })?;
        let raw_users = envelope.into_users()?;

        normalize_users(&Value::Array(raw_users)).map_err(|e| ApiError::InvalidResponse {
            message: e.to_string(),
        })
    }

    /// Create a user. Validation failures are caught before dispatch.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn create(&self, request: CreateUserRequest) -> ApiResult<()> {
        request.validate().map_err(validation_error)?;
        let body = self.client.post_json("/users", &request).await?;
        decode::<Value>(&body)?.into_ack()
    }

    /// Update a user.
    #[instrument(skip(self, request))]
    pub async fn update(&self, id: &str, request: UpdateUserRequest) -> ApiResult<()> {
        let body = self.client.put_json(&format!("/users/{id}"), &request).await?;
        decode::<Value>(&body)?.into_ack()
    }

    /// Delete a user.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        let body = self.client.delete_json(&format!("/users/{id}")).await?;
        decode::<Value>(&body)?.into_ack()
    }

    /// Apply an administrative action (suspend/activate/notify and the
    /// like) to one user.
    #[instrument(skip(self, request))]
    pub async fn admin_action(&self, id: &str, request: AdminActionRequest) -> ApiResult<()> {
        let body = self
            .client
            .post_json(&format!("/api/admin/users/{id}/action"), &request)
            .await?;
        decode::<Value>(&body)?.into_ack()
    }
}

/// One bulk item maps to one independent request; errors come back as
/// messages for the aggregate outcome rather than aborting the batch.
#[async_trait]
impl UserActions for UserAdminService {
    async fn apply(&self, action: BulkAction, id: &str) -> Result<(), ActionError> {
        let result = match action {
            BulkAction::Delete => self.delete(id).await,
            BulkAction::Activate | BulkAction::Deactivate | BulkAction::Notify => {
                self.admin_action(id, AdminActionRequest::new(action.as_str())).await
            }
        };
        result.map_err(|e| ActionError::new(e.to_string()))
    }
}

/// Request to create a user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Account email address.
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    /// Minimum length enforced client-side; never sent when too short.
    #[validate(length(min = 8, message = "must be at least 8 characters"))]
    pub password: String,
    /// Optional display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Optional role, server default applies when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

impl CreateUserRequest {
    /// Start a request with the two required fields.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            name: None,
            role: None,
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the role.
    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = Some(role);
        self
    }
}

/// Request to update a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New role.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    /// New status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
    /// New subscription plan.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_plan: Option<String>,
}

/// Body of an administrative action request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminActionRequest {
    /// Action verb understood by the server.
    pub action: String,
    /// Optional operator-supplied reason.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl AdminActionRequest {
    /// Build a request for the given action verb.
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            reason: None,
        }
    }

    /// Attach a reason.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

fn validation_error(errors: validator::ValidationErrors) -> ApiError {
    let fields: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                FieldError::new(*field, message)
            })
        })
        .collect();
    ApiError::validation("request failed validation", fields)
}
