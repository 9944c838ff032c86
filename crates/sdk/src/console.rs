//! High-level admin console facade.
//!
//! Ties the SDK to the data-shaping core: fetch -> normalize -> wholesale
//! record swap in the directory, and bulk actions that clear the selection
//! and refetch exactly once after every per-item call has settled. Local
//! state is never patched optimistically; the server round trip is the
//! source of truth.

use crate::client::Client;
use crate::error::{ApiError, ApiResult};
use crate::services::UserAdminService;
use chrono::{DateTime, Utc};
use study_console_core::{
    BulkAction, BulkCoordinator, BulkError, BulkOutcome, Confirmation, UserDirectory,
};
use tracing::{info, instrument, warn};

/// Result of a bulk run: the settled per-item accounting plus the status
/// of the follow-up refetch.
///
/// The outcome describes calls that already reached the server, so it is
/// kept even when the refetch fails; the caller always learns what the
/// bulk action actually did.
#[derive(Debug)]
pub struct BulkReport {
    /// Aggregate per-item accounting.
    pub outcome: BulkOutcome,
    /// Error from the single post-settlement refetch, if it failed. The
    /// directory still holds the pre-action records in that case.
    pub refresh_error: Option<ApiError>,
}

/// Stateful console session over one user list view.
pub struct AdminConsole {
    users: UserAdminService,
    directory: UserDirectory,
}

impl AdminConsole {
    /// Create a console over an API client.
    pub fn new(client: Client) -> Self {
        Self {
            users: client.users(),
            directory: UserDirectory::new(),
        }
    }

    /// The directory backing this view.
    pub fn directory(&self) -> &UserDirectory {
        &self.directory
    }

    /// Mutable access for filter/sort/selection changes.
    pub fn directory_mut(&mut self) -> &mut UserDirectory {
        &mut self.directory
    }

    /// Fetch the user list and replace the in-memory array wholesale.
    ///
    /// On failure the previous records stay visible; the error is returned
    /// for the caller to surface, never swallowed and never replaced with
    /// sample data.
    #[instrument(skip(self))]
    pub async fn refresh(&mut self, now: DateTime<Utc>) -> ApiResult<usize> {
        let records = self.users.list().await?;
        let count = records.len();
        self.directory.replace_records(records, now);
        info!(count, "user list refreshed");
        Ok(count)
    }

    /// Run a bulk action over the current selection.
    ///
    /// All per-item calls are dispatched and individually awaited; after
    /// they settle (fully or partially successful) the selection is
    /// cleared and a single refetch replaces the record array. Once the
    /// calls have settled the outcome is always returned: a refetch
    /// failure is carried alongside it in the [`BulkReport`], never in
    /// place of it, since the per-item mutations already happened on the
    /// server. `Err` is only possible before dispatch (confirmation gate).
    #[instrument(skip(self), fields(action = %action))]
    pub async fn run_bulk(
        &mut self,
        action: BulkAction,
        confirmation: Confirmation,
        now: DateTime<Utc>,
    ) -> ApiResult<BulkReport> {
        let coordinator = BulkCoordinator::new(self.users.clone());
        let outcome = coordinator
            .run(action, self.directory.selection(), confirmation)
            .await
            .map_err(|e| match e {
                BulkError::ConfirmationRequired { action } => ApiError::validation(
                    format!("bulk {action} requires explicit confirmation"),
                    vec![],
                ),
            })?;

        self.directory.clear_selection();
        let refresh_error = match self.refresh(now).await {
            Ok(_) => None,
            Err(err) => {
                warn!(error = %err, summary = %outcome.summary(), "refetch after bulk action failed");
                Some(err)
            }
        };

        Ok(BulkReport {
            outcome,
            refresh_error,
        })
    }
}
