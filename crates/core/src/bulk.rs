//! Bulk-action coordinator.
//!
//! A bulk action maps one independent API call onto every selected record:
//! N concurrent, independent, non-cancelable requests. Failure of one does
//! not affect the others; every call is attempted and the aggregate
//! [`BulkOutcome`] accounts for partial success. The UI reports aggregate
//! counts, not per-item live status, but per-item errors are retained for
//! logging.

use crate::selection::SelectionSet;
use async_trait::async_trait;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::{info, warn};

/// Operations that can be applied to every selected record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkAction {
    Activate,
    Deactivate,
    Delete,
    Notify,
}

impl BulkAction {
    /// Destructive actions require an explicit confirmation before
    /// dispatch.
    pub fn is_destructive(&self) -> bool {
        matches!(self, Self::Delete)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Activate => "activate",
            Self::Deactivate => "deactivate",
            Self::Delete => "delete",
            Self::Notify => "notify",
        }
    }
}

impl fmt::Display for BulkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Confirmation state passed alongside a bulk action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    NotConfirmed,
}

/// Failure of one per-record call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ActionError {
    /// Human-readable failure message.
    pub message: String,
}

impl ActionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Per-record failure retained in the aggregate outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkItemError {
    pub id: String,
    pub message: String,
}

/// Aggregate result of a bulk action. Never discarded; always surfaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkOutcome {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub errors: Vec<BulkItemError>,
}

impl BulkOutcome {
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }

    /// Aggregate line for the UI, e.g. "2/3 succeeded".
    pub fn summary(&self) -> String {
        format!("{}/{} succeeded", self.succeeded, self.total)
    }
}

/// Why a bulk action was refused before any call was dispatched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BulkError {
    /// Destructive action attempted without the confirmation gate.
    #[error("bulk {action} requires explicit confirmation")]
    ConfirmationRequired { action: BulkAction },
}

/// Port through which the coordinator applies one action to one record.
///
/// Implemented over the admin HTTP API in the SDK crate, and by an
/// in-memory mock in tests.
#[async_trait]
pub trait UserActions: Send + Sync {
    async fn apply(&self, action: BulkAction, id: &str) -> Result<(), ActionError>;
}

/// Dispatches a bulk action across a selection and aggregates the results.
pub struct BulkCoordinator<A: UserActions> {
    actions: A,
}

impl<A: UserActions> BulkCoordinator<A> {
    pub fn new(actions: A) -> Self {
        Self { actions }
    }

    /// Access the underlying action port.
    pub fn actions(&self) -> &A {
        &self.actions
    }

    /// Run `action` against every selected ID.
    ///
    /// Every call is attempted regardless of earlier failures; the futures
    /// are awaited together and each captures its own error, so
    /// `succeeded + failed == total == |selection|` always holds. No
    /// automatic retry: a failed item must be re-invoked by the user from
    /// refreshed state.
    pub async fn run(
        &self,
        action: BulkAction,
        selection: &SelectionSet,
        confirmation: Confirmation,
    ) -> Result<BulkOutcome, BulkError> {
        if action.is_destructive() && confirmation != Confirmation::Confirmed {
            return Err(BulkError::ConfirmationRequired { action });
        }

        let ids: Vec<String> = selection.iter().map(str::to_string).collect();
        let total = ids.len();

        let calls = ids.into_iter().map(|id| {
            let actions = &self.actions;
            async move {
                match actions.apply(action, &id).await {
                    Ok(()) => Ok(id),
                    Err(err) => Err(BulkItemError {
                        id,
                        message: err.message,
                    }),
                }
            }
        });

        let settled = join_all(calls).await;

        let mut errors = Vec::new();
        let mut succeeded = 0;
        for result in settled {
            match result {
                Ok(_) => succeeded += 1,
                Err(item) => {
                    warn!(id = %item.id, action = %action, error = %item.message, "bulk item failed");
                    errors.push(item);
                }
            }
        }

        let outcome = BulkOutcome {
            total,
            succeeded,
            failed: errors.len(),
            errors,
        };
        info!(action = %action, summary = %outcome.summary(), "bulk action settled");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    /// Mock port that fails for a configured set of IDs.
    struct ScriptedActions {
        failing: Vec<String>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedActions {
        fn failing(ids: &[&str]) -> Self {
            Self {
                failing: ids.iter().map(|s| s.to_string()).collect(),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl UserActions for ScriptedActions {
        async fn apply(&self, _action: BulkAction, id: &str) -> Result<(), ActionError> {
            self.calls.lock().push(id.to_string());
            if self.failing.iter().any(|f| f == id) {
                Err(ActionError::new(format!("server rejected {id}")))
            } else {
                Ok(())
            }
        }
    }

    fn selection_of(ids: &[&str]) -> SelectionSet {
        let mut selection = SelectionSet::new();
        for id in ids {
            selection.toggle(id);
        }
        selection
    }

    #[tokio::test]
    async fn test_partial_failure_is_accounted() {
        let coordinator = BulkCoordinator::new(ScriptedActions::failing(&["u2"]));
        let selection = selection_of(&["u1", "u2", "u3"]);

        let outcome = coordinator
            .run(BulkAction::Delete, &selection, Confirmation::Confirmed)
            .await
            .unwrap();

        assert_eq!(outcome.total, 3);
        assert_eq!(outcome.succeeded, 2);
        assert_eq!(outcome.failed, 1);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].id, "u2");
        assert_eq!(outcome.summary(), "2/3 succeeded");

        // Every call was attempted despite the failure.
        assert_eq!(coordinator.actions().calls.lock().len(), 3);
    }

    #[tokio::test]
    async fn test_totals_always_balance() {
        let coordinator = BulkCoordinator::new(ScriptedActions::failing(&["a", "b", "c"]));
        let selection = selection_of(&["a", "b", "c"]);

        let outcome = coordinator
            .run(BulkAction::Notify, &selection, Confirmation::NotConfirmed)
            .await
            .unwrap();

        assert_eq!(outcome.succeeded + outcome.failed, outcome.total);
        assert_eq!(outcome.total, selection.len());
        assert!(!outcome.all_succeeded());
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let coordinator = BulkCoordinator::new(ScriptedActions::failing(&[]));
        let selection = selection_of(&["u1"]);

        let err = coordinator
            .run(BulkAction::Delete, &selection, Confirmation::NotConfirmed)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            BulkError::ConfirmationRequired {
                action: BulkAction::Delete
            }
        );
        // Nothing was dispatched.
        assert!(coordinator.actions().calls.lock().is_empty());
    }

    #[tokio::test]
    async fn test_non_destructive_needs_no_confirmation() {
        let coordinator = BulkCoordinator::new(ScriptedActions::failing(&[]));
        let selection = selection_of(&["u1", "u2"]);

        let outcome = coordinator
            .run(BulkAction::Activate, &selection, Confirmation::NotConfirmed)
            .await
            .unwrap();
        assert!(outcome.all_succeeded());
        assert_eq!(outcome.total, 2);
    }

    #[tokio::test]
    async fn test_empty_selection_is_a_noop() {
        let coordinator = BulkCoordinator::new(ScriptedActions::failing(&[]));
        let outcome = coordinator
            .run(
                BulkAction::Activate,
                &SelectionSet::new(),
                Confirmation::NotConfirmed,
            )
            .await
            .unwrap();
        assert_eq!(outcome.total, 0);
        assert!(outcome.all_succeeded());
    }
}
