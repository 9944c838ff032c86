//! Mock implementations of the bulk-action port.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use study_console_core::{ActionError, BulkAction, UserActions};

/// Scripted implementation of [`UserActions`] that records every call and
/// fails for a configured set of IDs.
#[derive(Clone, Default)]
pub struct RecordingUserActions {
    failing: HashSet<String>,
    calls: Arc<Mutex<Vec<(BulkAction, String)>>>,
}

impl RecordingUserActions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every call targeting one of `ids`.
    pub fn failing_for(ids: &[&str]) -> Self {
        Self {
            failing: ids.iter().map(|s| s.to_string()).collect(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every `(action, id)` pair applied so far, in dispatch order.
    pub fn calls(&self) -> Vec<(BulkAction, String)> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl UserActions for RecordingUserActions {
    async fn apply(&self, action: BulkAction, id: &str) -> Result<(), ActionError> {
        self.calls.lock().push((action, id.to_string()));
        if self.failing.contains(id) {
            Err(ActionError::new(format!("scripted failure for {id}")))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_calls_and_fails_on_script() {
        let actions = RecordingUserActions::failing_for(&["bad"]);
        assert!(actions.apply(BulkAction::Notify, "good").await.is_ok());
        assert!(actions.apply(BulkAction::Notify, "bad").await.is_err());
        assert_eq!(actions.call_count(), 2);
        assert_eq!(actions.calls()[1].1, "bad");
    }
}
