//! Dashboard metrics service.
//!
//! Metrics, recent activity, and alerts are separate resources fetched by
//! separate requests. They are issued together but resolve independently:
//! each slot in [`DashboardOverview`] carries its own result, so a slow or
//! failing alert fetch never blocks or poisons the metrics. A failed fetch
//! is an explicit error, never substituted with fabricated sample data.

use crate::client::Client;
use crate::envelope::decode;
use crate::error::ApiResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Service for dashboard resources.
#[derive(Clone)]
pub struct DashboardService {
    client: Client,
}

impl DashboardService {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Fetch system metrics.
    #[instrument(skip(self))]
    pub async fn metrics(&self) -> ApiResult<SystemMetrics> {
        let body = self.client.get_json("/api/admin?action=metrics").await?;
        decode::<SystemMetrics>(&body)?.into_data()
    }

    /// Fetch recent activity.
    #[instrument(skip(self))]
    pub async fn activity(&self) -> ApiResult<Vec<ActivityEvent>> {
        let body = self.client.get_json("/api/admin?action=activity").await?;
        decode::<Vec<ActivityEvent>>(&body)?.into_data()
    }

    /// Fetch open alerts.
    #[instrument(skip(self))]
    pub async fn alerts(&self) -> ApiResult<Vec<Alert>> {
        let body = self.client.get_json("/api/admin?action=alerts").await?;
        decode::<Vec<Alert>>(&body)?.into_data()
    }

    /// Issue all three dashboard fetches together.
    ///
    /// No ordering is guaranteed between them and no result depends on
    /// another; each field holds its own outcome.
    pub async fn overview(&self) -> DashboardOverview {
        let (metrics, activity, alerts) =
            tokio::join!(self.metrics(), self.activity(), self.alerts());
        DashboardOverview {
            metrics,
            activity,
            alerts,
        }
    }
}

/// Aggregate of the three independent dashboard fetches.
#[derive(Debug)]
pub struct DashboardOverview {
    /// System metrics result.
    pub metrics: ApiResult<SystemMetrics>,
    /// Recent activity result.
    pub activity: ApiResult<Vec<ActivityEvent>>,
    /// Open alerts result.
    pub alerts: ApiResult<Vec<Alert>>,
}

/// Platform-wide counters shown at the top of the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemMetrics {
    /// Registered user count.
    pub total_users: u64,
    /// Active user count.
    pub active_users: u64,
    /// Studies created across the platform.
    pub total_studies: u64,
    /// Cumulative revenue; zero when the server omits it.
    #[serde(default)]
    pub total_revenue: f64,
}

/// One entry in the recent-activity feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEvent {
    /// Event identifier.
    pub id: String,
    /// Human-readable description.
    pub message: String,
    /// When the event happened, if the server recorded it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// An open system alert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    /// Alert identifier.
    pub id: String,
    /// Severity label as reported by the server.
    pub severity: String,
    /// Human-readable description.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::Envelope;
    use serde_json::json;

    #[test]
    fn test_metrics_decoding() {
        let envelope: Envelope<SystemMetrics> = decode(&json!({
            "success": true,
            "data": {"total_users": 10, "active_users": 4, "total_studies": 2}
        }))
        .unwrap();
        let metrics = envelope.into_data().unwrap();
        assert_eq!(metrics.total_users, 10);
        assert_eq!(metrics.total_revenue, 0.0);
    }
}
