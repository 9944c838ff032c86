//! Per-resource API services.

mod dashboard;
mod users;

pub use dashboard::{ActivityEvent, Alert, DashboardOverview, DashboardService, SystemMetrics};
pub use users::{AdminActionRequest, CreateUserRequest, UpdateUserRequest, UserAdminService};
