//! Canonical domain types for the study-console admin core.
//!
//! Every admin view (users, points, payments) operates on the same
//! normalized [`UserRecord`] shape defined here, together with the closed
//! enums used by the filter engine. Bucketing tables for engagement bands
//! and activity windows live in [`bands`] and are defined exactly once;
//! downstream crates must not redefine their boundaries.

pub mod bands;
pub mod errors;
pub mod record;

pub use bands::{ActivityWindow, EngagementBand};
pub use errors::RecordError;
pub use record::{UserRecord, UserRole, UserStatus};
