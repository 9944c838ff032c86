//! Testing utilities for the study console
//!
//! This crate provides:
//! - Fixture functions for canonical records and raw API payloads
//! - A builder for constructing records with specific fields
//! - A scripted mock of the bulk-action port
//!
//! # Examples
//!
//! ```
//! use study_console_testing::{builders::*, fixtures::*};
//! use study_console_domain::UserRole;
//!
//! let record = UserRecordBuilder::new()
//!     .with_email("alice@example.com")
//!     .with_role(UserRole::Researcher)
//!     .build();
//! assert!(record.role.can_create_studies());
//! ```

pub mod builders;
pub mod fixtures;
pub mod mocks;

// Re-export commonly used types
pub use builders::*;
pub use fixtures::*;
pub use mocks::*;

// Re-export testing dependencies for convenience
pub use fake;
pub use proptest;
pub use wiremock;
