//! # Study Console SDK
//!
//! Typed client for the study-console admin API, plus the [`AdminConsole`]
//! facade wiring it to the data-shaping core (normalize, filter, sort,
//! select, bulk actions).
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use chrono::Utc;
//! use study_console_sdk::{AdminConsole, Client};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::builder()
//!         .base_url("https://admin.example.com")
//!         .bearer_token("token-from-storage")
//!         .build()?;
//!
//!     let mut console = AdminConsole::new(client);
//!     console.refresh(Utc::now()).await?;
//!     for record in console.directory().visible(Utc::now()) {
//!         println!("{} <{}> {}", record.display_name, record.email, record.status);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error handling
//!
//! Every operation returns `Result<T, ApiError>`. A `success: false`
//! envelope is a failure even on HTTP 200; transport problems and non-JSON
//! bodies surface as [`ApiError::Transport`].

#![warn(missing_docs)]

pub mod client;
pub mod config;
pub mod console;
pub mod envelope;
pub mod error;
pub mod services;

// Re-exports
pub use client::{Client, ClientBuilder};
pub use config::ClientConfig;
pub use console::{AdminConsole, BulkReport};
pub use envelope::{Envelope, UserListEnvelope};
pub use error::{ApiError, ApiResult, FieldError};
pub use services::*;

/// SDK version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default API URL.
pub const DEFAULT_API_URL: &str = "https://api.study-console.org";
