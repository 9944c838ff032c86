//! Data-shaping core shared by every admin list view.
//!
//! The admin surface repeats the same four-stage pipeline on each screen:
//! loose API payload -> [`normalize`] -> in-memory record array ->
//! [`filter`] -> [`sort`] -> rendered rows, with [`selection`] and [`bulk`]
//! operating on the filtered view. This crate implements each stage once,
//! as pure functions plus the [`directory`] state container, so no screen
//! carries its own copy of the logic.

pub mod bulk;
pub mod directory;
pub mod filter;
pub mod normalize;
pub mod selection;
pub mod sort;

pub use bulk::{
    ActionError, BulkAction, BulkCoordinator, BulkError, BulkItemError, BulkOutcome, Confirmation,
    UserActions,
};
pub use directory::UserDirectory;
pub use filter::UserFilter;
pub use normalize::{normalize_record, normalize_users, NormalizeError};
pub use selection::SelectionSet;
pub use sort::{compare, sort_records, SortDirection, SortField, SortState};
