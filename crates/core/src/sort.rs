//! Sort comparator for the user list views.
//!
//! [`compare`] is a total order for any two records: missing values sort
//! after present ones regardless of direction, and ties are broken by `id`
//! so identical inputs always produce identical row order.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use study_console_domain::UserRecord;

/// Sortable columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    DisplayName,
    Email,
    Role,
    Status,
    CreatedAt,
    LastActivity,
    StudiesCreated,
    EngagementScore,
    TotalRevenue,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Flip the direction.
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Current sort column and direction for a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortState {
    /// Sort state after a first click on `field`.
    ///
    /// A newly selected field starts descending; this mirrors the existing
    /// UI behavior and must not be re-derived per view.
    pub fn new(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }

    /// React to a header click: same field flips direction, a new field
    /// starts over descending.
    pub fn toggle(&mut self, field: SortField) {
        if self.field == field {
            self.direction = self.direction.toggled();
        } else {
            *self = Self::new(field);
        }
    }
}

impl Default for SortState {
    fn default() -> Self {
        Self::new(SortField::CreatedAt)
    }
}

/// Compare two records under a field and direction.
pub fn compare(a: &UserRecord, b: &UserRecord, field: SortField, direction: SortDirection) -> Ordering {
    let primary = match field {
        SortField::DisplayName => directed(
            a.display_name.to_lowercase().cmp(&b.display_name.to_lowercase()),
            direction,
        ),
        SortField::Email => directed(a.email.to_lowercase().cmp(&b.email.to_lowercase()), direction),
        SortField::Role => directed(a.role.as_str().cmp(b.role.as_str()), direction),
        SortField::Status => directed(a.status.as_str().cmp(b.status.as_str()), direction),
        SortField::CreatedAt => nullable(a.created_at, b.created_at, direction),
        SortField::LastActivity => nullable(a.last_activity_at, b.last_activity_at, direction),
        SortField::StudiesCreated => directed(a.studies_created.cmp(&b.studies_created), direction),
        SortField::EngagementScore => directed(
            a.engagement_score.total_cmp(&b.engagement_score),
            direction,
        ),
        SortField::TotalRevenue => directed(a.total_revenue.total_cmp(&b.total_revenue), direction),
    };
    // Deterministic tie-break so re-renders with identical inputs keep
    // identical order.
    primary.then_with(|| a.id.cmp(&b.id))
}

/// Sort a borrowed view of records in place.
pub fn sort_records(records: &mut [&UserRecord], state: SortState) {
    records.sort_by(|a, b| compare(a, b, state.field, state.direction));
}

fn directed(ordering: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

/// Missing values sort after present values in both directions; they are
/// never coerced to zero or an empty string.
fn nullable<T: Ord>(a: Option<T>, b: Option<T>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => directed(x.cmp(&y), direction),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
