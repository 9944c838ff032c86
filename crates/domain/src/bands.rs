//! Fixed bucketing tables for continuous filter dimensions.
//!
//! Engagement bands and activity windows are the two places where a
//! continuous value is folded into a named bucket for filtering. The
//! boundaries are deliberately not configurable and defined only here.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named engagement bucket derived from a 0-10 engagement score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementBand {
    High,
    Medium,
    Low,
}

impl EngagementBand {
    /// Scores at or above this are `High`.
    pub const HIGH_MIN: f64 = 7.0;
    /// Scores at or above this (and below [`Self::HIGH_MIN`]) are `Medium`.
    pub const MEDIUM_MIN: f64 = 4.0;

    /// Bucket a score. Total over all floats; NaN lands in `Low`.
    pub fn of_score(score: f64) -> Self {
        if score >= Self::HIGH_MIN {
            Self::High
        } else if score >= Self::MEDIUM_MIN {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Whether a score falls into this band.
    pub fn contains(&self, score: f64) -> bool {
        Self::of_score(score) == *self
    }
}

impl fmt::Display for EngagementBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// Named trailing window used by the date-range filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityWindow {
    Today,
    PastWeek,
    PastMonth,
}

impl ActivityWindow {
    /// Length of the window, measured back from `now`.
    pub fn length(&self) -> Duration {
        match self {
            Self::Today => Duration::days(1),
            Self::PastWeek => Duration::days(7),
            Self::PastMonth => Duration::days(30),
        }
    }

    /// Whether `ts` falls inside the window ending at `now`.
    ///
    /// `now` is passed in rather than read from the clock so the predicate
    /// stays pure.
    pub fn contains(&self, ts: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        ts <= now && ts >= now - self.length()
    }
}

impl fmt::Display for ActivityWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Today => write!(f, "today"),
            Self::PastWeek => write!(f, "week"),
            Self::PastMonth => write!(f, "month"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(EngagementBand::of_score(10.0), EngagementBand::High);
        assert_eq!(EngagementBand::of_score(7.0), EngagementBand::High);
        assert_eq!(EngagementBand::of_score(6.99), EngagementBand::Medium);
        assert_eq!(EngagementBand::of_score(4.0), EngagementBand::Medium);
        assert_eq!(EngagementBand::of_score(3.99), EngagementBand::Low);
        assert_eq!(EngagementBand::of_score(0.0), EngagementBand::Low);
    }

    #[test]
    fn test_band_nan_is_low() {
        assert_eq!(EngagementBand::of_score(f64::NAN), EngagementBand::Low);
    }

    #[test]
    fn test_band_contains_matches_of_score() {
        for score in [0.0, 3.9, 4.0, 5.5, 7.0, 9.9] {
            let band = EngagementBand::of_score(score);
            assert!(band.contains(score));
        }
    }

    #[test]
    fn test_window_contains() {
        let now = Utc::now();
        let window = ActivityWindow::PastWeek;

        assert!(window.contains(now, now));
        assert!(window.contains(now - Duration::days(6), now));
        assert!(!window.contains(now - Duration::days(8), now));
        // Future timestamps are never inside a trailing window.
        assert!(!window.contains(now + Duration::hours(1), now));
    }

    #[test]
    fn test_window_lengths() {
        assert_eq!(ActivityWindow::Today.length(), Duration::days(1));
        assert_eq!(ActivityWindow::PastWeek.length(), Duration::days(7));
        assert_eq!(ActivityWindow::PastMonth.length(), Duration::days(30));
    }
}
