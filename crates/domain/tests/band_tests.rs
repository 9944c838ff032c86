//! Property tests for the fixed bucketing tables.

use proptest::prelude::*;
use study_console_domain::EngagementBand;

proptest! {
    /// Every finite score lands in exactly one band.
    #[test]
    fn every_score_has_exactly_one_band(score in 0.0f64..=10.0) {
        let bands = [
            EngagementBand::High,
            EngagementBand::Medium,
            EngagementBand::Low,
        ];
        let matching = bands.iter().filter(|b| b.contains(score)).count();
        prop_assert_eq!(matching, 1);
    }

    /// Band assignment is monotone: a higher score never maps to a lower band.
    #[test]
    fn band_is_monotone(a in 0.0f64..=10.0, b in 0.0f64..=10.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let rank = |band: EngagementBand| match band {
            EngagementBand::Low => 0,
            EngagementBand::Medium => 1,
            EngagementBand::High => 2,
        };
        prop_assert!(rank(EngagementBand::of_score(lo)) <= rank(EngagementBand::of_score(hi)));
    }
}
