//! Points for a correct answer.
//!
//! `time_bonus = ceil(remaining / total * 100)`, then multiplied by
//! `1 + 0.1 * prior_combo` and rounded up. The multiplier is applied in integer
//! tenths so `100 * 1.1` is 110, not 111.

/// Absorbs float noise in `remaining / total` (e.g. 6.9999999 / 7).
const RATIO_EPSILON: f64 = 1e-9;

pub fn time_bonus(time_remaining: f64, total_time: f64) -> u32 {
    if total_time <= 0.0 || time_remaining <= 0.0 {
        return 0;
    }
    let ratio = (time_remaining / total_time).clamp(0.0, 1.0);
    (ratio * 100.0 - RATIO_EPSILON).ceil().max(0.0) as u32
}

/// Points earned for a correct answer given the combo *before* this answer.
pub fn score(time_remaining: f64, total_time: f64, prior_combo: u32) -> u32 {
    let bonus = time_bonus(time_remaining, total_time);
    let tenths = 10u32.saturating_add(prior_combo);
    bonus.saturating_mul(tenths).div_ceil(10)
}

/// Upper bound on `score` for a given prior combo.
pub fn max_points(prior_combo: u32) -> u32 {
    score(1.0, 1.0, prior_combo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_full_time_no_combo_is_100() {
        assert_eq!(score(7.0, 7.0, 0), 100);
        assert_eq!(score(7.0, 7.0, 1), 110);
        assert_eq!(score(7.0, 7.0, 3), 130);
    }

    #[test]
    fn test_partial_time_rounds_up() {
        // 6.9 / 7 * 100 = 98.57 -> 99
        assert_eq!(score(6.9, 7.0, 0), 99);
        // 0.1 / 7 * 100 = 1.43 -> 2, then * 1.1 = 2.2 -> 3
        assert_eq!(score(0.1, 7.0, 1), 3);
        assert_eq!(time_bonus(0.0, 7.0), 0);
    }

    #[test]
    fn test_float_noise_does_not_bump_bonus() {
        let remaining = 70.0 * 0.1; // 7.000000000000001
        assert_eq!(time_bonus(remaining, 7.0), 100);
        assert_eq!(time_bonus(3.5000000000000004, 7.0), 50);
    }

    proptest! {
        #[test]
        fn prop_points_bounded(ticks in 1u32..=70, combo in 0u32..50) {
            let pts = score(ticks as f64 * 0.1, 7.0, combo);
            prop_assert!(pts > 0);
            prop_assert!(pts <= max_points(combo));
        }

        #[test]
        fn prop_points_monotonic_in_time(ticks in 1u32..70, combo in 0u32..50) {
            let less = score(ticks as f64 * 0.1, 7.0, combo);
            let more = score((ticks + 1) as f64 * 0.1, 7.0, combo);
            prop_assert!(less <= more);
        }
    }
}
