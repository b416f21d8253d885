use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::models::Frequency;

/// Penalty applied per missed closed bucket, by frequency.
pub const DAILY_PENALTY: i64 = -3;
pub const WEEKLY_PENALTY: i64 = -5;

/// Streak continuation rule.
///
/// Derived solely from the immediately preceding completion bucket: the
/// result is 2 iff the previous bucket is exactly one period behind the
/// current one, 1 in every other case (no history, same bucket, or any
/// larger gap). One-off tasks never track continuity.
pub fn streak_after(
    frequency: Frequency,
    last_bucket: Option<NaiveDate>,
    current_bucket: NaiveDate,
) -> i64 {
    let period_days = match frequency {
        Frequency::None => return 1,
        Frequency::Daily => 1,
        Frequency::Weekly => 7,
    };
    match last_bucket {
        Some(last) if (current_bucket - last).num_days() == period_days => 2,
        _ => 1,
    }
}

/// Bounded-reputation step bonus: non-decreasing in streak length,
/// zero below the lowest threshold.
pub fn streak_bonus(streak_after: i64) -> i64 {
    if streak_after >= 30 {
        10
    } else if streak_after >= 14 {
        7
    } else if streak_after >= 7 {
        5
    } else if streak_after >= 3 {
        3
    } else {
        0
    }
}

/// Unbounded-XP multiplier: +2% per streak step, capped at ten steps.
pub fn streak_multiplier(streak_after: i64) -> f64 {
    let steps = (streak_after - 1).clamp(0, 10);
    1.0 + 0.02 * steps as f64
}

/// Total XP required to reach a level: floor(100 * (level - 1)^1.5).
pub fn xp_for_level(level: i64) -> i64 {
    (100.0 * ((level - 1) as f64).powf(1.5)).floor() as i64
}

/// The largest level whose threshold does not exceed the total.
pub fn level_from_xp(total_xp: i64) -> i64 {
    let mut level = 1;
    while xp_for_level(level + 1) <= total_xp {
        level += 1;
    }
    level
}

/// How completions are converted into points.
///
/// The two variants are mutually exclusive presentations of the same
/// completion event: `Reputation` keeps a lifetime score in a roughly fixed
/// range via flat additive bonuses, `Xp` feeds an ever-growing total that
/// maps to a level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringPolicy {
    #[default]
    Reputation,
    Xp,
}

impl ScoringPolicy {
    /// Base award per frequency, before any streak adjustment.
    pub fn base(&self, frequency: Frequency) -> i64 {
        match self {
            ScoringPolicy::Reputation => match frequency {
                Frequency::Daily => 2,
                Frequency::Weekly => 5,
                Frequency::None => 2,
            },
            ScoringPolicy::Xp => match frequency {
                Frequency::Daily => 10,
                Frequency::Weekly => 15,
                Frequency::None => 8,
            },
        }
    }

    /// Points awarded for a completion with the given streak.
    pub fn award(&self, frequency: Frequency, streak_after: i64) -> i64 {
        let base = self.base(frequency);
        match self {
            ScoringPolicy::Reputation => base + streak_bonus(streak_after),
            ScoringPolicy::Xp => (base as f64 * streak_multiplier(streak_after)).round() as i64,
        }
    }

    /// Penalty delta for a missed closed bucket. One-off tasks are never
    /// penalized.
    pub fn penalty(&self, frequency: Frequency) -> i64 {
        match frequency {
            Frequency::Daily => DAILY_PENALTY,
            Frequency::Weekly => WEEKLY_PENALTY,
            Frequency::None => 0,
        }
    }
}

impl std::fmt::Display for ScoringPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoringPolicy::Reputation => write!(f, "reputation"),
            ScoringPolicy::Xp => write!(f, "xp"),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid scoring policy: {0}")]
pub struct ParseScoringPolicyError(String);

impl FromStr for ScoringPolicy {
    type Err = ParseScoringPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reputation" | "rep" => Ok(ScoringPolicy::Reputation),
            "xp" => Ok(ScoringPolicy::Xp),
            _ => Err(ParseScoringPolicyError(s.to_string())),
        }
    }
}

/// Human-facing reliability tier for a bounded reputation score.
pub fn tier_for_score(score: i64) -> &'static str {
    if score >= 98 {
        "Legendary"
    } else if score >= 92 {
        "Exemplary"
    } else if score >= 85 {
        "Trusted"
    } else if score >= 75 {
        "Disciplined"
    } else if score >= 60 {
        "Consistent"
    } else if score >= 45 {
        "Reliable"
    } else if score >= 30 {
        "Average"
    } else if score >= 20 {
        "Unsteady"
    } else if score >= 10 {
        "Inconsistent"
    } else {
        "Unreliable"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn one_off_tasks_never_streak() {
        assert_eq!(streak_after(Frequency::None, None, d(2026, 8, 7)), 1);
        assert_eq!(
            streak_after(Frequency::None, Some(d(2026, 8, 6)), d(2026, 8, 7)),
            1
        );
    }

    #[rstest]
    #[case(None, 1)] // no history
    #[case(Some(d(2026, 8, 6)), 2)] // consecutive day
    #[case(Some(d(2026, 8, 7)), 1)] // same bucket re-evaluated
    #[case(Some(d(2026, 8, 5)), 1)] // one day skipped
    #[case(Some(d(2026, 7, 1)), 1)] // long gap
    fn daily_streak_rule(#[case] last: Option<NaiveDate>, #[case] expected: i64) {
        assert_eq!(streak_after(Frequency::Daily, last, d(2026, 8, 7)), expected);
    }

    #[rstest]
    #[case(None, 1)]
    #[case(Some(d(2026, 7, 27)), 2)] // previous ISO week
    #[case(Some(d(2026, 8, 3)), 1)] // same week
    #[case(Some(d(2026, 7, 20)), 1)] // one week skipped
    fn weekly_streak_rule(#[case] last: Option<NaiveDate>, #[case] expected: i64) {
        // current bucket: Monday 2026-08-03
        assert_eq!(
            streak_after(Frequency::Weekly, last, d(2026, 8, 3)),
            expected
        );
    }

    #[rstest]
    #[case(1, 0)]
    #[case(2, 0)]
    #[case(3, 3)]
    #[case(6, 3)]
    #[case(7, 5)]
    #[case(14, 7)]
    #[case(30, 10)]
    #[case(100, 10)]
    fn reputation_bonus_steps(#[case] streak: i64, #[case] bonus: i64) {
        assert_eq!(streak_bonus(streak), bonus);
    }

    #[test]
    fn reputation_award_is_base_plus_bonus() {
        let p = ScoringPolicy::Reputation;
        assert_eq!(p.award(Frequency::Daily, 1), 2);
        assert_eq!(p.award(Frequency::Daily, 3), 5);
        assert_eq!(p.award(Frequency::Weekly, 1), 5);
        assert_eq!(p.award(Frequency::Weekly, 30), 15);
        assert_eq!(p.award(Frequency::None, 1), 2);
    }

    #[test]
    fn xp_award_rounds_base_times_multiplier() {
        let p = ScoringPolicy::Xp;
        assert_eq!(p.award(Frequency::Daily, 1), 10); // 10 * 1.00
        assert_eq!(p.award(Frequency::Daily, 2), 10); // 10 * 1.02 rounds down
        assert_eq!(p.award(Frequency::Weekly, 2), 15); // 15 * 1.02 = 15.3
        assert_eq!(p.award(Frequency::Weekly, 6), 17); // 15 * 1.10 = 16.5
        assert_eq!(p.award(Frequency::Daily, 11), 12); // 10 * 1.20, cap at 10 steps
        assert_eq!(p.award(Frequency::Daily, 50), 12); // still capped
    }

    #[test]
    fn level_thresholds() {
        assert_eq!(xp_for_level(1), 0);
        assert_eq!(xp_for_level(2), 100);
        assert_eq!(xp_for_level(3), 282); // floor(100 * 2^1.5)
        assert_eq!(level_from_xp(0), 1);
        assert_eq!(level_from_xp(99), 1);
        assert_eq!(level_from_xp(100), 2);
        assert_eq!(level_from_xp(282), 3);
        assert_eq!(xp_for_level(10), 2700); // 100 * 9^1.5
        assert_eq!(level_from_xp(3000), 10);
    }

    #[test]
    fn penalties_by_frequency() {
        let p = ScoringPolicy::Reputation;
        assert_eq!(p.penalty(Frequency::Daily), -3);
        assert_eq!(p.penalty(Frequency::Weekly), -5);
        assert_eq!(p.penalty(Frequency::None), 0);
    }

    #[rstest]
    #[case(0, "Unreliable")]
    #[case(10, "Inconsistent")]
    #[case(29, "Unsteady")]
    #[case(59, "Reliable")]
    #[case(60, "Consistent")]
    #[case(97, "Exemplary")]
    #[case(98, "Legendary")]
    fn tier_labels(#[case] score: i64, #[case] tier: &str) {
        assert_eq!(tier_for_score(score), tier);
    }

    fn arb_frequency() -> impl Strategy<Value = Frequency> {
        proptest::sample::select(vec![Frequency::Daily, Frequency::Weekly, Frequency::None])
    }

    proptest! {
        #[test]
        fn streak_is_always_one_or_two(
            freq in arb_frequency(),
            last_offset in proptest::option::of(0i64..400),
            day in 0i64..30000,
        ) {
            let current = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()
                + chrono::Duration::days(day);
            let last = last_offset.map(|o| current - chrono::Duration::days(o));
            let s = streak_after(freq, last, current);
            prop_assert!(s == 1 || s == 2);
            if freq == Frequency::None {
                prop_assert_eq!(s, 1);
            }
        }

        #[test]
        fn award_never_below_base(
            freq in arb_frequency(),
            streak in 1i64..1000,
        ) {
            for policy in [ScoringPolicy::Reputation, ScoringPolicy::Xp] {
                prop_assert!(policy.award(freq, streak) >= policy.base(freq));
            }
        }
    }
}
