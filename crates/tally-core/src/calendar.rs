use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::models::Frequency;

/// The local calendar date an instant falls on in the given timezone.
pub fn day_bucket(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// The Monday of the ISO week containing the instant's local date.
/// ISO weekday numbering: Monday=1 .. Sunday=7; weeks never start on Sunday.
pub fn week_bucket(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    let local = day_bucket(instant, tz);
    local - Duration::days(local.weekday().num_days_from_monday() as i64)
}

/// The bucket a completion at `instant` counts toward, per frequency.
/// Daily and one-off tasks use day buckets, weekly tasks use week buckets.
pub fn bucket_for(frequency: Frequency, instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    match frequency {
        Frequency::Weekly => week_bucket(instant, tz),
        Frequency::Daily | Frequency::None => day_bucket(instant, tz),
    }
}

/// The most recently closed daily bucket: yesterday, local.
pub fn closed_day_bucket(now: DateTime<Utc>, tz: Tz) -> NaiveDate {
    day_bucket(now, tz) - Duration::days(1)
}

/// The most recently closed weekly bucket: the Monday of the prior ISO week.
pub fn closed_week_bucket(now: DateTime<Utc>, tz: Tz) -> NaiveDate {
    week_bucket(now, tz) - Duration::days(7)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Weekday};
    use chrono_tz::Tz;
    use proptest::prelude::*;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn day_bucket_uses_local_date() {
        let ny: Tz = "America/New_York".parse().unwrap();
        // 03:00 UTC on Jan 1 is still Dec 31 in New York
        let instant = utc(2026, 1, 1, 3, 0);
        assert_eq!(
            day_bucket(instant, ny),
            NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()
        );
        assert_eq!(
            day_bucket(instant, chrono_tz::UTC),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
        );
    }

    #[test]
    fn week_bucket_is_monday_of_iso_week() {
        // 2026-01-01 is a Thursday; its ISO week starts 2025-12-29
        let instant = utc(2026, 1, 1, 12, 0);
        assert_eq!(
            week_bucket(instant, chrono_tz::UTC),
            NaiveDate::from_ymd_opt(2025, 12, 29).unwrap()
        );
    }

    #[test]
    fn same_iso_week_maps_to_same_bucket() {
        // Wednesday and Friday of the same week
        let wed = utc(2026, 8, 5, 9, 0);
        let fri = utc(2026, 8, 7, 22, 0);
        assert_eq!(
            week_bucket(wed, chrono_tz::UTC),
            week_bucket(fri, chrono_tz::UTC)
        );
        assert_eq!(
            week_bucket(wed, chrono_tz::UTC),
            NaiveDate::from_ymd_opt(2026, 8, 3).unwrap()
        );
    }

    #[test]
    fn sunday_belongs_to_the_preceding_monday_week() {
        // 2026-08-09 is a Sunday; its week started on 2026-08-03
        let sun = utc(2026, 8, 9, 12, 0);
        assert_eq!(
            week_bucket(sun, chrono_tz::UTC),
            NaiveDate::from_ymd_opt(2026, 8, 3).unwrap()
        );
    }

    #[test]
    fn closed_buckets_trail_the_current_ones() {
        let now = utc(2026, 8, 7, 12, 0); // Friday
        assert_eq!(
            closed_day_bucket(now, chrono_tz::UTC),
            NaiveDate::from_ymd_opt(2026, 8, 6).unwrap()
        );
        assert_eq!(
            closed_week_bucket(now, chrono_tz::UTC),
            NaiveDate::from_ymd_opt(2026, 7, 27).unwrap()
        );
    }

    #[test]
    fn bucket_for_splits_by_frequency() {
        let instant = utc(2026, 8, 5, 9, 0);
        assert_eq!(
            bucket_for(Frequency::Daily, instant, chrono_tz::UTC),
            NaiveDate::from_ymd_opt(2026, 8, 5).unwrap()
        );
        assert_eq!(
            bucket_for(Frequency::None, instant, chrono_tz::UTC),
            NaiveDate::from_ymd_opt(2026, 8, 5).unwrap()
        );
        assert_eq!(
            bucket_for(Frequency::Weekly, instant, chrono_tz::UTC),
            NaiveDate::from_ymd_opt(2026, 8, 3).unwrap()
        );
    }

    const TZ_SAMPLES: &[&str] = &[
        "UTC",
        "America/New_York",
        "America/Los_Angeles",
        "Europe/Berlin",
        "Asia/Tokyo",
        "Australia/Sydney",
        "Pacific/Kiritimati",
    ];

    fn arb_instant() -> impl Strategy<Value = DateTime<Utc>> {
        // 2000-01-01 .. 2100-01-01
        (946_684_800i64..4_102_444_800i64)
            .prop_map(|secs| Utc.timestamp_opt(secs, 0).unwrap())
    }

    fn arb_tz() -> impl Strategy<Value = Tz> {
        proptest::sample::select(TZ_SAMPLES).prop_map(|name| name.parse().unwrap())
    }

    proptest! {
        #[test]
        fn buckets_are_deterministic(instant in arb_instant(), tz in arb_tz()) {
            prop_assert_eq!(day_bucket(instant, tz), day_bucket(instant, tz));
            prop_assert_eq!(week_bucket(instant, tz), week_bucket(instant, tz));
        }

        #[test]
        fn week_bucket_always_falls_on_monday(instant in arb_instant(), tz in arb_tz()) {
            prop_assert_eq!(week_bucket(instant, tz).weekday(), Weekday::Mon);
        }

        #[test]
        fn week_bucket_never_after_day_bucket(instant in arb_instant(), tz in arb_tz()) {
            prop_assert!(week_bucket(instant, tz) <= day_bucket(instant, tz));
        }
    }
}
