//! Property tests for week slicing and frequency aggregation.

use chrono::{DateTime, Datelike, Duration, Timelike, Utc, Weekday};
use chrono_tz::Asia::Seoul;
use habitcheck_core::{
    slice_complete_weeks, FrequencyAggregator, VerificationKind, VerificationMethod,
    VerificationRecord,
};
use proptest::prelude::*;

// 2000-01-01 .. 2100-01-01
const MIN_MS: i64 = 946_684_800_000;
const MAX_MS: i64 = 4_102_444_800_000;
const DAY_MS: i64 = 86_400_000;

fn instant(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).unwrap()
}

fn arb_range() -> impl Strategy<Value = (DateTime<Utc>, DateTime<Utc>)> {
    (MIN_MS..MAX_MS, 0..(120 * DAY_MS)).prop_map(|(start, len)| (instant(start), instant(start + len)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every window is a full Monday..Sunday week with both ends in range.
    #[test]
    fn prop_windows_are_complete_weeks((start, end) in arb_range()) {
        for w in slice_complete_weeks(start, end) {
            let local_start = w.start.with_timezone(&Seoul);
            let local_end = w.end.with_timezone(&Seoul);

            prop_assert_eq!(local_start.weekday(), Weekday::Mon);
            prop_assert_eq!((local_start.hour(), local_start.minute(), local_start.second()), (0, 0, 0));
            prop_assert_eq!(local_start.timestamp_subsec_millis(), 0);
            prop_assert_eq!(local_end.weekday(), Weekday::Sun);
            prop_assert_eq!((local_end.hour(), local_end.minute(), local_end.second()), (23, 59, 59));
            prop_assert_eq!(local_end.timestamp_subsec_millis(), 999);
            prop_assert_eq!(w.end - w.start, Duration::days(7) - Duration::milliseconds(1));

            prop_assert!(w.start >= start);
            // The range end covers its whole second.
            prop_assert!(w.end.timestamp() <= end.timestamp());
        }
    }

    /// Windows ascend strictly and never overlap.
    #[test]
    fn prop_windows_are_ordered_and_disjoint((start, end) in arb_range()) {
        let weeks = slice_complete_weeks(start, end);
        for pair in weeks.windows(2) {
            prop_assert!(pair[0].end < pair[1].start);
            prop_assert_eq!(pair[1].start - pair[0].end, Duration::milliseconds(1));
        }
    }

    /// No range of at most six days contains a complete week.
    #[test]
    fn prop_short_range_is_empty(start in MIN_MS..MAX_MS) {
        let start = instant(start);
        prop_assert!(slice_complete_weeks(start, start + Duration::days(6)).is_empty());
    }

    /// Any range of at least 14 days contains at least one complete week.
    #[test]
    fn prop_two_week_range_has_a_week(start in MIN_MS..MAX_MS) {
        let start = instant(start);
        prop_assert!(!slice_complete_weeks(start, start + Duration::days(14)).is_empty());
    }

    /// Repeating a passing record on its own day never changes the count.
    #[test]
    fn prop_same_day_duplicates_count_once(
        (start, end) in arb_range(),
        offsets in prop::collection::vec(0..(120 * DAY_MS), 0..30),
    ) {
        let records: Vec<VerificationRecord> = offsets
            .iter()
            .map(|off| VerificationRecord::new(
                "g",
                start + Duration::milliseconds(*off),
                true,
                VerificationKind::Frequency,
                VerificationMethod::Manual,
            ))
            .collect();
        let mut doubled = records.clone();
        doubled.extend(records.iter().cloned());

        let aggregator = FrequencyAggregator::new(3).unwrap();
        let once = aggregator.aggregate(&records, start, end);
        let twice = aggregator.aggregate(&doubled, start, end);
        prop_assert_eq!(&once, &twice);

        for week in &once.weeks {
            prop_assert_eq!(week.count as usize, week.days.len());
            prop_assert!(week.days.windows(2).all(|d| d[0] < d[1]));
            prop_assert!(week.count <= 7);
        }
        prop_assert_eq!(once.total_weeks as usize, once.weeks.len());
        prop_assert_eq!(once.overall_pass, once.total_weeks > 0 && once.passed_weeks == once.total_weeks);
    }
}
