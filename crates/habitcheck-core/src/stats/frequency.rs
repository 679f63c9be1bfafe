//! Weekly frequency compliance.
//!
//! Counts distinct qualifying days per complete week and decides pass/fail
//! per week and for the whole range. The overall verdict is all-or-nothing:
//! one failing week fails the range, and a range with no complete week
//! fails as well.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use super::weeks::{WeekSlicer, WeekWindow};
use crate::calendar::{CivilDate, ReferenceZone};
use crate::error::ValidationError;
use crate::verification::VerificationRecord;

/// Reason used when the range does not contain a single complete week.
pub const NO_COMPLETE_WEEKS: &str = "No complete 7-day blocks in range";

/// Verdict for one complete week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekResult {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Distinct qualifying days, ascending
    pub days: Vec<CivilDate>,
    /// Number of distinct qualifying days
    pub count: u32,
    pub target: u32,
    pub passed: bool,
}

/// Frequency verdict for an analysis range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationReport {
    pub total_weeks: u32,
    pub passed_weeks: u32,
    pub weeks: Vec<WeekResult>,
    /// True iff every week passed (and there was at least one)
    pub overall_pass: bool,
    pub reason: String,
}

/// Aggregates verification records against a distinct-days-per-week target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyAggregator {
    target_per_week: u32,
    slicer: WeekSlicer,
}

impl FrequencyAggregator {
    /// Create an aggregator in the default reference timezone.
    ///
    /// # Errors
    /// Returns `ValidationError::InvalidValue` when `target_per_week` is zero,
    /// since every week would pass trivially.
    pub fn new(target_per_week: u32) -> Result<Self, ValidationError> {
        if target_per_week == 0 {
            return Err(ValidationError::InvalidValue {
                field: "target_per_week".into(),
                message: "must be at least 1".into(),
            });
        }
        Ok(Self {
            target_per_week,
            slicer: WeekSlicer::default(),
        })
    }

    /// Use a different reference timezone for week alignment and day keys.
    pub fn with_zone(mut self, zone: ReferenceZone) -> Self {
        self.slicer = WeekSlicer::new(zone);
        self
    }

    pub fn target_per_week(&self) -> u32 {
        self.target_per_week
    }

    /// Build the report for `[range_start, range_end]`.
    ///
    /// Records outside every complete week are ignored, as are failed
    /// attempts. Several passing records on one day count once.
    pub fn aggregate(
        &self,
        records: &[VerificationRecord],
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> AggregationReport {
        let windows = self.slicer.slice(range_start, range_end);
        if windows.is_empty() {
            tracing::debug!(records = records.len(), "no complete weeks in range");
            return AggregationReport {
                reason: NO_COMPLETE_WEEKS.to_string(),
                ..AggregationReport::default()
            };
        }

        let days_by_week = self.bucket_passing_days(records, &windows);

        let weeks: Vec<WeekResult> = windows
            .iter()
            .map(|window| {
                let days: Vec<CivilDate> = days_by_week
                    .get(&window.monday)
                    .map(|set| set.iter().copied().collect())
                    .unwrap_or_default();
                let count = days.len() as u32;
                let passed = count >= self.target_per_week;
                tracing::trace!(monday = %window.monday, count, passed, "week evaluated");
                WeekResult {
                    start: window.start,
                    end: window.end,
                    days,
                    count,
                    target: self.target_per_week,
                    passed,
                }
            })
            .collect();

        let total_weeks = weeks.len() as u32;
        let passed_weeks = weeks.iter().filter(|w| w.passed).count() as u32;
        let overall_pass = passed_weeks == total_weeks;
        let reason = self.reason(&weeks, passed_weeks);

        tracing::debug!(total_weeks, passed_weeks, overall_pass, "frequency aggregated");

        AggregationReport {
            total_weeks,
            passed_weeks,
            weeks,
            overall_pass,
            reason,
        }
    }

    /// Distinct passing days keyed by the Monday of their window.
    fn bucket_passing_days(
        &self,
        records: &[VerificationRecord],
        windows: &[WeekWindow],
    ) -> HashMap<CivilDate, BTreeSet<CivilDate>> {
        let zone = self.slicer.zone();
        let by_monday: HashMap<CivilDate, &WeekWindow> =
            windows.iter().map(|w| (w.monday, w)).collect();

        let mut buckets: HashMap<CivilDate, BTreeSet<CivilDate>> = HashMap::new();
        for record in records.iter().filter(|r| r.passed) {
            let day = zone.civil_date(record.timestamp);
            let Some(monday) = day.monday_of_week() else {
                continue;
            };
            match by_monday.get(&monday) {
                Some(window) if window.contains(record.timestamp) => {
                    buckets.entry(monday).or_default().insert(day);
                }
                _ => {}
            }
        }
        buckets
    }

    fn reason(&self, weeks: &[WeekResult], passed_weeks: u32) -> String {
        let total = weeks.len();
        let target = self.target_per_week;
        match weeks.iter().find(|w| !w.passed) {
            None => format!("All {total} complete weeks met the target of {target} days per week"),
            Some(miss) => {
                let monday = self.slicer.zone().civil_date(miss.start);
                format!(
                    "{passed_weeks}/{total} complete weeks met the target of {target} days per week; \
                     first miss: week of {monday} ({}/{target})",
                    miss.count
                )
            }
        }
    }
}

/// Aggregate in the default reference timezone.
///
/// # Errors
/// Returns an error when `target_per_week` is zero.
pub fn aggregate_frequency(
    records: &[VerificationRecord],
    target_per_week: u32,
    range_start: DateTime<Utc>,
    range_end: DateTime<Utc>,
) -> Result<AggregationReport, ValidationError> {
    Ok(FrequencyAggregator::new(target_per_week)?.aggregate(records, range_start, range_end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verification::{VerificationKind, VerificationMethod};
    use chrono::{Duration, TimeZone};
    use chrono_tz::Asia::Seoul;

    fn seoul(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Seoul
            .with_ymd_and_hms(y, m, d, h, min, s)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn record(at: DateTime<Utc>, passed: bool) -> VerificationRecord {
        VerificationRecord::new(
            "goal-1",
            at,
            passed,
            VerificationKind::Frequency,
            VerificationMethod::Manual,
        )
    }

    fn two_week_range() -> (DateTime<Utc>, DateTime<Utc>) {
        (seoul(2025, 9, 8, 0, 0, 0), seoul(2025, 9, 21, 23, 59, 59))
    }

    #[test]
    fn zero_target_is_rejected() {
        let err = FrequencyAggregator::new(0).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { ref field, .. } if field == "target_per_week"));
        assert_eq!(FrequencyAggregator::new(1).unwrap().target_per_week(), 1);
    }

    #[test]
    fn same_day_counts_once() {
        let (start, end) = two_week_range();
        let records = vec![
            record(seoul(2025, 9, 9, 7, 0, 0), true),
            record(seoul(2025, 9, 9, 21, 30, 0), true),
        ];
        let report = FrequencyAggregator::new(1).unwrap().aggregate(&records, start, end);
        assert_eq!(report.weeks[0].count, 1);
        assert_eq!(report.weeks[0].days.len(), 1);
    }

    #[test]
    fn failed_attempts_do_not_count() {
        let (start, end) = two_week_range();
        let records = vec![
            record(seoul(2025, 9, 9, 7, 0, 0), false),
            record(seoul(2025, 9, 10, 7, 0, 0), true),
        ];
        let report = FrequencyAggregator::new(2).unwrap().aggregate(&records, start, end);
        assert_eq!(report.weeks[0].count, 1);
        assert!(!report.weeks[0].passed);
    }

    #[test]
    fn records_outside_range_are_ignored() {
        let (start, end) = two_week_range();
        let records = vec![
            record(seoul(2025, 9, 7, 23, 59, 59), true),
            record(seoul(2025, 9, 22, 0, 0, 0), true),
        ];
        let report = FrequencyAggregator::new(1).unwrap().aggregate(&records, start, end);
        assert_eq!(report.total_weeks, 2);
        assert!(report.weeks.iter().all(|w| w.count == 0));
    }

    #[test]
    fn day_key_uses_reference_zone() {
        let (start, end) = two_week_range();
        // 23:30 UTC on the 8th is already the 9th in Seoul.
        let records = vec![
            record(Utc.with_ymd_and_hms(2025, 9, 8, 23, 30, 0).unwrap(), true),
            record(seoul(2025, 9, 9, 12, 0, 0), true),
        ];
        let report = FrequencyAggregator::new(1).unwrap().aggregate(&records, start, end);
        assert_eq!(report.weeks[0].count, 1);
        assert_eq!(report.weeks[0].days[0].to_string(), "2025-09-09");
    }

    #[test]
    fn last_millisecond_of_sunday_belongs_to_that_week() {
        let (start, end) = two_week_range();
        let sunday_end = seoul(2025, 9, 14, 23, 59, 59) + Duration::milliseconds(999);
        let records = vec![record(sunday_end, true), record(sunday_end + Duration::milliseconds(1), true)];
        let report = FrequencyAggregator::new(1).unwrap().aggregate(&records, start, end);
        assert_eq!(report.weeks[0].days[0].to_string(), "2025-09-14");
        assert_eq!(report.weeks[1].days[0].to_string(), "2025-09-15");
    }

    #[test]
    fn days_are_sorted() {
        let (start, end) = two_week_range();
        let records = vec![
            record(seoul(2025, 9, 12, 9, 0, 0), true),
            record(seoul(2025, 9, 8, 9, 0, 0), true),
            record(seoul(2025, 9, 10, 9, 0, 0), true),
        ];
        let report = FrequencyAggregator::new(3).unwrap().aggregate(&records, start, end);
        let days: Vec<String> = report.weeks[0].days.iter().map(ToString::to_string).collect();
        assert_eq!(days, vec!["2025-09-08", "2025-09-10", "2025-09-12"]);
    }

    #[test]
    fn no_complete_weeks_fails() {
        let start = seoul(2025, 9, 9, 0, 0, 0);
        let report = FrequencyAggregator::new(1)
            .unwrap()
            .aggregate(&[record(start, true)], start, start + Duration::days(6));
        assert_eq!(report.total_weeks, 0);
        assert_eq!(report.passed_weeks, 0);
        assert!(!report.overall_pass);
        assert_eq!(report.reason, NO_COMPLETE_WEEKS);
    }

    #[test]
    fn all_weeks_passing_reason() {
        let (start, end) = two_week_range();
        let records = vec![
            record(seoul(2025, 9, 8, 9, 0, 0), true),
            record(seoul(2025, 9, 15, 9, 0, 0), true),
        ];
        let report = FrequencyAggregator::new(1).unwrap().aggregate(&records, start, end);
        assert!(report.overall_pass);
        assert_eq!(report.reason, "All 2 complete weeks met the target of 1 days per week");
    }

    #[test]
    fn inputs_are_not_mutated() {
        let (start, end) = two_week_range();
        let records = vec![record(seoul(2025, 9, 12, 9, 0, 0), true), record(seoul(2025, 9, 8, 9, 0, 0), true)];
        let before = records.clone();
        let _ = aggregate_frequency(&records, 2, start, end).unwrap();
        assert_eq!(records, before);
    }
}
