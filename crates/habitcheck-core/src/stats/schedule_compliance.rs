//! Schedule compliance: was every expected occurrence verified?

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::calendar::{CivilDate, ReferenceZone};
use crate::schedule::WeeklySchedule;
use crate::verification::VerificationRecord;

/// Reason used when the schedule has nothing due inside the range.
pub const NO_SCHEDULED_OCCURRENCES: &str = "No scheduled occurrences in range";

/// One expected occurrence and whether a passing record covered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccurrenceResult {
    pub date: CivilDate,
    pub met: bool,
}

/// Schedule verdict for an analysis range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleReport {
    pub total_occurrences: u32,
    pub met_occurrences: u32,
    pub occurrences: Vec<OccurrenceResult>,
    /// True iff every occurrence was met (and there was at least one)
    pub overall_pass: bool,
    pub reason: String,
}

/// Checks verification records against a [`WeeklySchedule`].
#[derive(Debug, Clone, Default)]
pub struct ScheduleEvaluator {
    schedule: WeeklySchedule,
    zone: ReferenceZone,
}

impl ScheduleEvaluator {
    pub fn new(schedule: WeeklySchedule) -> Self {
        Self {
            schedule,
            zone: ReferenceZone::default(),
        }
    }

    pub fn with_zone(mut self, zone: ReferenceZone) -> Self {
        self.zone = zone;
        self
    }

    pub fn aggregate(
        &self,
        records: &[VerificationRecord],
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> ScheduleReport {
        let expected = self
            .schedule
            .expected_occurrences(self.zone, range_start, range_end);
        if expected.is_empty() {
            tracing::debug!(records = records.len(), "no scheduled occurrences in range");
            return ScheduleReport {
                reason: NO_SCHEDULED_OCCURRENCES.to_string(),
                ..ScheduleReport::default()
            };
        }

        let verified: HashSet<CivilDate> = records
            .iter()
            .filter(|r| r.passed)
            .map(|r| self.zone.civil_date(r.timestamp))
            .collect();

        let occurrences: Vec<OccurrenceResult> = expected
            .into_iter()
            .map(|date| OccurrenceResult {
                date,
                met: verified.contains(&date),
            })
            .collect();

        let total_occurrences = occurrences.len() as u32;
        let met_occurrences = occurrences.iter().filter(|o| o.met).count() as u32;
        let overall_pass = met_occurrences == total_occurrences;

        let reason = match occurrences.iter().find(|o| !o.met) {
            None => format!("All {total_occurrences} scheduled days were verified"),
            Some(miss) => format!(
                "{met_occurrences}/{total_occurrences} scheduled days were verified; first miss: {}",
                miss.date
            ),
        };

        tracing::debug!(total_occurrences, met_occurrences, overall_pass, "schedule aggregated");

        ScheduleReport {
            total_occurrences,
            met_occurrences,
            occurrences,
            overall_pass,
            reason,
        }
    }
}
