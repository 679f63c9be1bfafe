//! Recurring weekly schedules with per-date overrides.
//!
//! A schedule names the weekdays a goal is due on. Overrides adjust single
//! calendar dates: `Skip` cancels a normally scheduled day and `Extra` adds
//! one that is not. Expanding a schedule over a range yields the expected
//! occurrences that schedule compliance is measured against.

use chrono::{DateTime, TimeDelta, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::calendar::{CivilDate, ReferenceZone};
use crate::stats::end_of_second;

/// What an override does to its date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverrideAction {
    /// Not due on this date even if the weekday is scheduled
    Skip,
    /// Due on this date even if the weekday is not scheduled
    Extra,
}

/// A single-date adjustment to a weekly schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleOverride {
    pub date: CivilDate,
    pub action: OverrideAction,
}

/// Weekdays a goal is due on, plus calendar overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    /// Scheduled weekdays, e.g. `["Mon", "Wed", "Fri"]`
    pub days: Vec<Weekday>,
    /// Applied in order; the last override for a date wins
    #[serde(default)]
    pub overrides: Vec<ScheduleOverride>,
}

impl WeeklySchedule {
    pub fn new(days: impl IntoIterator<Item = Weekday>) -> Self {
        Self {
            days: days.into_iter().collect(),
            overrides: Vec::new(),
        }
    }

    pub fn with_override(mut self, date: CivilDate, action: OverrideAction) -> Self {
        self.overrides.push(ScheduleOverride { date, action });
        self
    }

    /// Whether `date` is due once overrides are applied.
    pub fn is_due(&self, date: CivilDate) -> bool {
        match self.overrides.iter().rev().find(|o| o.date == date) {
            Some(o) => o.action == OverrideAction::Extra,
            None => self.days.contains(&date.weekday()),
        }
    }

    /// Due dates whose whole local day lies inside `[range_start, range_end]`.
    ///
    /// Sorted ascending, no duplicates. `range_end` covers its whole second.
    pub fn expected_occurrences(
        &self,
        zone: ReferenceZone,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> Vec<CivilDate> {
        let range_end = end_of_second(range_end);
        if range_end < range_start {
            return Vec::new();
        }

        let last = zone.civil_date(range_end);
        let mut occurrences = Vec::new();
        let mut current = Some(zone.civil_date(range_start));

        while let Some(date) = current.filter(|d| *d <= last) {
            let next = date.add_days(1);
            let day_start = zone.start_of_day(date);
            let day_end = next
                .map(|n| zone.start_of_day(n))
                .and_then(|t| t.checked_sub_signed(TimeDelta::milliseconds(1)));

            let whole_day_inside = matches!(day_end, Some(end) if day_start >= range_start && end <= range_end);
            if whole_day_inside && self.is_due(date) {
                occurrences.push(date);
            }
            current = next;
        }
        occurrences
    }
}
