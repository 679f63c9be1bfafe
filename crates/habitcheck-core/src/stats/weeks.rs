//! Complete calendar-week slicing.
//!
//! A week window runs from Monday 00:00:00.000 to Sunday 23:59:59.999 in the
//! reference timezone. Only windows fully inside the analysis range are
//! produced; partial weeks at either end are dropped.

use chrono::{DateTime, TimeDelta, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::calendar::{CivilDate, ReferenceZone};

/// One complete Monday..Sunday window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekWindow {
    /// Monday this window starts on
    pub monday: CivilDate,
    /// Monday 00:00:00.000 local
    pub start: DateTime<Utc>,
    /// Sunday 23:59:59.999 local
    pub end: DateTime<Utc>,
}

impl WeekWindow {
    /// Inclusive at both ends.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

/// Produces complete week windows in a reference timezone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeekSlicer {
    zone: ReferenceZone,
}

impl WeekSlicer {
    pub fn new(zone: ReferenceZone) -> Self {
        Self { zone }
    }

    pub fn zone(&self) -> ReferenceZone {
        self.zone
    }

    /// Iterate the complete weeks inside `[range_start, range_end]`.
    ///
    /// `range_end` covers its whole second, so a range ending at
    /// `Sunday 23:59:59` contains a window ending at `23:59:59.999`.
    /// An inverted range yields nothing.
    pub fn weeks(&self, range_start: DateTime<Utc>, range_end: DateTime<Utc>) -> CompleteWeeks {
        let range_end = end_of_second(range_end);
        let next_monday = if range_end < range_start {
            tracing::warn!(
                %range_start,
                %range_end,
                "inverted analysis range, no weeks produced"
            );
            None
        } else {
            first_monday(self.zone, range_start)
        };

        CompleteWeeks {
            zone: self.zone,
            range_start,
            range_end,
            next_monday,
        }
    }

    /// Collect [`WeekSlicer::weeks`] into a vector.
    pub fn slice(&self, range_start: DateTime<Utc>, range_end: DateTime<Utc>) -> Vec<WeekWindow> {
        self.weeks(range_start, range_end).collect()
    }
}

/// Complete weeks in the default reference timezone.
pub fn slice_complete_weeks(range_start: DateTime<Utc>, range_end: DateTime<Utc>) -> Vec<WeekWindow> {
    WeekSlicer::default().slice(range_start, range_end)
}

/// Iterator over complete weeks. Cloning it restarts from the same point.
#[derive(Debug, Clone)]
pub struct CompleteWeeks {
    zone: ReferenceZone,
    range_start: DateTime<Utc>,
    range_end: DateTime<Utc>,
    next_monday: Option<CivilDate>,
}

impl Iterator for CompleteWeeks {
    type Item = WeekWindow;

    fn next(&mut self) -> Option<WeekWindow> {
        loop {
            let monday = self.next_monday.take()?;
            let start = self.zone.start_of_day(monday);
            if start > self.range_end {
                return None;
            }

            let following = monday.add_days(7)?;
            let end = self
                .zone
                .start_of_day(following)
                .checked_sub_signed(TimeDelta::milliseconds(1))?;
            self.next_monday = Some(following);

            if start >= self.range_start && end <= self.range_end {
                return Some(WeekWindow { monday, start, end });
            }
        }
    }
}

/// Monday at local midnight on or after `instant`.
fn first_monday(zone: ReferenceZone, instant: DateTime<Utc>) -> Option<CivilDate> {
    let today = zone.civil_date(instant);
    if today.weekday() == Weekday::Mon && zone.start_of_day(today) >= instant {
        return Some(today);
    }
    let days_ahead = 7 - u64::from(today.weekday().num_days_from_monday());
    today.add_days(days_ahead)
}

pub(crate) fn end_of_second(instant: DateTime<Utc>) -> DateTime<Utc> {
    let ms = instant.timestamp_millis();
    let widened = ms.div_euclid(1000) * 1000 + 999;
    DateTime::from_timestamp_millis(widened).unwrap_or(instant)
}
