//! Compliance statistics for habit goals
//!
//! This module slices analysis ranges into complete calendar weeks and
//! turns verification records into pass/fail reports, either against a
//! distinct-days-per-week target or against a recurring weekly schedule.

mod frequency;
mod schedule_compliance;
mod weeks;

pub(crate) use weeks::end_of_second;

pub use weeks::{slice_complete_weeks, CompleteWeeks, WeekSlicer, WeekWindow};

pub use frequency::{
    aggregate_frequency, AggregationReport, FrequencyAggregator, WeekResult, NO_COMPLETE_WEEKS,
};

pub use schedule_compliance::{
    OccurrenceResult, ScheduleEvaluator, ScheduleReport, NO_SCHEDULED_OCCURRENCES,
};
