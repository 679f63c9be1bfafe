//! # Habitcheck Core Library
//!
//! This library provides the schedule-compliance logic for habit goals.
//! Verification records produced upstream (manual confirmation, photo or
//! screenshot evidence) are aggregated into weekly and overall pass/fail
//! verdicts. The `habitcheck` CLI is a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Calendar**: Reference-timezone civil dates and day boundaries. The
//!   executing machine's local zone is never consulted
//! - **Stats**: Complete-week slicing, distinct-day frequency aggregation and
//!   schedule compliance
//! - **Schedule**: Recurring weekly schedules with per-date overrides
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`WeekSlicer`]: Complete Monday..Sunday windows inside a range
//! - [`FrequencyAggregator`]: Distinct days per week against a target
//! - [`ScheduleEvaluator`]: Expected occurrences against verified days
//! - [`GoalEvaluator`]: Dispatch from a [`Goal`]'s rule to its aggregator
//!
//! All aggregation is pure: no I/O, no shared state, and identical inputs
//! always produce identical reports.

pub mod calendar;
pub mod error;
pub mod goal;
pub mod schedule;
pub mod stats;
pub mod storage;
pub mod verification;

pub use calendar::{CivilDate, ReferenceZone, DEFAULT_REFERENCE_TIMEZONE};
pub use error::{ConfigError, CoreError, ValidationError};
pub use goal::{Goal, GoalEvaluator, GoalReport, GoalRule};
pub use schedule::{OverrideAction, ScheduleOverride, WeeklySchedule};
pub use stats::{
    aggregate_frequency, slice_complete_weeks, AggregationReport, FrequencyAggregator,
    OccurrenceResult, ScheduleEvaluator, ScheduleReport, WeekResult, WeekSlicer, WeekWindow,
};
pub use storage::Config;
pub use verification::{VerificationKind, VerificationMethod, VerificationRecord};
