//! Goals and rule dispatch.
//!
//! A goal carries exactly one compliance rule. The evaluator is the only
//! place a record's `goal_id` is interpreted: it selects the goal's records
//! and hands them to the matching aggregator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::ReferenceZone;
use crate::error::ValidationError;
use crate::schedule::WeeklySchedule;
use crate::stats::{AggregationReport, FrequencyAggregator, ScheduleEvaluator, ScheduleReport};
use crate::verification::VerificationRecord;

/// Compliance rule for a goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GoalRule {
    /// At least `target_per_week` distinct days per complete week
    Frequency { target_per_week: u32 },
    /// Every scheduled day verified
    Schedule { schedule: WeeklySchedule },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub rule: GoalRule,
}

/// Report for a single goal, shaped by its rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GoalReport {
    Frequency(AggregationReport),
    Schedule(ScheduleReport),
}

impl GoalReport {
    pub fn overall_pass(&self) -> bool {
        match self {
            GoalReport::Frequency(r) => r.overall_pass,
            GoalReport::Schedule(r) => r.overall_pass,
        }
    }

    pub fn reason(&self) -> &str {
        match self {
            GoalReport::Frequency(r) => &r.reason,
            GoalReport::Schedule(r) => &r.reason,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GoalEvaluator {
    zone: ReferenceZone,
}

impl GoalEvaluator {
    pub fn new(zone: ReferenceZone) -> Self {
        Self { zone }
    }

    /// Evaluate `goal` over `[range_start, range_end]`.
    ///
    /// # Errors
    /// Returns a `ValidationError` if the goal's rule is invalid, e.g. a
    /// frequency target of zero.
    pub fn evaluate(
        &self,
        goal: &Goal,
        records: &[VerificationRecord],
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> Result<GoalReport, ValidationError> {
        let own: Vec<VerificationRecord> = records
            .iter()
            .filter(|r| r.goal_id == goal.id)
            .cloned()
            .collect();
        tracing::debug!(goal = %goal.id, records = own.len(), "evaluating goal");

        let report = match &goal.rule {
            GoalRule::Frequency { target_per_week } => GoalReport::Frequency(
                FrequencyAggregator::new(*target_per_week)?
                    .with_zone(self.zone)
                    .aggregate(&own, range_start, range_end),
            ),
            GoalRule::Schedule { schedule } => GoalReport::Schedule(
                ScheduleEvaluator::new(schedule.clone())
                    .with_zone(self.zone)
                    .aggregate(&own, range_start, range_end),
            ),
        };
        Ok(report)
    }
}
