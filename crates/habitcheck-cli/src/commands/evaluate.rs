use clap::Args;
use habitcheck_core::{Config, ConfigError, Goal, GoalEvaluator, GoalReport, VerificationRecord};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::{read_json, RangeArgs};

#[derive(Args)]
pub struct EvaluateArgs {
    /// JSON object with `goals` and `records` arrays
    #[arg(long)]
    input: PathBuf,
    #[command(flatten)]
    range: RangeArgs,
}

#[derive(Deserialize)]
struct EvaluateInput {
    goals: Vec<Goal>,
    #[serde(default)]
    records: Vec<VerificationRecord>,
}

#[derive(Serialize)]
struct GoalOutcome<'a> {
    goal_id: &'a str,
    title: &'a str,
    report: GoalReport,
}

pub fn run(
    args: EvaluateArgs,
    config: Result<Config, ConfigError>,
) -> Result<(), Box<dyn std::error::Error>> {
    let evaluator = GoalEvaluator::new(args.range.zone(config)?);
    let input: EvaluateInput = read_json(&args.input)?;

    let outcomes = input
        .goals
        .iter()
        .map(|goal| {
            let report = evaluator.evaluate(goal, &input.records, args.range.from, args.range.to)?;
            Ok(GoalOutcome {
                goal_id: &goal.id,
                title: &goal.title,
                report,
            })
        })
        .collect::<Result<Vec<_>, habitcheck_core::ValidationError>>()?;

    println!("{}", serde_json::to_string_pretty(&outcomes)?);
    Ok(())
}
