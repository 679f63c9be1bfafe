use clap::Args;
use habitcheck_core::{Config, ConfigError, ScheduleEvaluator, VerificationRecord, WeeklySchedule};
use std::path::PathBuf;

use super::{read_json, RangeArgs};

#[derive(Args)]
pub struct ScheduleArgs {
    /// JSON array of verification records
    #[arg(long)]
    records: PathBuf,
    /// JSON weekly schedule, e.g. {"days":["Mon","Thu"],"overrides":[]}
    #[arg(long)]
    schedule: PathBuf,
    #[command(flatten)]
    range: RangeArgs,
}

pub fn run(
    args: ScheduleArgs,
    config: Result<Config, ConfigError>,
) -> Result<(), Box<dyn std::error::Error>> {
    let zone = args.range.zone(config)?;
    let records: Vec<VerificationRecord> = read_json(&args.records)?;
    let schedule: WeeklySchedule = read_json(&args.schedule)?;
    let report = ScheduleEvaluator::new(schedule)
        .with_zone(zone)
        .aggregate(&records, args.range.from, args.range.to);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
