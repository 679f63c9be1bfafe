use clap::Args;
use habitcheck_core::{Config, ConfigError, FrequencyAggregator, VerificationRecord};
use std::path::PathBuf;

use super::{read_json, RangeArgs};

#[derive(Args)]
pub struct FrequencyArgs {
    /// JSON array of verification records
    #[arg(long)]
    records: PathBuf,
    /// Distinct verified days required per week
    #[arg(long)]
    target: u32,
    #[command(flatten)]
    range: RangeArgs,
}

pub fn run(
    args: FrequencyArgs,
    config: Result<Config, ConfigError>,
) -> Result<(), Box<dyn std::error::Error>> {
    let zone = args.range.zone(config)?;
    let records: Vec<VerificationRecord> = read_json(&args.records)?;
    let report = FrequencyAggregator::new(args.target)?
        .with_zone(zone)
        .aggregate(&records, args.range.from, args.range.to);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
