use clap::Args;
use habitcheck_core::{Config, ConfigError, WeekSlicer};

use super::RangeArgs;

#[derive(Args)]
pub struct WeeksArgs {
    #[command(flatten)]
    range: RangeArgs,
}

pub fn run(
    args: WeeksArgs,
    config: Result<Config, ConfigError>,
) -> Result<(), Box<dyn std::error::Error>> {
    let zone = args.range.zone(config)?;
    let weeks = WeekSlicer::new(zone).slice(args.range.from, args.range.to);
    println!("{}", serde_json::to_string_pretty(&weeks)?);
    Ok(())
}
