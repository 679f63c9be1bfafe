pub mod config;
pub mod evaluate;
pub mod frequency;
pub mod schedule;
pub mod weeks;

use chrono::{DateTime, Utc};
use clap::Args;
use habitcheck_core::calendar::parse_instant;
use habitcheck_core::{Config, ConfigError, ReferenceZone};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Analysis range shared by every evaluating subcommand.
#[derive(Args, Debug, Clone)]
pub struct RangeArgs {
    /// Range start (RFC 3339 or epoch milliseconds)
    #[arg(long, value_parser = parse_instant)]
    pub from: DateTime<Utc>,
    /// Range end, inclusive (RFC 3339 or epoch milliseconds)
    #[arg(long, value_parser = parse_instant)]
    pub to: DateTime<Utc>,
    /// Reference timezone; defaults to calendar.reference_timezone
    #[arg(long, value_parser = parse_zone)]
    pub tz: Option<ReferenceZone>,
}

impl RangeArgs {
    /// `--tz` when given, otherwise the configured zone. A config that failed
    /// to load is an error unless `--tz` overrides it.
    pub fn zone(&self, config: Result<Config, ConfigError>) -> Result<ReferenceZone, ConfigError> {
        match self.tz {
            Some(zone) => Ok(zone),
            None => config?.zone(),
        }
    }
}

fn parse_zone(raw: &str) -> Result<ReferenceZone, ConfigError> {
    raw.parse()
}

/// Read and decode a JSON input file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> habitcheck_core::error::Result<T> {
    let content = std::fs::read_to_string(path)?;
    let value = serde_json::from_str(&content)?;
    Ok(value)
}
