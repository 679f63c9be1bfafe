//! Reference-timezone calendar arithmetic.
//!
//! All day keys and week boundaries are derived in a single fixed IANA zone
//! (default `Asia/Seoul`), never the executing machine's local zone.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ConfigError, ValidationError};

/// Zone used when nothing else is configured.
pub const DEFAULT_REFERENCE_TIMEZONE: &str = "Asia/Seoul";

/// A calendar day in the reference timezone.
///
/// Ordering and equality are structural on (year, month, day). Serialized as
/// `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct CivilDate(NaiveDate);

impl CivilDate {
    /// Returns `None` for dates that do not exist (e.g. February 30th).
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Monday of the ISO week containing this date.
    pub fn monday_of_week(&self) -> Option<Self> {
        let offset = u64::from(self.0.weekday().num_days_from_monday());
        self.0.checked_sub_days(Days::new(offset)).map(Self)
    }

    /// Date `days` later, or `None` past the end of the representable calendar.
    pub fn add_days(&self, days: u64) -> Option<Self> {
        self.0.checked_add_days(Days::new(days)).map(Self)
    }

    pub(crate) fn naive(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for CivilDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}

impl FromStr for CivilDate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|e| ValidationError::InvalidValue {
                field: "date".into(),
                message: format!("'{s}' is not a YYYY-MM-DD date: {e}"),
            })
    }
}

impl From<CivilDate> for String {
    fn from(date: CivilDate) -> Self {
        date.to_string()
    }
}

impl TryFrom<String> for CivilDate {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// The fixed timezone used for week alignment and day keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceZone(Tz);

impl Default for ReferenceZone {
    fn default() -> Self {
        Self(chrono_tz::Asia::Seoul)
    }
}

impl From<Tz> for ReferenceZone {
    fn from(tz: Tz) -> Self {
        Self(tz)
    }
}

impl FromStr for ReferenceZone {
    type Err = ConfigError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        name.parse::<Tz>()
            .map(Self)
            .map_err(|e| ConfigError::InvalidValue {
                key: "reference_timezone".into(),
                message: format!("'{name}' is not an IANA timezone: {e}"),
            })
    }
}

impl fmt::Display for ReferenceZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.name())
    }
}

impl ReferenceZone {
    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// Civil date of `instant` in this zone.
    pub fn civil_date(&self, instant: DateTime<Utc>) -> CivilDate {
        CivilDate(instant.with_timezone(&self.0).date_naive())
    }

    /// First existing local instant of `date`.
    ///
    /// Usually local midnight. When midnight falls into a DST gap the first
    /// whole hour that exists is used; in a fold the earlier instant wins.
    pub fn start_of_day(&self, date: CivilDate) -> DateTime<Utc> {
        let day = date.naive();
        (0..24)
            .filter_map(|hour| day.and_hms_opt(hour, 0, 0))
            .find_map(|local| self.0.from_local_datetime(&local).earliest())
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or_else(|| day.and_time(NaiveTime::MIN).and_utc())
    }

    /// Whether `instant` is exactly the start of its local day.
    pub fn is_start_of_day(&self, instant: DateTime<Utc>) -> bool {
        self.start_of_day(self.civil_date(instant)) == instant
    }
}

/// Convert epoch milliseconds into an instant, rejecting values chrono
/// cannot represent.
pub fn instant_from_millis(ms: i64) -> Result<DateTime<Utc>, ValidationError> {
    DateTime::from_timestamp_millis(ms)
        .ok_or_else(|| ValidationError::InvalidTimestamp(format!("{ms} ms is out of range")))
}

/// Parse an RFC 3339 timestamp or a decimal epoch-milliseconds value.
pub fn parse_instant(raw: &str) -> Result<DateTime<Utc>, ValidationError> {
    let raw = raw.trim();
    if let Ok(ms) = raw.parse::<i64>() {
        return instant_from_millis(ms);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| ValidationError::InvalidTimestamp(format!("'{raw}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> CivilDate {
        CivilDate::new(y, m, d).unwrap()
    }

    #[test]
    fn default_zone_is_seoul() {
        assert_eq!(ReferenceZone::default().name(), DEFAULT_REFERENCE_TIMEZONE);
    }

    #[test]
    fn civil_date_uses_reference_zone_not_utc() {
        let zone = ReferenceZone::default();
        // 2025-09-07T15:00:00Z is Monday 00:00 in Seoul.
        let instant = Utc.with_ymd_and_hms(2025, 9, 7, 15, 0, 0).unwrap();
        assert_eq!(zone.civil_date(instant), date(2025, 9, 8));
        assert_eq!(zone.civil_date(instant - chrono::Duration::milliseconds(1)), date(2025, 9, 7));
    }

    #[test]
    fn start_of_day_is_local_midnight() {
        let zone = ReferenceZone::default();
        let start = zone.start_of_day(date(2025, 9, 8));
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 9, 7, 15, 0, 0).unwrap());
        assert!(zone.is_start_of_day(start));
        assert!(!zone.is_start_of_day(start + chrono::Duration::seconds(1)));
    }

    #[test]
    fn start_of_day_skips_midnight_dst_gap() {
        // Santiago springs forward at local midnight: 2024-09-08 00:00 does not exist.
        let zone: ReferenceZone = "America/Santiago".parse().unwrap();
        let start = zone.start_of_day(date(2024, 9, 8));
        assert_eq!(zone.civil_date(start), date(2024, 9, 8));
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 9, 8, 4, 0, 0).unwrap());
    }

    #[test]
    fn monday_of_week() {
        assert_eq!(date(2025, 9, 14).monday_of_week(), Some(date(2025, 9, 8)));
        assert_eq!(date(2025, 9, 8).monday_of_week(), Some(date(2025, 9, 8)));
        assert_eq!(date(2025, 9, 10).weekday(), Weekday::Wed);
    }

    #[test]
    fn civil_date_string_form() {
        let d = date(2025, 9, 8);
        assert_eq!(d.to_string(), "2025-09-08");
        assert_eq!("2025-09-08".parse::<CivilDate>().unwrap(), d);
        assert!("2025-02-30".parse::<CivilDate>().is_err());
        assert_eq!(serde_json::to_string(&d).unwrap(), "\"2025-09-08\"");
        let back: CivilDate = serde_json::from_str("\"2025-09-08\"").unwrap();
        assert_eq!(back, d);
    }

    #[test]
    fn civil_date_orders_chronologically() {
        assert!(date(2024, 12, 31) < date(2025, 1, 1));
        assert!(date(2025, 1, 9) < date(2025, 1, 10));
    }

    #[test]
    fn unknown_zone_is_rejected() {
        let err = "Mars/Olympus_Mons".parse::<ReferenceZone>().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn parse_instant_accepts_rfc3339_and_millis() {
        let a = parse_instant("2025-09-08T00:00:00+09:00").unwrap();
        let b = parse_instant("1757257200000").unwrap();
        assert_eq!(a, b);
        assert!(parse_instant("not a time").is_err());
        assert!(instant_from_millis(i64::MAX).is_err());
    }
}
