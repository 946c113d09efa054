//! Calendar-day arithmetic.
//!
//! The timeline works at day granularity only. Everything crossing the
//! module boundary is a [`NaiveDate`]; time-of-day is stripped on the way in.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

/// Whole days from `from` to `to` (negative when `to` precedes `from`).
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Shift a date by a signed number of days, saturating at chrono's range.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    Duration::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .unwrap_or(if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_monday() as i64;
    add_days(date, -offset)
}

/// Parse a calendar date.
///
/// Accepts `YYYY-MM-DD`, an RFC 3339 timestamp, or a naive
/// `YYYY-MM-DDTHH:MM:SS` timestamp. Timestamps are truncated to their date.
pub fn parse_calendar_date(value: &str) -> Result<NaiveDate, String> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt.date());
    }
    Err(format!("Invalid calendar date '{}'", value))
}

/// Serde helper for optional dates that may arrive as timestamps.
pub fn deserialize_opt_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_calendar_date(&s)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Serde helper for required dates that may arrive as timestamps.
pub fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_calendar_date(&raw).map_err(serde::de::Error::custom)
}
