//! Fixed-shape timestamp parsing.
//!
//! Hits carry their time field as a `YYYY-MM-DDTHH:MM:SS[.fff]Z` string.
//! The parser splits the string field by field rather than going through
//! a general date-format engine: date and time separated by `T`, date on
//! `-`, the `Z` suffix stripped, the clock on `:`, and seconds on `.`
//! for the optional fractional part. Anything that deviates from that
//! shape is an error; callers are expected to check presence and type
//! before handing a field in, and to skip documents that fail.
//!
//! All inputs are UTC. Timezone display conversion happens at the
//! rendering layer, never here.

use chrono::{TimeZone, Utc};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimestampError {
    #[error("timestamp `{0}` is missing the `T` date/time separator")]
    MissingSeparator(String),
    #[error("timestamp `{0}` has a malformed date part")]
    MalformedDate(String),
    #[error("timestamp `{0}` has a malformed time part")]
    MalformedTime(String),
    #[error("timestamp `{0}` does not name a valid UTC instant")]
    InvalidInstant(String),
}

/// Parse a `YYYY-MM-DDTHH:MM:SS[.fff]Z` string into epoch milliseconds.
///
/// The fractional part is applied only when present; `...T00:00:01Z`
/// yields exactly second precision with zero milliseconds. The digits
/// after `.` are read as a literal millisecond count.
pub fn parse_timestamp(raw: &str) -> Result<i64, TimestampError> {
    let (date, time) = raw
        .split_once('T')
        .ok_or_else(|| TimestampError::MissingSeparator(raw.to_string()))?;

    let (year, month, day) =
        split3(date, '-').ok_or_else(|| TimestampError::MalformedDate(raw.to_string()))?;
    let year: i32 = parse_num(year).ok_or_else(|| TimestampError::MalformedDate(raw.to_string()))?;
    let month: u32 =
        parse_num(month).ok_or_else(|| TimestampError::MalformedDate(raw.to_string()))?;
    let day: u32 = parse_num(day).ok_or_else(|| TimestampError::MalformedDate(raw.to_string()))?;

    // The `Z` suffix carries no information beyond "UTC"; everything
    // after it is ignored, as is its absence.
    let clock = time.split('Z').next().unwrap_or(time);
    let (hour, minute, seconds) =
        split3(clock, ':').ok_or_else(|| TimestampError::MalformedTime(raw.to_string()))?;
    let hour: u32 = parse_num(hour).ok_or_else(|| TimestampError::MalformedTime(raw.to_string()))?;
    let minute: u32 =
        parse_num(minute).ok_or_else(|| TimestampError::MalformedTime(raw.to_string()))?;

    let (whole, frac) = match seconds.split_once('.') {
        Some((whole, frac)) => (whole, Some(frac)),
        None => (seconds, None),
    };
    let second: u32 =
        parse_num(whole).ok_or_else(|| TimestampError::MalformedTime(raw.to_string()))?;
    let millis: i64 = match frac {
        Some(frac) => {
            parse_num::<i64>(frac).ok_or_else(|| TimestampError::MalformedTime(raw.to_string()))?
        }
        None => 0,
    };

    let instant = Utc
        .with_ymd_and_hms(year, month, day, hour, minute, second)
        .single()
        .ok_or_else(|| TimestampError::InvalidInstant(raw.to_string()))?;

    Ok(instant.timestamp_millis() + millis)
}

fn split3(input: &str, sep: char) -> Option<(&str, &str, &str)> {
    let (first, rest) = input.split_once(sep)?;
    let (second, third) = rest.split_once(sep)?;
    Some((first, second, third))
}

fn parse_num<T: std::str::FromStr>(input: &str) -> Option<T> {
    input.parse().ok()
}
