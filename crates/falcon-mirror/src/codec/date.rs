//! Validity instants and the wall-clock values edited in the UI.
//!
//! Entity documents carry UTC instants formatted as `YYYY-MM-DDTHH:MMZ`. The
//! UI edits the same instant as a wall-clock time in the job's timezone,
//! which is either `UTC` or a fixed `GMT±HH:MM` offset.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};

use crate::error::MappingError;

const INSTANT_FORMAT: &str = "%Y-%m-%dT%H:%MZ";

pub fn parse_instant(value: &str) -> Result<DateTime<Utc>, MappingError> {
    NaiveDateTime::parse_from_str(value.trim(), INSTANT_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| MappingError::InvalidDate {
            value: value.to_string(),
        })
}

pub fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.format(INSTANT_FORMAT).to_string()
}

/// Resolves `UTC`, an empty string or `GMT±HH:MM` to a fixed offset.
pub fn parse_timezone(tz: &str) -> Result<FixedOffset, MappingError> {
    let invalid = || MappingError::InvalidTimezone {
        value: tz.to_string(),
    };

    let tz = tz.trim();
    if tz.is_empty() || tz == "UTC" || tz == "GMT" {
        return FixedOffset::east_opt(0).ok_or_else(invalid);
    }

    let offset = tz.strip_prefix("GMT").ok_or_else(invalid)?;
    let (sign, rest) = match offset.chars().next() {
        Some('+') => (1, &offset[1..]),
        Some('-') => (-1, &offset[1..]),
        _ => return Err(invalid()),
    };
    let (hours, minutes) = rest.split_once(':').ok_or_else(invalid)?;
    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if !(0..=14).contains(&hours) || !(0..60).contains(&minutes) {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

/// Wall-clock time in `tz` for a UTC instant.
pub fn to_local(instant: &DateTime<Utc>, tz: &str) -> Result<NaiveDateTime, MappingError> {
    let offset = parse_timezone(tz)?;
    Ok(instant.with_timezone(&offset).naive_local())
}

/// UTC instant for a wall-clock time in `tz`.
pub fn from_local(local: &NaiveDateTime, tz: &str) -> Result<DateTime<Utc>, MappingError> {
    let offset = parse_timezone(tz)?;
    offset
        .from_local_datetime(local)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| MappingError::InvalidDate {
            value: local.to_string(),
        })
}

/// Parses an entity instant straight into wall-clock time.
pub fn import_instant(value: &str, tz: &str) -> Result<NaiveDateTime, MappingError> {
    to_local(&parse_instant(value)?, tz)
}

/// Formats wall-clock time as an entity instant.
pub fn export_instant(local: &NaiveDateTime, tz: &str) -> Result<String, MappingError> {
    Ok(format_instant(&from_local(local, tz)?))
}
