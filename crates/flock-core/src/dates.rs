//! Tolerant parsing of the raw date strings carried by provider records.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::CoreError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a record date, keeping the calendar date the value was written with.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and naive `YYYY-MM-DDTHH:MM:SS`
/// timestamps. Timestamps are never shifted into another zone: the date part
/// as written is the date that counts.
pub fn parse_record_date(raw: &str) -> Result<NaiveDate, CoreError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(CoreError::InvalidDate {
            value: raw.to_string(),
            reason: "empty value".into(),
        });
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT) {
        return Ok(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(stamp.date_naive());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|stamp| stamp.date())
        .map_err(|err| CoreError::InvalidDate {
            value: raw.to_string(),
            reason: err.to_string(),
        })
}

/// Parses an optional field; `Ok(None)` for missing or blank values.
pub fn parse_optional_date(raw: Option<&str>) -> Result<Option<NaiveDate>, CoreError> {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => parse_record_date(value).map(Some),
        None => Ok(None),
    }
}
