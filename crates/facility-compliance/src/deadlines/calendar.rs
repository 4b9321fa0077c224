use super::domain::InvalidDateError;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

pub const MIN_SUPPORTED_YEAR: i32 = 1900;
pub const MAX_SUPPORTED_YEAR: i32 = 2999;

/// Whole calendar days from `now` to `due` (negative once `due` has passed).
pub fn calendar_day_difference(due: NaiveDate, now: NaiveDate) -> i64 {
    due.signed_duration_since(now).num_days()
}

/// Rejects sentinel dates (`0001-01-01`, `9999-12-31`, ...) that backends use
/// in place of a missing value.
pub fn ensure_supported(field: &'static str, date: NaiveDate) -> Result<NaiveDate, InvalidDateError> {
    if (MIN_SUPPORTED_YEAR..=MAX_SUPPORTED_YEAR).contains(&date.year()) {
        Ok(date)
    } else {
        Err(InvalidDateError::OutOfRange { field, date })
    }
}

/// Parses a calendar date, dropping any time-of-day component.
///
/// Accepts `YYYY-MM-DD`, `DD/MM/YYYY`, RFC 3339 timestamps (the date is taken
/// in the timestamp's own offset) and naive `YYYY-MM-DD HH:MM:SS` timestamps.
pub fn parse_calendar_date(field: &'static str, raw: &str) -> Result<NaiveDate, InvalidDateError> {
    let trimmed = raw.trim();
    let parsed = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%d/%m/%Y"))
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|dt| dt.date_naive())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f")
                .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f"))
                .ok()
                .map(|dt| dt.date())
        });

    match parsed {
        Some(date) => ensure_supported(field, date),
        None => Err(InvalidDateError::Unparsable {
            field,
            value: raw.to_string(),
        }),
    }
}

/// Like [`parse_calendar_date`], treating blank input as an absent date.
pub fn parse_optional_date(
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<NaiveDate>, InvalidDateError> {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() => parse_calendar_date(field, value).map(Some),
        _ => Ok(None),
    }
}
