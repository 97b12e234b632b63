//! Common validation utilities.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate};
use validator::ValidationError;

lazy_static::lazy_static! {
    static ref PHONE_REGEX: regex::Regex =
        regex::Regex::new(r"^\+?[0-9(][0-9 ()\-]{5,18}[0-9]$").unwrap();
}

/// A caller-supplied date bound, as accepted by the statistics endpoints.
///
/// Either a full RFC 3339 instant (`2024-01-31T23:59:59Z`) or a bare calendar
/// date (`2024-01-31`), which callers interpret in the report timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBound {
    Instant(DateTime<FixedOffset>),
    Date(NaiveDate),
}

/// Years accepted in date bounds.
pub const DATE_BOUND_YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

/// Parses an ISO-8601 date or date-time. Returns `None` when unparseable or
/// when the year falls outside [`DATE_BOUND_YEARS`].
pub fn parse_date_bound(value: &str) -> Option<DateBound> {
    let value = value.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return DATE_BOUND_YEARS
            .contains(&instant.year())
            .then_some(DateBound::Instant(instant));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .filter(|day| DATE_BOUND_YEARS.contains(&day.year()))
        .map(DateBound::Date)
}

/// Validates that a string is an ISO-8601 date or RFC 3339 date-time.
pub fn validate_date_bound(value: &str) -> Result<(), ValidationError> {
    if parse_date_bound(value).is_some() {
        Ok(())
    } else {
        let mut err = ValidationError::new("date_format");
        err.message = Some("Date must be YYYY-MM-DD or an RFC 3339 date-time".into());
        Err(err)
    }
}

/// Validates a loosely formatted phone number (digits, spaces, dashes, parentheses).
pub fn validate_phone_number(value: &str) -> Result<(), ValidationError> {
    if PHONE_REGEX.is_match(value.trim()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone_format");
        err.message = Some("Phone number must contain 7-20 digits".into());
        Err(err)
    }
}
