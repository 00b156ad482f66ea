//! Timestamp representation shared by model, storage and CLI.
//!
//! # Invariants
//! - Timestamps are naive local wall-clock values (no zone offset).
//! - `format_timestamp` output is always accepted by `parse_timestamp`.

use crate::model::validation::ValidationError;
use chrono::{Local, NaiveDate, NaiveDateTime};

/// Naive date-time used for due dates, project windows and registration.
pub type Timestamp = NaiveDateTime;

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Returns current local wall-clock time.
pub fn now() -> Timestamp {
    Local::now().naive_local()
}

/// Renders an ISO-8601 value: `YYYY-MM-DDTHH:MM:SS`, plus a fraction only
/// when sub-second precision is present.
pub fn format_timestamp(value: &Timestamp) -> String {
    value.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}

/// Parses ISO-8601 date or date-time text.
///
/// Date-only input resolves to midnight. `field` names the offending field in
/// the returned error.
pub fn parse_timestamp(field: &'static str, text: &str) -> Result<Timestamp, ValidationError> {
    let trimmed = text.trim();
    for format in DATE_TIME_FORMATS {
        if let Ok(value) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(value);
        }
    }

    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| ValidationError::InvalidTimestamp {
            field,
            value: trimmed.to_string(),
        })
}
