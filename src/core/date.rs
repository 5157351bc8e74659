//! Date parsing for flight dates and search windows.
//!
//! Clients send dates either as a bare calendar day (`2020-09-05`) or as a
//! timestamp. Everything is normalized to UTC with whole-second precision so
//! that stored values compare consistently.

use crate::errors::{Error, Result};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, SubsecRound, Utc};

/// Length of the window searched from a requested departure date.
pub const SEARCH_WINDOW_HOURS: i64 = 24;

const NAIVE_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Parses a flight date.
///
/// Accepted forms, tried in order:
/// * RFC 3339 timestamp with offset (`2020-09-05T10:30:00+05:30`)
/// * naive date-time, taken as UTC (`2020-09-05T10:30:00`)
/// * bare date, taken as midnight UTC (`2020-09-05`)
///
/// # Errors
/// Returns [`Error::InvalidDate`] if the input matches none of these.
pub fn parse_flight_date(input: &str) -> Result<DateTime<Utc>> {
    let value = input.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc).trunc_subsecs(0));
    }

    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(parsed.and_utc().trunc_subsecs(0));
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| Error::InvalidDate {
            value: input.to_string(),
        })
}

/// Returns the half-open `[start, start + 24h)` window searched for a departure date.
#[must_use]
pub fn search_window(start: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    (start, start + Duration::hours(SEARCH_WINDOW_HOURS))
}
