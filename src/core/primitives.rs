use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::error::{ChartError, ChartResult};

/// Average Gregorian year (365.25 days) in milliseconds.
pub const MILLIS_PER_YEAR: f64 = 365.25 * 24.0 * 60.0 * 60.0 * 1000.0;

#[must_use]
pub fn datetime_to_unix_millis(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64
}

/// Parses an ISO date (`2021-02-14`), naive timestamp (`2021-02-14 08:30:00`)
/// or RFC 3339 string into UTC milliseconds.
pub fn parse_iso_date_millis(input: &str) -> ChartResult<f64> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(|| invalid_date(trimmed))?;
        return Ok(datetime_to_unix_millis(Utc.from_utc_datetime(&midnight)));
    }
    if let Ok(time) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(datetime_to_unix_millis(time.with_timezone(&Utc)));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(datetime_to_unix_millis(Utc.from_utc_datetime(&naive)));
        }
    }
    Err(invalid_date(trimmed))
}

#[must_use]
pub fn unix_millis_to_datetime(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(millis.round() as i64)
}

/// Calendar year of a timestamp, used for time-axis labels.
#[must_use]
pub fn year_of_millis(millis: f64) -> Option<i32> {
    unix_millis_to_datetime(millis).map(|time| time.year())
}

fn invalid_date(input: &str) -> ChartError {
    ChartError::InvalidData(format!("`{input}` is not an ISO date"))
}
