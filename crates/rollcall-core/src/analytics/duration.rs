//! Event length from local time-of-day strings.

use chrono::NaiveTime;
use tracing::debug;

use crate::error::{EngineError, Result};

/// Accepted layouts, tried in order. Whitespace before AM/PM is optional.
const TIME_FORMATS: [&str; 2] = ["%I:%M %p", "%H:%M"];

/// Parse `h:mm AM/PM` (case-insensitive), falling back to 24-hour `HH:MM`
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime> {
    let normalized = value.trim().to_ascii_uppercase();
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(&normalized, format).ok())
        .ok_or_else(|| EngineError::InvalidTime(value.to_string()))
}

/// Decimal hours between two times of day.
///
/// Never negative. An end time earlier than the start (an overnight event)
/// is treated as zero duration rather than wrapping into the next day.
pub fn compute_event_duration(start_time: &str, end_time: &str) -> Result<f64> {
    let start = parse_time_of_day(start_time)?;
    let end = parse_time_of_day(end_time)?;

    let minutes = (end - start).num_minutes();
    if minutes < 0 {
        debug!(start_time, end_time, "End time before start time, counting zero hours");
        return Ok(0.0);
    }
    Ok(minutes as f64 / 60.0)
}
