//! Local-time formatting for a named IANA zone.
//!
//! Pure given (zone, instant). The only failure is an unrecognized zone
//! name, which is surfaced rather than silently falling back to UTC.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClockError {
    /// The zone name is not a recognized IANA identifier.
    InvalidTimeZone(String),
}

impl fmt::Display for ClockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTimeZone(name) => write!(f, "Unknown time zone '{}'", name),
        }
    }
}

impl std::error::Error for ClockError {}

/// Render `instant` as a 12-hour wall-clock string in the given zone,
/// e.g. "3:07:45 PM". The hour carries no leading zero.
pub fn format_local_time(time_zone: &str, instant: DateTime<Utc>) -> Result<String, ClockError> {
    let tz: Tz = time_zone
        .parse()
        .map_err(|_| ClockError::InvalidTimeZone(time_zone.to_string()))?;
    Ok(instant.with_timezone(&tz).format("%-I:%M:%S %p").to_string())
}
