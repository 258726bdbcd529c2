//! Time utilities: session timestamps, elapsed seconds, clock display.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, FixedOffset, NaiveDateTime};

/// `DD-MM-YY-HHMMSS`, every component zero padded.
pub const TIMESTAMP_FORMAT: &str = "%d-%m-%y-%H%M%S";

pub fn format_timestamp(dt: &NaiveDateTime) -> String {
    dt.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(s: &str) -> AppResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .map_err(|_| AppError::InvalidTimestamp(s.to_string()))
}

/// Whole seconds between two instants, rounded towards negative infinity.
///
/// Both instants are compared on the UTC timeline, so a change of the local
/// offset between them does not shift the result.
pub fn elapsed_seconds(start: &DateTime<FixedOffset>, now: &DateTime<FixedOffset>) -> i64 {
    now.signed_duration_since(*start)
        .num_milliseconds()
        .div_euclid(1000)
}

/// Render seconds as `HH:MM:SS` (hours are not wrapped).
pub fn format_clock(seconds: i64) -> String {
    let s = seconds.max(0);
    format!("{:02}:{:02}:{:02}", s / 3600, s / 60 % 60, s % 60)
}
