//! Match duration tokens as typed by the operator (`45m`, `1h30`, `2h`) and
//! the elapsed-time strings used to pre-fill them.

use chrono::{DateTime, TimeZone};

use crate::{error::DurationParseError, protocol::DurationPayload};

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 3600;

fn parse_component(digits: &str, unit: u64, token: &str) -> Result<u64, DurationParseError> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DurationParseError::Invalid(token.to_string()));
    }
    digits
        .parse::<u64>()
        .ok()
        .and_then(|value| value.checked_mul(unit))
        .ok_or_else(|| DurationParseError::Overflow(token.to_string()))
}

/// Parses `\d+m?`, `\d+h` or `\d+h\d+m?` into total seconds.
pub fn parse_duration_string(duration: &str) -> Result<u64, DurationParseError> {
    match duration.split_once('h') {
        None => {
            let minutes = duration.strip_suffix('m').unwrap_or(duration);
            parse_component(minutes, SECONDS_PER_MINUTE, duration)
        }
        Some((hours, rest)) => {
            let hours = parse_component(hours, SECONDS_PER_HOUR, duration)?;
            if rest.is_empty() {
                return Ok(hours);
            }
            let minutes = rest.strip_suffix('m').unwrap_or(rest);
            let minutes = parse_component(minutes, SECONDS_PER_MINUTE, duration)?;
            hours
                .checked_add(minutes)
                .ok_or_else(|| DurationParseError::Overflow(duration.to_string()))
        }
    }
}

pub fn is_valid_duration_string(duration: Option<&str>) -> bool {
    duration.is_some_and(|d| parse_duration_string(d).is_ok())
}

pub fn serialize_duration_seconds(seconds: u64) -> DurationPayload {
    DurationPayload {
        secs: seconds,
        nanos: 0,
    }
}

/// Whole minutes between `start` and `end`, formatted as a duration token.
pub fn elapsed_string<Tz: TimeZone>(start: &DateTime<Tz>, end: &DateTime<Tz>) -> String {
    let milliseconds = end.clone().signed_duration_since(start).num_milliseconds();
    format_minutes(milliseconds.div_euclid(60_000))
}

pub fn elapsed_seconds_string(seconds: i64) -> String {
    format_minutes(seconds.div_euclid(60))
}

// Exactly 60 minutes stays "60m"; only longer spans switch to hours.
fn format_minutes(minutes: i64) -> String {
    if minutes > 60 {
        let hours = minutes / 60;
        let minutes_rest = minutes % 60;
        return format!("{hours}h{minutes_rest}m");
    }
    format!("{minutes}m")
}

#[cfg(test)]
#[path = "tests/duration_tests.rs"]
mod tests;
