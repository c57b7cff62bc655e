//! Time-of-day extraction from heterogeneous time values
//!
//! Converts a [`TimeValue`] into minutes since local midnight (0–1439).
//! "Local" is an explicit UTC offset so results do not depend on the host.

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Timelike, Utc};
use regex::Regex;

use crate::types::TimeValue;

pub const MINUTES_PER_DAY: u16 = 1440;

/// Epoch values at or above this are milliseconds, below it seconds.
///
/// Millisecond timestamps before 2001-09-09 are misread as seconds.
const MILLIS_THRESHOLD: i64 = 1_000_000_000_000;

/// `H:MM`, `HH:MM`, optional `:SS`, optional AM/PM
static WALL_CLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d{1,2}):(\d{2})(?::\d{2})?\s*(am|pm)?$").expect("valid regex")
});

const NAIVE_ISO_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Minutes since local midnight, or `None` when the value is unparseable.
///
/// Text is tried as a full ISO datetime (when it contains `T`), then as a
/// wall-clock time, then as an all-digit epoch.
pub fn to_minutes(value: Option<&TimeValue>, offset: FixedOffset) -> Option<u16> {
    match value? {
        TimeValue::Text(text) => text_to_minutes(text, offset),
        TimeValue::Epoch(n) => epoch_to_local(*n, offset).map(|dt| minutes_of(&dt)),
        TimeValue::Instant(instant) => Some(minutes_of(&instant.with_timezone(&offset))),
        TimeValue::Opaque => None,
    }
}

/// Resolve a value carrying a full date to a local datetime.
///
/// Wall-clock text like "9:30 PM" has no date and yields `None`.
pub fn resolve_datetime(value: &TimeValue, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    match value {
        TimeValue::Text(text) => {
            let text = text.trim();
            if text.contains('T') {
                parse_iso(text, offset)
            } else if is_all_digits(text) {
                text.parse::<i64>()
                    .ok()
                    .and_then(|n| epoch_to_local(n, offset))
            } else {
                None
            }
        }
        TimeValue::Epoch(n) => epoch_to_local(*n, offset),
        TimeValue::Instant(instant) => Some(instant.with_timezone(&offset)),
        TimeValue::Opaque => None,
    }
}

/// Session date for display: "12 Mar 2024", or the raw text if it has no parseable date
pub fn display_date(value: &TimeValue, offset: FixedOffset) -> String {
    match resolve_datetime(value, offset) {
        Some(dt) => dt.format("%d %b %Y").to_string(),
        None => value.to_string(),
    }
}

/// Start time for display: "04:30 PM", or the raw text for wall-clock values
pub fn display_time(value: &TimeValue, offset: FixedOffset) -> String {
    match resolve_datetime(value, offset) {
        Some(dt) => dt.format("%I:%M %p").to_string(),
        None => value.to_string(),
    }
}

fn text_to_minutes(text: &str, offset: FixedOffset) -> Option<u16> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if text.contains('T') {
        return parse_iso(text, offset).map(|dt| minutes_of(&dt));
    }

    if let Some(minutes) = wall_clock_minutes(text) {
        return Some(minutes);
    }

    if is_all_digits(text) {
        let n = text.parse::<i64>().ok()?;
        return epoch_to_local(n, offset).map(|dt| minutes_of(&dt));
    }

    None
}

/// Parse `H:MM` / `H:MM AM/PM` into minutes since midnight
fn wall_clock_minutes(text: &str) -> Option<u16> {
    let caps = WALL_CLOCK.captures(text)?;
    let mut hour: u16 = caps[1].parse().ok()?;
    let minute: u16 = caps[2].parse().ok()?;

    match caps.get(3).map(|m| m.as_str().to_ascii_lowercase()).as_deref() {
        Some("pm") if hour < 12 => hour += 12,
        Some("am") if hour == 12 => hour = 0,
        _ => {}
    }

    if hour > 23 || minute > 59 {
        return None;
    }
    Some(hour * 60 + minute)
}

fn parse_iso(text: &str, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&offset));
    }
    if let Ok(dt) = DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.with_timezone(&offset));
    }

    // No offset in the string: it is already local wall time
    NAIVE_ISO_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .and_then(|naive| offset.from_local_datetime(&naive).single())
}

fn epoch_to_local(n: i64, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let utc = if n >= MILLIS_THRESHOLD {
        DateTime::<Utc>::from_timestamp_millis(n)
    } else {
        DateTime::<Utc>::from_timestamp(n, 0)
    };
    utc.map(|dt| dt.with_timezone(&offset))
}

fn minutes_of(dt: &DateTime<FixedOffset>) -> u16 {
    (dt.hour() * 60 + dt.minute()) as u16
}

fn is_all_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}
