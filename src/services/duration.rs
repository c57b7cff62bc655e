//! Session duration between two time values

use chrono::FixedOffset;

use super::time_parser::{to_minutes, MINUTES_PER_DAY};
use crate::types::TimeValue;

/// Rendered when either endpoint cannot be parsed
pub const UNPARSEABLE: &str = "-";

/// Human-readable duration between `start` and `end`, or `"-"`.
///
/// An end earlier than the start is taken to be past midnight.
pub fn duration(start: Option<&TimeValue>, end: Option<&TimeValue>, offset: FixedOffset) -> String {
    match (to_minutes(start, offset), to_minutes(end, offset)) {
        (Some(start), Some(end)) => format_minutes(gap_minutes(start, end)),
        _ => UNPARSEABLE.to_string(),
    }
}

/// Non-negative gap from `start` to `end`, both minutes since midnight
pub fn gap_minutes(start: u16, end: u16) -> u32 {
    let start = u32::from(start);
    let mut end = u32::from(end);
    if end < start {
        end += u32::from(MINUTES_PER_DAY);
    }
    end - start
}

/// "H hr M min", "H hr" or "M min"
pub fn format_minutes(total: u32) -> String {
    let hours = total / 60;
    let minutes = total % 60;
    match (hours, minutes) {
        (0, m) => format!("{} min", m),
        (h, 0) => format!("{} hr", h),
        (h, m) => format!("{} hr {} min", h, m),
    }
}
