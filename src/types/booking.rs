//! Booking record and summary types

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A booking document exactly as stored: an id plus untyped fields.
///
/// Key names and value shapes depend on where the booking came from
/// (payment webhook, manual entry, legacy import), so nothing is assumed here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawBookingRecord {
    pub id: String,
    pub fields: Map<String, Value>,
}

impl RawBookingRecord {
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Build a record from a JSON value. Non-object values yield an empty record.
    pub fn from_value(id: impl Into<String>, value: Value) -> Self {
        match value {
            Value::Object(fields) => Self::new(id, fields),
            _ => Self::new(id, Map::new()),
        }
    }

    /// Look up a field. A dotted key (`paymentDetails.status`) addresses
    /// one nested object level.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match key.split_once('.') {
            Some((outer, inner)) => self.fields.get(outer)?.as_object()?.get(inner),
            None => self.fields.get(key),
        }
    }
}

/// A time-like field value, resolved once at the ingestion boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeValue {
    /// ISO-8601 datetime, wall-clock ("9:30 PM") or numeric text
    Text(String),
    /// Unix timestamp whose unit (seconds or milliseconds) is not yet known
    Epoch(i64),
    /// Server timestamp handle, already converted to an instant
    Instant(DateTime<Utc>),
    /// Present, but not a shape any time parser understands
    Opaque,
}

impl TimeValue {
    /// Classify a raw JSON value. `None` for null and blank strings.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(Self::Text(trimmed.to_string()))
                }
            }
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
                .map(Self::Epoch),
            Value::Object(map) => Some(timestamp_handle(map).map_or(Self::Opaque, Self::Instant)),
            Value::Bool(_) | Value::Array(_) => Some(Self::Opaque),
        }
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Epoch(n) => write!(f, "{}", n),
            Self::Instant(instant) => {
                f.write_str(&instant.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            Self::Opaque => Ok(()),
        }
    }
}

/// Recognize serialized server timestamps:
/// `{"_seconds", "_nanoseconds"}`, `{"seconds", "nanoseconds"}` or `{"__time__": iso}`.
fn timestamp_handle(map: &Map<String, Value>) -> Option<DateTime<Utc>> {
    if let Some(iso) = map.get("__time__").and_then(Value::as_str) {
        return DateTime::parse_from_rfc3339(iso)
            .ok()
            .map(|dt| dt.with_timezone(&Utc));
    }

    let seconds = map
        .get("_seconds")
        .or_else(|| map.get("seconds"))
        .and_then(Value::as_i64)?;
    let nanos = map
        .get("_nanoseconds")
        .or_else(|| map.get("nanoseconds"))
        .and_then(Value::as_u64)
        .unwrap_or(0)
        .min(999_999_999) as u32;

    DateTime::<Utc>::from_timestamp(seconds, nanos)
}

/// Mentor review state of a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    Accepted,
    Rejected,
    Pending,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
            Self::Pending => "Pending",
        })
    }
}

/// Payment state of a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Paid,
    Refund,
    Pending,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Paid => "Paid",
            Self::Refund => "Refund",
            Self::Pending => "Pending",
        })
    }
}

/// Display-ready view of one booking. Built fresh per record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingSummary {
    pub id: String,
    pub student_name: String,
    pub mentor_name: String,
    /// Session date and start time, e.g. "12 Mar 2024 04:30 PM"
    pub time_slot: String,
    /// "1 hr 30 min", "1 hr", "45 min" or "-"
    pub duration: String,
    /// en-IN currency string, e.g. "₹1,500.00"
    pub amount: String,
    pub booking_status: BookingStatus,
    pub payment_status: PaymentStatus,
}

/// Which profile collection a lookup targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileKind {
    Mentor,
    Student,
}

impl ProfileKind {
    /// Collection name in the document store
    pub fn collection(&self) -> &'static str {
        match self {
            Self::Mentor => "mentors",
            Self::Student => "users",
        }
    }
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Mentor => "mentor",
            Self::Student => "student",
        })
    }
}

/// Keys tried, in order, for a profile's display name
const PROFILE_NAME_KEYS: &[&str] = &[
    "name",
    "displayName",
    "fullName",
    "full_name",
    "username",
    "email",
];

/// A mentor or student profile document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    pub id: String,
    pub fields: Map<String, Value>,
}

impl Profile {
    /// First non-blank name-like field
    pub fn display_name(&self) -> Option<String> {
        PROFILE_NAME_KEYS.iter().find_map(|key| {
            self.fields
                .get(*key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        })
    }
}
