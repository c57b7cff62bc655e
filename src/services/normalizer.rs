//! Field normalization for raw booking records
//!
//! Booking documents arrive from several origins with different key names.
//! Each accessor here takes an ordered list of candidate keys and returns the
//! first usable value, never failing. Absence is `None` and downstream stages
//! treat it as "unparseable".

use serde_json::Value;

use crate::types::{RawBookingRecord, TimeValue};

pub const MENTOR_ID_KEYS: &[&str] = &["mentorId", "mentor_id", "mentor"];
pub const USER_ID_KEYS: &[&str] = &["userId", "user_id", "studentId", "student_id", "uid"];
pub const STUDENT_NAME_KEYS: &[&str] = &["studentName", "userName", "user_name"];
pub const MENTOR_NAME_KEYS: &[&str] = &["mentorName", "mentor_name"];

pub const AMOUNT_KEYS: &[&str] = &["amount", "amount_paid", "paymentDetails.amount"];
pub const CURRENCY_KEYS: &[&str] = &["currency", "paymentDetails.currency"];

pub const PAYMENT_STATUS_KEYS: &[&str] = &[
    "status",
    "payment_status",
    "paymentStatus",
    "paymentDetails.status",
    "payment_details.status",
];
pub const REFUND_FLAG_KEYS: &[&str] = &["refund_status", "refundStatus"];
pub const MENTOR_STATUS_KEYS: &[&str] = &["mentorStatus", "mentor_status"];

pub const START_TIME_KEYS: &[&str] = &[
    "startTime",
    "start_time",
    "sessionStartTime",
    "slotStart",
    "start",
];
pub const END_TIME_KEYS: &[&str] = &["endTime", "end_time", "sessionEndTime", "slotEnd", "end"];
/// Session date, falling back to the record's creation timestamp
pub const SESSION_DATE_KEYS: &[&str] = &[
    "sessionDate",
    "date",
    "session_date",
    "bookingDate",
    "slotDate",
    "createdAt",
    "created_at",
];

/// First candidate key holding a non-null value
pub fn first_present<'a>(record: &'a RawBookingRecord, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| record.get(key))
        .find(|value| !value.is_null())
}

/// First candidate that resolves to a time-like value.
///
/// Blank strings are skipped so a later key can still supply the value.
pub fn time_field(record: &RawBookingRecord, keys: &[&str]) -> Option<TimeValue> {
    keys.iter()
        .filter_map(|key| record.get(key))
        .find_map(TimeValue::from_json)
}

/// First candidate with scalar text content (strings trimmed, numbers stringified)
pub fn text_field(record: &RawBookingRecord, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| record.get(key))
        .find_map(scalar_text)
}

/// First candidate holding a number or numeric string
pub fn number_field(record: &RawBookingRecord, keys: &[&str]) -> Option<f64> {
    keys.iter()
        .filter_map(|key| record.get(key))
        .find_map(|value| match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
            _ => None,
        })
}

/// Whether any candidate holds a truthy flag (`true`, non-blank text, nonzero number)
pub fn flag_set(record: &RawBookingRecord, keys: &[&str]) -> bool {
    keys.iter()
        .filter_map(|key| record.get(key))
        .any(is_truthy)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> RawBookingRecord {
        RawBookingRecord::from_value("b1", value)
    }

    // ========== first_present ==========

    #[test]
    fn test_first_present_skips_null() {
        let r = record(json!({"startTime": null, "start_time": "10:00"}));
        assert_eq!(first_present(&r, START_TIME_KEYS), Some(&json!("10:00")));
    }

    #[test]
    fn test_first_present_respects_key_order() {
        let r = record(json!({"start": "09:00", "startTime": "10:00"}));
        assert_eq!(first_present(&r, START_TIME_KEYS), Some(&json!("10:00")));
    }

    #[test]
    fn test_first_present_none_when_all_missing() {
        let r = record(json!({"unrelated": 1}));
        assert_eq!(first_present(&r, START_TIME_KEYS), None);
    }

    // ========== time_field ==========

    #[test]
    fn test_time_field_skips_blank_strings() {
        let r = record(json!({"startTime": "  ", "slotStart": "4:30 PM"}));
        assert_eq!(
            time_field(&r, START_TIME_KEYS),
            Some(TimeValue::Text("4:30 PM".into()))
        );
    }

    #[test]
    fn test_time_field_date_falls_back_to_created_at() {
        let r = record(json!({"createdAt": {"_seconds": 1_710_000_000, "_nanoseconds": 0}}));
        assert!(matches!(
            time_field(&r, SESSION_DATE_KEYS),
            Some(TimeValue::Instant(_))
        ));
    }

    #[test]
    fn test_time_field_absent() {
        let r = record(json!({}));
        assert_eq!(time_field(&r, END_TIME_KEYS), None);
    }

    // ========== text_field / number_field ==========

    #[test]
    fn test_text_field_stringifies_numbers() {
        let r = record(json!({"userId": 1042}));
        assert_eq!(text_field(&r, USER_ID_KEYS), Some("1042".to_string()));
    }

    #[test]
    fn test_text_field_skips_objects() {
        let r = record(json!({"mentor": {"path": "mentors/m1"}, "mentor_id": "m1"}));
        assert_eq!(text_field(&r, MENTOR_ID_KEYS), Some("m1".to_string()));
    }

    #[test]
    fn test_number_field_nested_and_string() {
        let r = record(json!({"paymentDetails": {"amount": "150000"}}));
        assert_eq!(number_field(&r, AMOUNT_KEYS), Some(150000.0));
    }

    #[test]
    fn test_number_field_rejects_garbage() {
        let r = record(json!({"amount": "free"}));
        assert_eq!(number_field(&r, AMOUNT_KEYS), None);
    }

    // ========== flag_set ==========

    #[test]
    fn test_flag_set_truthiness() {
        assert!(flag_set(&record(json!({"refund_status": true})), REFUND_FLAG_KEYS));
        assert!(flag_set(
            &record(json!({"refundStatus": "processed"})),
            REFUND_FLAG_KEYS
        ));
        assert!(!flag_set(&record(json!({"refund_status": false})), REFUND_FLAG_KEYS));
        assert!(!flag_set(&record(json!({"refund_status": ""})), REFUND_FLAG_KEYS));
        assert!(!flag_set(&record(json!({"refund_status": 0})), REFUND_FLAG_KEYS));
        assert!(!flag_set(&record(json!({})), REFUND_FLAG_KEYS));
    }
}
