//! Raw booking record → display summary

use chrono::FixedOffset;

use super::amount::{format_amount, DEFAULT_CURRENCY};
use super::duration::{duration, UNPARSEABLE};
use super::normalizer::{
    number_field, text_field, time_field, AMOUNT_KEYS, CURRENCY_KEYS, END_TIME_KEYS,
    MENTOR_ID_KEYS, MENTOR_NAME_KEYS, SESSION_DATE_KEYS, START_TIME_KEYS, STUDENT_NAME_KEYS,
    USER_ID_KEYS,
};
use super::status::{booking_status, payment_status};
use super::time_parser::{display_date, display_time};
use crate::types::{BookingSummary, RawBookingRecord, TimeValue};

/// Participant ids read from a record, plus names resolved from the profile directory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Participants {
    pub student_id: Option<String>,
    pub mentor_id: Option<String>,
    pub student: Option<String>,
    pub mentor: Option<String>,
}

impl Participants {
    /// Ids as stored on the record; names are left unresolved
    pub fn from_record(record: &RawBookingRecord) -> Self {
        Self {
            student_id: text_field(record, USER_ID_KEYS),
            mentor_id: text_field(record, MENTOR_ID_KEYS),
            student: None,
            mentor: None,
        }
    }
}

/// Builds [`BookingSummary`] values. Holds only formatting settings.
#[derive(Debug, Clone)]
pub struct Summarizer {
    offset: FixedOffset,
    default_currency: String,
}

impl Summarizer {
    pub fn new(offset: FixedOffset) -> Self {
        Self {
            offset,
            default_currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    /// Currency used when a record carries no code
    pub fn with_default_currency(mut self, code: impl Into<String>) -> Self {
        self.default_currency = code.into();
        self
    }

    /// Summarize one record. Every field degrades to a placeholder instead of failing.
    pub fn summarize(&self, record: &RawBookingRecord, participants: &Participants) -> BookingSummary {
        let start = time_field(record, START_TIME_KEYS);
        let end = time_field(record, END_TIME_KEYS);
        let date = time_field(record, SESSION_DATE_KEYS);

        let currency = text_field(record, CURRENCY_KEYS);
        let currency = currency
            .as_deref()
            .unwrap_or(self.default_currency.as_str());

        BookingSummary {
            id: record.id.clone(),
            student_name: display_name(
                participants.student.as_deref(),
                record,
                STUDENT_NAME_KEYS,
                participants.student_id.as_deref(),
            ),
            mentor_name: display_name(
                participants.mentor.as_deref(),
                record,
                MENTOR_NAME_KEYS,
                participants.mentor_id.as_deref(),
            ),
            time_slot: self.time_slot(date.as_ref(), start.as_ref()),
            duration: duration(start.as_ref(), end.as_ref(), self.offset),
            amount: format_amount(number_field(record, AMOUNT_KEYS), Some(currency)),
            booking_status: booking_status(record),
            payment_status: payment_status(record),
        }
    }

    /// "<date> <start>", trimmed; either part may be missing
    fn time_slot(&self, date: Option<&TimeValue>, start: Option<&TimeValue>) -> String {
        let date = date
            .map(|d| display_date(d, self.offset))
            .unwrap_or_default();
        let start = start
            .map(|s| display_time(s, self.offset))
            .unwrap_or_default();
        format!("{} {}", date, start).trim().to_string()
    }
}

/// Looked-up name → inline name field → raw id → "-"
fn display_name(
    looked_up: Option<&str>,
    record: &RawBookingRecord,
    name_keys: &[&str],
    id: Option<&str>,
) -> String {
    looked_up
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .or_else(|| text_field(record, name_keys))
        .or_else(|| id.map(String::from))
        .unwrap_or_else(|| UNPARSEABLE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BookingStatus, PaymentStatus};
    use serde_json::json;

    fn ist() -> FixedOffset {
        FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap()
    }

    fn record(value: serde_json::Value) -> RawBookingRecord {
        RawBookingRecord::from_value("booking-1", value)
    }

    #[test]
    fn test_summarize_webhook_shaped_record() {
        let r = record(json!({
            "userId": "u1",
            "mentorId": "m1",
            "amount": 150000,
            "currency": "INR",
            "status": "captured",
            "sessionDate": "2024-03-12",
            "startTime": "11:30 PM",
            "endTime": "12:30 AM"
        }));
        let participants = Participants {
            student: Some("Asha Rao".into()),
            mentor: Some("Vikram Sen".into()),
            ..Participants::from_record(&r)
        };

        let summary = Summarizer::new(ist()).summarize(&r, &participants);

        assert_eq!(summary.id, "booking-1");
        assert_eq!(summary.student_name, "Asha Rao");
        assert_eq!(summary.mentor_name, "Vikram Sen");
        assert_eq!(summary.time_slot, "2024-03-12 11:30 PM");
        assert_eq!(summary.duration, "1 hr");
        assert_eq!(summary.amount, "₹1,500.00");
        assert_eq!(summary.booking_status, BookingStatus::Accepted);
        assert_eq!(summary.payment_status, PaymentStatus::Paid);
    }

    #[test]
    fn test_summarize_legacy_record_with_timestamps() {
        let r = record(json!({
            "user_id": "u2",
            "mentor_id": "m2",
            "amount_paid": "99900",
            "mentor_status": "Pending",
            "created_at": {"_seconds": 1_710_241_200, "_nanoseconds": 0},
            "start_time": {"_seconds": 1_710_241_200, "_nanoseconds": 0},
            "end_time": 1_710_246_600_000_i64
        }));

        let summary = Summarizer::new(ist()).summarize(&r, &Participants::from_record(&r));

        assert_eq!(summary.student_name, "u2");
        assert_eq!(summary.mentor_name, "m2");
        assert_eq!(summary.time_slot, "12 Mar 2024 04:30 PM");
        assert_eq!(summary.duration, "1 hr 30 min");
        assert_eq!(summary.amount, "₹999.00");
        assert_eq!(summary.booking_status, BookingStatus::Pending);
        assert_eq!(summary.payment_status, PaymentStatus::Pending);
    }

    #[test]
    fn test_summarize_empty_record() {
        let summary = Summarizer::new(ist()).summarize(&record(json!({})), &Participants::default());

        assert_eq!(summary.student_name, "-");
        assert_eq!(summary.mentor_name, "-");
        assert_eq!(summary.time_slot, "");
        assert_eq!(summary.duration, "-");
        assert_eq!(summary.amount, "₹0.00");
        assert_eq!(summary.booking_status, BookingStatus::Accepted);
        assert_eq!(summary.payment_status, PaymentStatus::Pending);
    }

    #[test]
    fn test_inline_name_used_before_id() {
        let r = record(json!({"userId": "u3", "studentName": "Ravi"}));
        let summary = Summarizer::new(ist()).summarize(&r, &Participants::from_record(&r));
        assert_eq!(summary.student_name, "Ravi");
    }

    #[test]
    fn test_blank_looked_up_name_is_ignored() {
        let r = record(json!({"mentorId": "m9"}));
        let participants = Participants {
            mentor: Some("  ".into()),
            ..Participants::from_record(&r)
        };
        let summary = Summarizer::new(ist()).summarize(&r, &participants);
        assert_eq!(summary.mentor_name, "m9");
    }

    #[test]
    fn test_default_currency_override() {
        let r = record(json!({"amount": 2500}));
        let summary = Summarizer::new(ist())
            .with_default_currency("USD")
            .summarize(&r, &Participants::default());
        assert_eq!(summary.amount, "$25.00");
    }

    #[test]
    fn test_record_currency_beats_default() {
        let r = record(json!({"amount": 2500, "currency": "INR"}));
        let summary = Summarizer::new(ist())
            .with_default_currency("USD")
            .summarize(&r, &Participants::default());
        assert_eq!(summary.amount, "₹25.00");
    }

    #[test]
    fn test_from_record_reads_ids_once() {
        let r = record(json!({"user_id": " u7 ", "studentId": "u8", "mentor": "m4"}));
        let participants = Participants::from_record(&r);
        assert_eq!(participants.student_id.as_deref(), Some("u7"));
        assert_eq!(participants.mentor_id.as_deref(), Some("m4"));
        assert_eq!(participants.student, None);
    }

    #[test]
    fn test_id_fallback_comes_from_participants() {
        let r = record(json!({"userId": "u-record", "mentorId": "m-record"}));
        let participants = Participants {
            student_id: Some("u-resolved".into()),
            mentor_id: None,
            student: None,
            mentor: None,
        };
        let summary = Summarizer::new(ist()).summarize(&r, &participants);
        assert_eq!(summary.student_name, "u-resolved");
        assert_eq!(summary.mentor_name, "-");
    }

    #[test]
    fn test_time_slot_without_date() {
        let r = record(json!({"startTime": "9:00 AM", "endTime": "9:45 AM"}));
        let summary = Summarizer::new(ist()).summarize(&r, &Participants::default());
        assert_eq!(summary.time_slot, "9:00 AM");
        assert_eq!(summary.duration, "45 min");
    }
}
