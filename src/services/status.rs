//! Booking and payment status mapping
//!
//! Both mappers are case-insensitive and total: unknown or missing input
//! lands on a default rather than an error.

use super::normalizer::{
    flag_set, text_field, MENTOR_STATUS_KEYS, PAYMENT_STATUS_KEYS, REFUND_FLAG_KEYS,
};
use crate::types::{BookingStatus, PaymentStatus, RawBookingRecord};

/// Payment status of a raw record
pub fn payment_status(record: &RawBookingRecord) -> PaymentStatus {
    let raw = text_field(record, PAYMENT_STATUS_KEYS);
    map_payment_status(raw.as_deref(), flag_set(record, REFUND_FLAG_KEYS))
}

/// Booking status of a raw record, from the mentor's review field
pub fn booking_status(record: &RawBookingRecord) -> BookingStatus {
    let raw = text_field(record, MENTOR_STATUS_KEYS);
    map_booking_status(raw.as_deref())
}

/// `paid`/`captured` → Paid, `refunded` or a refund flag → Refund, else Pending
pub fn map_payment_status(raw: Option<&str>, refund_flag: bool) -> PaymentStatus {
    let status = raw.map(|s| s.trim().to_lowercase());
    match status.as_deref() {
        Some("paid") | Some("captured") => PaymentStatus::Paid,
        Some("refunded") => PaymentStatus::Refund,
        _ if refund_flag => PaymentStatus::Refund,
        _ => PaymentStatus::Pending,
    }
}

/// `rejected` → Rejected, `pending` → Pending, anything else → Accepted.
///
/// A booking the mentor never reviewed reads as Accepted.
pub fn map_booking_status(raw: Option<&str>) -> BookingStatus {
    let status = raw.map(|s| s.trim().to_lowercase());
    match status.as_deref() {
        Some("rejected") => BookingStatus::Rejected,
        Some("pending") => BookingStatus::Pending,
        _ => BookingStatus::Accepted,
    }
}
