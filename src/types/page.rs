//! Pagination types shared by the store and the bookings service

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{BookingSummary, RawBookingRecord};

/// Opaque pagination handle. Produced by a store, handed back to it unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageCursor(String);

impl PageCursor {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A request for one page of bookings
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    /// 1-based page number, used when no cursor is given
    pub page: u32,
    pub page_size: usize,
    /// Start after the record this cursor points at
    pub cursor: Option<PageCursor>,
}

impl PageRequest {
    pub fn first(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size,
            cursor: None,
        }
    }
}

/// One page of raw records as served by a store
#[derive(Debug, Clone, Default)]
pub struct RawPage {
    pub records: Vec<RawBookingRecord>,
    /// `None` once the collection is exhausted
    pub next_cursor: Option<PageCursor>,
    pub total_count: u64,
}

/// One page of summaries, shaped like the request that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingPage {
    /// Same order as the records the store returned
    pub summaries: Vec<BookingSummary>,
    pub page: u32,
    pub page_size: usize,
    pub total_count: u64,
    pub cursor: Option<PageCursor>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_serializes_transparently() {
        let cursor = PageCursor::new("booking-42");
        assert_eq!(serde_json::to_string(&cursor).unwrap(), "\"booking-42\"");
        assert_eq!(cursor.to_string(), "booking-42");
    }

    #[test]
    fn test_first_page_request() {
        let request = PageRequest::first(25);
        assert_eq!(request.page, 1);
        assert_eq!(request.page_size, 25);
        assert!(request.cursor.is_none());
    }
}
