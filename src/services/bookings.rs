//! Bookings list service
//!
//! Fetches a page of raw bookings, resolves mentor and student names, and
//! summarizes every record. Records are summarized in parallel; the output
//! keeps the store's order so callers can zip summaries back onto records.

use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, warn};

use super::summarizer::{Participants, Summarizer};
use crate::store::{BookingStore, ProfileDirectory};
use crate::types::{BookingPage, BookingSummary, PageRequest, ProfileKind, RawBookingRecord, Result};

/// Builds summary pages from an injected store and profile directory
pub struct BookingsService {
    store: Arc<dyn BookingStore>,
    directory: Arc<dyn ProfileDirectory>,
    summarizer: Summarizer,
}

impl BookingsService {
    pub fn new(
        store: Arc<dyn BookingStore>,
        directory: Arc<dyn ProfileDirectory>,
        summarizer: Summarizer,
    ) -> Self {
        Self {
            store,
            directory,
            summarizer,
        }
    }

    /// Fetch and summarize one page.
    ///
    /// Only a store failure is returned as an error; per-record problems
    /// degrade to placeholder values.
    pub fn list(&self, request: &PageRequest) -> Result<BookingPage> {
        let raw = self.store.fetch_page(request)?;
        debug!(
            store = self.store.name(),
            page = request.page,
            records = raw.records.len(),
            total = raw.total_count,
            "fetched bookings page"
        );

        let summaries: Vec<BookingSummary> = raw
            .records
            .par_iter()
            .map(|record| self.summarize(record))
            .collect();

        Ok(BookingPage {
            summaries,
            page: request.page,
            page_size: request.page_size,
            total_count: raw.total_count,
            cursor: raw.next_cursor,
        })
    }

    /// Summarize a single record, looking up both participants
    pub fn summarize(&self, record: &RawBookingRecord) -> BookingSummary {
        let mut participants = Participants::from_record(record);
        participants.student =
            self.resolve_name(ProfileKind::Student, participants.student_id.as_deref());
        participants.mentor =
            self.resolve_name(ProfileKind::Mentor, participants.mentor_id.as_deref());
        self.summarizer.summarize(record, &participants)
    }

    fn resolve_name(&self, kind: ProfileKind, id: Option<&str>) -> Option<String> {
        let id = id?;
        match self.directory.lookup(kind, id) {
            Ok(Some(profile)) => profile.display_name(),
            Ok(None) => {
                debug!(%kind, id, "profile not found");
                None
            }
            Err(e) => {
                warn!(%kind, id, error = %e, "profile lookup failed");
                None
            }
        }
    }
}
