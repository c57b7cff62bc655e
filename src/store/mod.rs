//! Document store and profile directory seams

mod json_export;

pub use json_export::JsonExportStore;

use crate::types::{PageRequest, Profile, ProfileKind, RawPage, Result};

/// Source of paginated booking documents
pub trait BookingStore: Send + Sync {
    /// Store name for logging (e.g., "json-export")
    fn name(&self) -> &str;

    /// Fetch one page. The returned cursor is opaque to callers.
    fn fetch_page(&self, request: &PageRequest) -> Result<RawPage>;
}

/// Lookup of mentor and student profiles by id
pub trait ProfileDirectory: Send + Sync {
    /// `Ok(None)` when no profile exists for `id`
    fn lookup(&self, kind: ProfileKind, id: &str) -> Result<Option<Profile>>;
}
