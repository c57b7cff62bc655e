//! Store backed by a JSON export of the document database
//!
//! Expected layout:
//!
//! ```json
//! {
//!   "bookings": [ { "id": "b1", ... } ]   // or { "b1": { ... } }
//!   "mentors":  { "m1": { "name": "..." } },
//!   "users":    { "u1": { "name": "..." } }
//! }
//! ```

use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use super::{BookingStore, ProfileDirectory};
use crate::types::{
    BookdeskError, PageCursor, PageRequest, Profile, ProfileKind, RawBookingRecord, RawPage,
    Result,
};

#[derive(Deserialize)]
struct ExportFile {
    #[serde(default)]
    bookings: Option<Value>,
    #[serde(default)]
    mentors: Option<Value>,
    #[serde(default)]
    users: Option<Value>,
}

/// In-memory view of an export file.
///
/// Array collections keep file order. Id-keyed collections come back sorted
/// by id, the same order the document database lists them in. Booking ids
/// are unique, so a cursor always names exactly one record.
pub struct JsonExportStore {
    bookings: Vec<RawBookingRecord>,
    mentors: HashMap<String, Map<String, Value>>,
    users: HashMap<String, Map<String, Value>>,
}

impl JsonExportStore {
    /// Load an export file from disk
    pub fn open(path: &Path) -> Result<Self> {
        let mut bytes = fs::read(path)?;
        let store = Self::from_slice(&mut bytes)?;
        debug!(
            path = %path.display(),
            bookings = store.bookings.len(),
            mentors = store.mentors.len(),
            users = store.users.len(),
            "loaded export"
        );
        Ok(store)
    }

    /// Parse export bytes (simd-json mutates the buffer in place)
    pub fn from_slice(bytes: &mut [u8]) -> Result<Self> {
        let export: ExportFile =
            simd_json::from_slice(bytes).map_err(|e| BookdeskError::Parse(e.to_string()))?;
        Ok(Self::from_export(export))
    }

    /// Build from an already-parsed JSON value
    pub fn from_value(value: Value) -> Result<Self> {
        let export: ExportFile =
            serde_json::from_value(value).map_err(|e| BookdeskError::Parse(e.to_string()))?;
        Ok(Self::from_export(export))
    }

    fn from_export(export: ExportFile) -> Self {
        let bookings = unique_ids(documents(export.bookings, "bookings"))
            .into_iter()
            .map(|(id, fields)| RawBookingRecord::new(id, fields))
            .collect();

        Self {
            bookings,
            mentors: documents(export.mentors, "mentors").into_iter().collect(),
            users: documents(export.users, "users").into_iter().collect(),
        }
    }

    /// Number of booking documents
    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    /// Index of the first record of the requested page
    fn page_start(&self, request: &PageRequest) -> usize {
        match &request.cursor {
            Some(cursor) => match self.bookings.iter().position(|r| r.id == cursor.as_str()) {
                Some(index) => index + 1,
                None => {
                    warn!(cursor = %cursor, "unknown cursor, returning empty page");
                    self.bookings.len()
                }
            },
            None => {
                let page = request.page.max(1) as usize;
                (page - 1).saturating_mul(request.page_size)
            }
        }
    }
}

impl BookingStore for JsonExportStore {
    fn name(&self) -> &str {
        "json-export"
    }

    fn fetch_page(&self, request: &PageRequest) -> Result<RawPage> {
        if request.page_size == 0 {
            return Err(BookdeskError::Store("page size must be positive".into()));
        }

        let total = self.bookings.len();
        let start = self.page_start(request).min(total);
        let end = start.saturating_add(request.page_size).min(total);
        let records = self.bookings[start..end].to_vec();

        let next_cursor = if end < total {
            records.last().map(|r| PageCursor::new(r.id.clone()))
        } else {
            None
        };

        Ok(RawPage {
            records,
            next_cursor,
            total_count: total as u64,
        })
    }
}

impl ProfileDirectory for JsonExportStore {
    fn lookup(&self, kind: ProfileKind, id: &str) -> Result<Option<Profile>> {
        let collection = match kind {
            ProfileKind::Mentor => &self.mentors,
            ProfileKind::Student => &self.users,
        };
        Ok(collection.get(id).map(|fields| Profile {
            id: id.to_string(),
            fields: fields.clone(),
        }))
    }
}

/// Flatten a collection given either as an array or as an id-keyed object.
///
/// Array entries take their id from `id`/`_id`, else their position.
fn documents(collection: Option<Value>, name: &str) -> Vec<(String, Map<String, Value>)> {
    match collection {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match item {
                Value::Object(fields) => {
                    let id = document_id(&fields).unwrap_or_else(|| index.to_string());
                    Some((id, fields))
                }
                _ => {
                    warn!(collection = name, index, "skipping non-object document");
                    None
                }
            })
            .collect(),
        Some(Value::Object(entries)) => entries
            .into_iter()
            .filter_map(|(id, item)| match item {
                Value::Object(fields) => Some((id, fields)),
                _ => {
                    warn!(collection = name, id = %id, "skipping non-object document");
                    None
                }
            })
            .collect(),
        Some(_) => {
            warn!(collection = name, "collection is neither array nor object");
            Vec::new()
        }
    }
}

/// Suffix repeated ids with `#2`, `#3`, ... so every document is addressable
fn unique_ids(docs: Vec<(String, Map<String, Value>)>) -> Vec<(String, Map<String, Value>)> {
    let mut taken: HashSet<String> = docs.iter().map(|(id, _)| id.clone()).collect();
    let mut seen: HashSet<String> = HashSet::with_capacity(docs.len());

    docs.into_iter()
        .map(|(id, fields)| {
            if seen.insert(id.clone()) {
                return (id, fields);
            }
            let renamed = (2..)
                .map(|n| format!("{}#{}", id, n))
                .find(|candidate| !taken.contains(candidate))
                .unwrap_or_else(|| id.clone());
            warn!(id = %id, renamed = %renamed, "duplicate booking id");
            taken.insert(renamed.clone());
            seen.insert(renamed.clone());
            (renamed, fields)
        })
        .collect()
}

fn document_id(fields: &Map<String, Value>) -> Option<String> {
    ["id", "_id"].iter().find_map(|key| match fields.get(*key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
