//! Memoized lane packing.
//!
//! Packing is re-run whenever the timeline re-renders. The input only changes
//! when an item is added, removed, renamed or rescheduled, so the result is
//! keyed by a fingerprint of the ordered `(id, name, start, end)` tuples. The
//! name is part of the key because the cached lanes hold item clones.

use sha2::{Digest, Sha256};

use super::error::TimelineError;
use super::lanes::{pack_lanes, LanePacking};
use crate::models::ScheduledItem;

/// SHA-256 hex digest of the ordered `(id, name, start, end)` tuples.
///
/// Order matters: packing ties are broken by input order, so two permutations
/// of the same set are different layouts.
pub fn layout_fingerprint(items: &[ScheduledItem]) -> String {
    let mut hasher = Sha256::new();
    for item in items {
        hasher.update(item.id.as_str().as_bytes());
        hasher.update([0u8]);
        hasher.update(item.name.as_bytes());
        hasher.update([0u8]);
        match item.start_date {
            Some(date) => hasher.update(date.to_string().as_bytes()),
            None => hasher.update(b"-"),
        }
        hasher.update([0u8]);
        match item.end_date {
            Some(date) => hasher.update(date.to_string().as_bytes()),
            None => hasher.update(b"-"),
        }
        hasher.update([0xffu8]);
    }
    hex::encode(hasher.finalize())
}

/// Single-entry cache of the last packing.
#[derive(Debug, Default)]
pub struct LaneCache {
    entry: Option<(String, LanePacking)>,
    hits: u64,
    misses: u64,
}

impl LaneCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Packing for `items`, reusing the previous result when the fingerprint
    /// matches.
    pub fn pack(&mut self, items: &[ScheduledItem]) -> Result<&LanePacking, TimelineError> {
        let fingerprint = layout_fingerprint(items);

        let entry = match self.entry.take() {
            Some(entry) if entry.0 == fingerprint => {
                self.hits += 1;
                entry
            }
            _ => {
                self.misses += 1;
                (fingerprint, pack_lanes(items)?)
            }
        };
        Ok(&self.entry.insert(entry).1)
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
