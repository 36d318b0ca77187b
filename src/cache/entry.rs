//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with their write timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// == Cache Entry ==
/// A cached value together with the time it was written.
///
/// `written_at` is stamped once by the cache's clock and never changes; an
/// entry is replaced, not updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    /// The stored value
    pub value: T,
    /// Write timestamp
    pub written_at: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    pub fn new(value: T, written_at: DateTime<Utc>) -> Self {
        Self { value, written_at }
    }

    // == Age ==
    /// Returns how long ago the entry was written, relative to `now`.
    ///
    /// Negative when `now` is behind `written_at` (clock skew).
    pub fn age(&self, now: DateTime<Utc>) -> chrono::Duration {
        now - self.written_at
    }

    /// Consumes the entry and returns the value.
    pub fn into_value(self) -> T {
        self.value
    }
}

// == Entry Metadata ==
/// What a storage backend knows about one stored entry without decoding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryMetadata {
    /// Stored size in bytes
    pub size: u64,
    /// Write timestamp as recorded by the backend
    pub written_at: DateTime<Utc>,
}
