//! Storage Backends
//!
//! The tiers a cache stores encoded entries in: a bounded in-process map and
//! a one-file-per-key directory.

mod disk;
mod memory;

pub use disk::DiskBackend;
pub use memory::{MemoryBackend, MemoryLimits};

use chrono::{DateTime, Utc};

use crate::cache::{CacheKey, EntryMetadata};
use crate::error::Result;

/// Byte-level storage for encoded cache entries.
///
/// Backends store whatever bytes the codec produced and record the write
/// timestamp alongside them. A missing key is `Ok(None)` / `Ok(false)`, never
/// an error.
pub trait StorageBackend: Send + Sync {
    /// Returns the stored bytes for `key`.
    fn read(&self, key: &CacheKey) -> Result<Option<Vec<u8>>>;

    /// Stores `bytes` under `key`, replacing any previous entry.
    fn write(&self, key: &CacheKey, bytes: &[u8], written_at: DateTime<Utc>) -> Result<()>;

    /// Removes `key`. Returns whether an entry was present.
    fn delete(&self, key: &CacheKey) -> Result<bool>;

    /// Lists every stored key.
    fn list(&self) -> Result<Vec<CacheKey>>;

    /// Returns size and write time for `key`.
    fn metadata(&self, key: &CacheKey) -> Result<Option<EntryMetadata>>;

    /// Removes every entry. Returns how many were removed.
    fn clear(&self) -> Result<usize> {
        let mut removed = 0;
        for key in self.list()? {
            if self.delete(&key)? {
                removed += 1;
            }
        }
        Ok(removed)
    }
}
