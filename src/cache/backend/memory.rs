//! Memory Backend
//!
//! Bounded in-process tier with item-count and byte ceilings and LRU eviction.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::debug;

use super::StorageBackend;
use crate::cache::{CacheKey, EntryMetadata, LruTracker};
use crate::error::Result;

// == Memory Limits ==
/// Ceilings enforced by the memory tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryLimits {
    /// Maximum resident entries
    pub max_entries: usize,
    /// Maximum resident bytes across all entries
    pub max_bytes: u64,
}

#[derive(Debug)]
struct Slot {
    bytes: Vec<u8>,
    written_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct MemoryState {
    entries: HashMap<CacheKey, Slot>,
    lru: LruTracker,
    total_bytes: u64,
    evictions: u64,
}

impl MemoryState {
    fn take(&mut self, key: &CacheKey) -> Option<Slot> {
        let slot = self.entries.remove(key)?;
        self.lru.remove(key);
        self.total_bytes -= slot.bytes.len() as u64;
        Some(slot)
    }
}

// == Memory Backend ==
/// In-memory storage tier. Lives as long as the process.
#[derive(Debug)]
pub struct MemoryBackend {
    limits: MemoryLimits,
    state: Mutex<MemoryState>,
}

impl MemoryBackend {
    pub fn new(limits: MemoryLimits) -> Self {
        Self {
            limits,
            state: Mutex::new(MemoryState::default()),
        }
    }

    pub fn limits(&self) -> MemoryLimits {
        self.limits
    }

    /// Number of resident entries.
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes held by resident entries.
    pub fn total_bytes(&self) -> u64 {
        self.state.lock().total_bytes
    }

    /// Entries evicted to respect the ceilings since construction.
    pub fn evictions(&self) -> u64 {
        self.state.lock().evictions
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &CacheKey) -> Result<Option<Vec<u8>>> {
        let mut state = self.state.lock();
        let bytes = match state.entries.get(key) {
            Some(slot) => slot.bytes.clone(),
            None => return Ok(None),
        };
        state.lru.touch(key);
        Ok(Some(bytes))
    }

    /// Never fails. Evicts least recently used entries until the new one
    /// fits; an entry larger than the byte ceiling is not retained at all.
    fn write(&self, key: &CacheKey, bytes: &[u8], written_at: DateTime<Utc>) -> Result<()> {
        let size = bytes.len() as u64;
        let mut state = self.state.lock();
        state.take(key);

        if self.limits.max_entries == 0 || size > self.limits.max_bytes {
            debug!(key = %key, size, "entry exceeds memory tier limits, not retained");
            return Ok(());
        }

        while state.entries.len() >= self.limits.max_entries
            || state.total_bytes + size > self.limits.max_bytes
        {
            let Some(oldest) = state.lru.evict_oldest() else {
                break;
            };
            if let Some(slot) = state.entries.remove(&oldest) {
                state.total_bytes -= slot.bytes.len() as u64;
                state.evictions += 1;
                debug!(key = %oldest, "evicted from memory tier");
            }
        }

        state.entries.insert(
            key.clone(),
            Slot {
                bytes: bytes.to_vec(),
                written_at,
            },
        );
        state.lru.touch(key);
        state.total_bytes += size;
        Ok(())
    }

    fn delete(&self, key: &CacheKey) -> Result<bool> {
        Ok(self.state.lock().take(key).is_some())
    }

    fn list(&self) -> Result<Vec<CacheKey>> {
        Ok(self.state.lock().entries.keys().cloned().collect())
    }

    fn metadata(&self, key: &CacheKey) -> Result<Option<EntryMetadata>> {
        Ok(self.state.lock().entries.get(key).map(|slot| EntryMetadata {
            size: slot.bytes.len() as u64,
            written_at: slot.written_at,
        }))
    }

    fn clear(&self) -> Result<usize> {
        let mut state = self.state.lock();
        let removed = state.entries.len();
        state.entries.clear();
        state.lru.clear();
        state.total_bytes = 0;
        Ok(removed)
    }
}
