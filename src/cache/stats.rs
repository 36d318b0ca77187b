//! Cache Statistics Module
//!
//! Tracks lookup outcomes and reports storage usage for diagnostics.

use serde::Serialize;

// == Cache Counters ==
/// Running lookup counters kept by a cache instance.
#[derive(Debug, Clone, Default)]
pub struct CacheCounters {
    /// Lookups answered from a tier
    pub hits: u64,
    /// Lookups that found nothing fresh
    pub misses: u64,
    /// Lookups or writes that hit a storage problem
    pub degraded: u64,
}

impl CacheCounters {
    pub fn new() -> Self {
        Self::default()
    }

    // == Record Hit ==
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Degraded ==
    pub fn record_degraded(&mut self) {
        self.degraded += 1;
    }
}

// == Cache Statistics ==
/// Point-in-time snapshot of a cache.
///
/// `total_size` and `entry_count` describe the disk tier only; the memory
/// tier is reported separately through `memory_entries`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStatistics {
    /// Bytes used by entry files on disk
    pub total_size: u64,
    /// Number of entry files on disk
    pub entry_count: usize,
    /// Entries resident in the memory tier
    pub memory_entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub degraded: u64,
    /// Entries evicted from the memory tier
    pub evictions: u64,
}

impl CacheStatistics {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    /// Degraded lookups are counted as misses.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
