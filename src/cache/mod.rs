//! Cache Module
//!
//! Expiring caches with a disk tier and an optional bounded memory tier.
//! `ResponseCache<T>` holds JSON payloads; `ImageCache` holds raw bytes.

pub mod backend;
mod clock;
mod codec;
mod entry;
mod key;
mod lru;
mod outcome;
mod policy;
mod stats;
mod store;
mod writer;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use backend::{DiskBackend, MemoryBackend, MemoryLimits, StorageBackend};
pub use clock::{Clock, ManualClock, SystemClock};
pub use codec::{Codec, JsonCodec, RawBytesCodec};
pub use entry::{CacheEntry, EntryMetadata};
pub use key::{CacheKey, PayloadKind};
pub use lru::LruTracker;
pub use outcome::{Lookup, WriteStatus};
pub use policy::{is_valid, ExpirationPolicy};
pub use stats::{CacheCounters, CacheStatistics};
pub use store::{Cache, CacheSettings, ImageCache, ResponseCache, WriteMode};
