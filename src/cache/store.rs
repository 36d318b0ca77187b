//! Cache Store Module
//!
//! The cache facade: derives keys, picks tiers, applies expiration and absorbs
//! storage failures so callers only ever see hit or miss.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cache::backend::{DiskBackend, MemoryBackend, MemoryLimits, StorageBackend};
use crate::cache::writer::DiskWriter;
use crate::cache::{
    CacheCounters, CacheEntry, CacheKey, CacheStatistics, Clock, Codec, ExpirationPolicy,
    JsonCodec, Lookup, RawBytesCodec, WriteStatus,
};
use crate::config::Config;
use crate::error::CacheError;

// == Write Mode ==
/// How `put` reaches the disk tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Disk write completes before `put` returns
    Through,
    /// Disk write is queued to a background task
    Behind,
}

// == Cache Settings ==
/// Per-instance configuration.
#[derive(Debug, Clone)]
pub struct CacheSettings {
    /// Name used in logs
    pub name: String,
    /// Directory holding this cache's entry files
    pub directory: PathBuf,
    pub ttl: Duration,
    /// Memory tier limits; None for a disk-only cache
    pub memory: Option<MemoryLimits>,
    pub write_mode: WriteMode,
}

enum TierRead<V> {
    Fresh { entry: CacheEntry<V>, bytes: Vec<u8> },
    Stale,
    Absent,
    Failed(CacheError),
}

// == Cache ==
/// Expiring cache over an optional memory tier and a disk tier.
pub struct Cache<C: Codec> {
    name: String,
    codec: C,
    policy: ExpirationPolicy,
    clock: Arc<dyn Clock>,
    memory: Option<MemoryBackend>,
    disk: Arc<DiskBackend>,
    writer: Option<DiskWriter>,
    counters: Arc<Mutex<CacheCounters>>,
}

/// JSON response cache: disk only, write-through.
pub type ResponseCache<T> = Cache<JsonCodec<T>>;

/// Image byte cache: memory and disk, write-behind.
pub type ImageCache = Cache<RawBytesCodec>;

impl<C: Codec> Cache<C> {
    // == Constructor ==
    /// Opens a cache and sweeps entries that expired while it was closed.
    ///
    /// Write-behind caches spawn their disk writer on the current tokio
    /// runtime; without one they write synchronously.
    pub fn new(settings: CacheSettings, codec: C, clock: Arc<dyn Clock>) -> Self {
        let disk = Arc::new(DiskBackend::new(&settings.directory));
        let counters = Arc::new(Mutex::new(CacheCounters::new()));

        let writer = match settings.write_mode {
            WriteMode::Through => None,
            WriteMode::Behind => {
                let writer = DiskWriter::spawn(disk.clone(), counters.clone());
                if writer.is_none() {
                    debug!(cache = %settings.name, "no async runtime, disk writes are synchronous");
                }
                writer
            }
        };

        let cache = Self {
            name: settings.name,
            codec,
            policy: ExpirationPolicy::new(settings.ttl),
            clock,
            memory: settings.memory.map(MemoryBackend::new),
            disk,
            writer,
            counters,
        };

        let removed = cache.invalidate_expired();
        info!(
            cache = %cache.name,
            dir = %cache.disk.directory().display(),
            ttl_secs = cache.policy.ttl().as_secs(),
            removed,
            "cache opened"
        );
        cache
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ttl(&self) -> Duration {
        self.policy.ttl()
    }

    pub fn directory(&self) -> &Path {
        self.disk.directory()
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Storage key for `identifier`.
    pub fn key_for(&self, identifier: &str) -> CacheKey {
        CacheKey::derive(identifier, self.codec.kind())
    }

    /// File backing `identifier` on disk.
    pub fn storage_path(&self, identifier: &str) -> PathBuf {
        self.disk.path_for(&self.key_for(identifier))
    }

    // == Get ==
    /// Looks `identifier` up, memory tier first.
    ///
    /// Expired entries are removed and reported as a miss. Unreadable entries
    /// are removed and reported as degraded, unless the other tier still has
    /// the entry. A fresh disk hit is copied into the memory tier.
    pub fn get(&self, identifier: &str) -> Lookup<C::Value> {
        let key = self.key_for(identifier);
        let now = self.clock.now();
        let mut memory_failure = None;

        if let Some(memory) = &self.memory {
            match self.read_tier(memory, &key, now) {
                TierRead::Fresh { entry, .. } => {
                    self.counters.lock().record_hit();
                    return Lookup::Hit(entry.value);
                }
                TierRead::Failed(e) => {
                    warn!(cache = %self.name, key = %key, error = %e, "memory tier entry unreadable");
                    self.counters.lock().record_degraded();
                    memory_failure = Some(e);
                }
                TierRead::Stale | TierRead::Absent => {}
            }
        }

        match self.read_tier(self.disk.as_ref(), &key, now) {
            TierRead::Fresh { entry, bytes } => {
                if let Some(memory) = &self.memory {
                    if let Err(e) = memory.write(&key, &bytes, entry.written_at) {
                        debug!(cache = %self.name, key = %key, error = %e, "promotion failed");
                    }
                }
                self.counters.lock().record_hit();
                Lookup::Hit(entry.value)
            }
            TierRead::Stale | TierRead::Absent => {
                self.counters.lock().record_miss();
                match memory_failure {
                    Some(e) => Lookup::Degraded(e),
                    None => Lookup::Miss,
                }
            }
            TierRead::Failed(e) => {
                warn!(cache = %self.name, key = %key, error = %e, "cache read degraded");
                let mut counters = self.counters.lock();
                counters.record_miss();
                counters.record_degraded();
                Lookup::Degraded(e)
            }
        }
    }

    // == Put ==
    /// Stores `value` under `identifier`, replacing any previous entry.
    pub fn put(&self, identifier: &str, value: C::Value) -> WriteStatus {
        let key = self.key_for(identifier);
        let entry = CacheEntry::new(value, self.clock.now());

        let mut bytes = match self.codec.encode(&entry) {
            Ok(bytes) => bytes,
            Err(e) => return self.degraded_write(&key, e),
        };

        if let Some(memory) = &self.memory {
            if let Err(e) = memory.write(&key, &bytes, entry.written_at) {
                debug!(cache = %self.name, key = %key, error = %e, "memory tier write failed");
            }
        }

        if let Some(writer) = &self.writer {
            match writer.store(key.clone(), bytes, entry.written_at) {
                Ok(()) => return WriteStatus::Written,
                Err(rejected) => bytes = rejected,
            }
        }

        match self.disk.write(&key, &bytes, entry.written_at) {
            Ok(()) => WriteStatus::Written,
            Err(e) => self.degraded_write(&key, e),
        }
    }

    // == Remove ==
    /// Removes one entry from every tier, including writes still queued for
    /// it. Returns whether anything was removed.
    pub fn remove(&self, identifier: &str) -> bool {
        let key = self.key_for(identifier);
        let remove = || {
            let in_memory = self
                .memory
                .as_ref()
                .map(|memory| self.discard(memory, &key))
                .unwrap_or(false);
            let on_disk = self.discard(self.disk.as_ref(), &key);
            in_memory || on_disk
        };

        match &self.writer {
            Some(writer) => writer.remove_with(&key, remove),
            None => remove(),
        }
    }

    // == Invalidate All ==
    /// Removes every entry from every tier, including writes still queued.
    ///
    /// Returns the number of disk entries removed.
    pub fn invalidate_all(&self) -> usize {
        let clear = || {
            if let Some(memory) = &self.memory {
                let _ = memory.clear();
            }
            self.disk.clear()
        };
        let cleared = match &self.writer {
            Some(writer) => writer.clear_with(clear),
            None => clear(),
        };

        let removed = match cleared {
            Ok(removed) => removed,
            Err(e) => {
                warn!(cache = %self.name, error = %e, "failed to clear cache directory");
                0
            }
        };
        info!(cache = %self.name, removed, "cache invalidated");
        removed
    }

    // == Invalidate Expired ==
    /// Removes entries that are no longer fresh, plus unreadable files.
    ///
    /// Returns the number of disk entries removed.
    pub fn invalidate_expired(&self) -> usize {
        let now = self.clock.now();

        if let Some(memory) = &self.memory {
            for key in memory.list().unwrap_or_default() {
                if let Ok(Some(meta)) = memory.metadata(&key) {
                    if !self.policy.is_valid(meta.written_at, now) {
                        let _ = memory.delete(&key);
                    }
                }
            }
        }

        let keys = match self.disk.list() {
            Ok(keys) => keys,
            Err(e) => {
                warn!(cache = %self.name, error = %e, "failed to list cache directory");
                return 0;
            }
        };

        let removed = keys
            .iter()
            .filter(|key| self.sweep_disk_entry(key, now))
            .count();

        if removed > 0 {
            debug!(cache = %self.name, removed, "removed expired entries");
        }
        removed
    }

    // == Statistics ==
    /// Disk usage plus runtime counters. Never fails.
    pub fn statistics(&self) -> CacheStatistics {
        let (total_size, entry_count) = self.disk.usage();
        let counters = self.counters.lock().clone();

        CacheStatistics {
            total_size,
            entry_count,
            memory_entries: self.memory.as_ref().map(|m| m.len()).unwrap_or(0),
            hits: counters.hits,
            misses: counters.misses,
            degraded: counters.degraded,
            evictions: self.memory.as_ref().map(|m| m.evictions()).unwrap_or(0),
        }
    }

    // == Flush ==
    /// Waits for queued background disk writes to land.
    pub async fn flush(&self) {
        if let Some(writer) = &self.writer {
            writer.flush().await;
        }
    }

    fn read_tier(
        &self,
        tier: &dyn StorageBackend,
        key: &CacheKey,
        now: DateTime<Utc>,
    ) -> TierRead<C::Value> {
        let bytes = match tier.read(key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return TierRead::Absent,
            Err(e) => return TierRead::Failed(e),
        };
        let meta = match tier.metadata(key) {
            Ok(Some(meta)) => meta,
            // removed between the two calls
            Ok(None) => return TierRead::Absent,
            Err(e) => return TierRead::Failed(e),
        };

        match self.codec.decode(key, &bytes, &meta) {
            Ok(entry) if self.policy.is_valid(entry.written_at, now) => {
                TierRead::Fresh { entry, bytes }
            }
            Ok(_) => {
                self.discard(tier, key);
                TierRead::Stale
            }
            Err(e) => {
                if e.is_corrupt() {
                    self.discard(tier, key);
                }
                TierRead::Failed(e)
            }
        }
    }

    /// Removes one disk entry if it is stale or unreadable. Entries whose
    /// timestamp lives in the metadata are judged without reading the payload.
    fn sweep_disk_entry(&self, key: &CacheKey, now: DateTime<Utc>) -> bool {
        let meta = match self.disk.metadata(key) {
            Ok(Some(meta)) => meta,
            Ok(None) => return false,
            Err(e) => {
                warn!(cache = %self.name, key = %key, error = %e, "failed to inspect entry");
                return false;
            }
        };

        match self.codec.written_at_from_metadata(key, &meta) {
            Some(Ok(written_at)) => {
                !self.policy.is_valid(written_at, now) && self.discard(self.disk.as_ref(), key)
            }
            Some(Err(e)) => {
                debug!(cache = %self.name, key = %key, error = %e, "removing unreadable entry");
                self.discard(self.disk.as_ref(), key)
            }
            None => match self.read_tier(self.disk.as_ref(), key, now) {
                TierRead::Stale => true,
                TierRead::Failed(e) if e.is_corrupt() => true,
                TierRead::Failed(e) => {
                    warn!(cache = %self.name, key = %key, error = %e, "failed to inspect entry");
                    false
                }
                TierRead::Fresh { .. } | TierRead::Absent => false,
            },
        }
    }

    fn discard(&self, tier: &dyn StorageBackend, key: &CacheKey) -> bool {
        match tier.delete(key) {
            Ok(removed) => removed,
            Err(e) => {
                warn!(cache = %self.name, key = %key, error = %e, "failed to delete entry");
                false
            }
        }
    }

    fn degraded_write(&self, key: &CacheKey, e: CacheError) -> WriteStatus {
        warn!(cache = %self.name, key = %key, error = %e, "cache write degraded");
        self.counters.lock().record_degraded();
        WriteStatus::Degraded(e)
    }
}

impl<T> Cache<JsonCodec<T>>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Opens the response cache described by `config`.
    pub fn responses(config: &Config, clock: Arc<dyn Clock>) -> Self {
        Cache::new(config.response_settings(), JsonCodec::new(), clock)
    }
}

impl Cache<RawBytesCodec> {
    /// Opens the image cache described by `config`.
    pub fn images(config: &Config, clock: Arc<dyn Clock>) -> Self {
        Cache::new(config.image_settings(), RawBytesCodec, clock)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use std::fs;
    use tempfile::TempDir;

    const HOUR: Duration = Duration::from_secs(3600);

    fn settings(dir: &Path, ttl: Duration) -> CacheSettings {
        CacheSettings {
            name: "test".to_string(),
            directory: dir.to_path_buf(),
            ttl,
            memory: None,
            write_mode: WriteMode::Through,
        }
    }

    fn json_cache(dir: &Path, clock: Arc<ManualClock>) -> Cache<JsonCodec<Vec<String>>> {
        Cache::new(settings(dir, HOUR), JsonCodec::new(), clock)
    }

    fn repos(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_get_on_empty_cache_misses() {
        let temp_dir = TempDir::new().unwrap();
        let cache = json_cache(temp_dir.path(), Arc::new(ManualClock::starting_now()));

        assert!(matches!(cache.get("trending"), Lookup::Miss));
        assert_eq!(cache.statistics().misses, 1);
    }

    #[test]
    fn test_put_then_get() {
        let temp_dir = TempDir::new().unwrap();
        let cache = json_cache(temp_dir.path(), Arc::new(ManualClock::starting_now()));

        assert!(cache.put("trending", repos(&["a/a", "b/b"])).is_written());

        assert_eq!(
            cache.get("trending").into_option(),
            Some(repos(&["a/a", "b/b"]))
        );
        assert!(cache.storage_path("trending").exists());
    }

    #[test]
    fn test_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let cache = json_cache(temp_dir.path(), Arc::new(ManualClock::starting_now()));

        cache.put("q", repos(&["old"]));
        cache.put("q", repos(&["new"]));

        assert_eq!(cache.get("q").into_option(), Some(repos(&["new"])));
        assert_eq!(cache.statistics().entry_count, 1);
    }

    #[test]
    fn test_trending_scenario() {
        let temp_dir = TempDir::new().unwrap();
        let clock = Arc::new(ManualClock::starting_now());
        let cache = json_cache(temp_dir.path(), clock.clone());

        cache.put("trending", repos(&["repoA", "repoB"]));

        clock.advance(Duration::from_secs(1800));
        assert_eq!(
            cache.get("trending").into_option(),
            Some(repos(&["repoA", "repoB"]))
        );

        clock.advance(Duration::from_secs(1900));
        assert!(matches!(cache.get("trending"), Lookup::Miss));
        // stale entry removed on read
        assert!(!cache.storage_path("trending").exists());
    }

    #[test]
    fn test_corrupt_entry_is_degraded_and_removed() {
        let temp_dir = TempDir::new().unwrap();
        let cache = json_cache(temp_dir.path(), Arc::new(ManualClock::starting_now()));

        fs::write(cache.storage_path("broken"), b"{\"value\": [\"trunc").unwrap();

        let lookup = cache.get("broken");
        assert!(lookup.is_degraded());
        assert!(!cache.storage_path("broken").exists());

        cache.put("broken", repos(&["fixed"]));
        assert_eq!(cache.get("broken").into_option(), Some(repos(&["fixed"])));
        assert_eq!(cache.statistics().degraded, 1);
    }

    #[test]
    fn test_remove() {
        let temp_dir = TempDir::new().unwrap();
        let cache = json_cache(temp_dir.path(), Arc::new(ManualClock::starting_now()));

        cache.put("q", repos(&["x"]));
        assert!(cache.remove("q"));
        assert!(!cache.remove("q"));
        assert!(cache.get("q").into_option().is_none());
    }

    #[test]
    fn test_invalidate_all() {
        let temp_dir = TempDir::new().unwrap();
        let cache = json_cache(temp_dir.path(), Arc::new(ManualClock::starting_now()));

        cache.put("a", repos(&["1"]));
        cache.put("b", repos(&["2"]));

        assert_eq!(cache.invalidate_all(), 2);
        assert!(cache.get("a").into_option().is_none());
        assert!(cache.get("b").into_option().is_none());
        assert_eq!(cache.invalidate_all(), 0);
    }

    #[test]
    fn test_invalidate_expired_is_selective() {
        let temp_dir = TempDir::new().unwrap();
        let clock = Arc::new(ManualClock::starting_now());
        let cache = json_cache(temp_dir.path(), clock.clone());

        cache.put("old", repos(&["1"]));
        clock.advance(Duration::from_secs(1800));
        cache.put("new", repos(&["2"]));
        clock.advance(Duration::from_secs(1800));

        // old is exactly one TTL old, new is half
        assert_eq!(cache.invalidate_expired(), 1);
        assert!(!cache.storage_path("old").exists());
        assert_eq!(cache.get("new").into_option(), Some(repos(&["2"])));
    }

    #[test]
    fn test_invalidate_expired_removes_corrupt_files() {
        let temp_dir = TempDir::new().unwrap();
        let cache = json_cache(temp_dir.path(), Arc::new(ManualClock::starting_now()));

        fs::write(cache.storage_path("junk"), b"not json").unwrap();
        assert_eq!(cache.invalidate_expired(), 1);
        assert_eq!(cache.statistics().entry_count, 0);
    }

    #[test]
    fn test_construction_sweeps_expired() {
        let temp_dir = TempDir::new().unwrap();
        let clock = Arc::new(ManualClock::starting_now());

        {
            let cache = json_cache(temp_dir.path(), clock.clone());
            cache.put("stale", repos(&["1"]));
        }
        clock.advance(HOUR * 2);

        let reopened = json_cache(temp_dir.path(), clock);
        assert_eq!(reopened.statistics().entry_count, 0);
    }

    #[test]
    fn test_statistics_counts_disk_entries() {
        let temp_dir = TempDir::new().unwrap();
        let cache = json_cache(temp_dir.path(), Arc::new(ManualClock::starting_now()));

        cache.put("a", repos(&["1"]));
        cache.put("b", repos(&["2"]));
        cache.get("a");
        cache.get("missing");

        let stats = cache.statistics();
        assert_eq!(stats.entry_count, 2);
        assert!(stats.total_size > 0);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.memory_entries, 0);
    }

    #[test]
    fn test_statistics_missing_directory_is_zero() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("responses");
        let cache = json_cache(&dir, Arc::new(ManualClock::starting_now()));

        fs::remove_dir_all(&dir).unwrap();
        let stats = cache.statistics();
        assert_eq!(stats.entry_count, 0);
        assert_eq!(stats.total_size, 0);
        assert_eq!(cache.invalidate_all(), 0);
    }

    #[test]
    fn test_write_failure_is_degraded() {
        let temp_dir = TempDir::new().unwrap();
        // a regular file where the cache directory should be
        let blocker = temp_dir.path().join("responses");
        fs::write(&blocker, b"").unwrap();
        let cache = json_cache(&blocker, Arc::new(ManualClock::starting_now()));

        let status = cache.put("q", repos(&["x"]));
        assert!(matches!(status, WriteStatus::Degraded(_)));
        assert!(cache.get("q").into_option().is_none());
    }

    #[test]
    fn test_memory_tier_promotion() {
        let temp_dir = TempDir::new().unwrap();
        let clock = Arc::new(ManualClock::starting_now());
        let mut s = settings(temp_dir.path(), HOUR);
        s.memory = Some(MemoryLimits {
            max_entries: 10,
            max_bytes: 1024,
        });

        // populate disk through a disk-only instance, as after a restart
        json_cache(temp_dir.path(), clock.clone()).put("q", repos(&["x"]));

        let cache: Cache<JsonCodec<Vec<String>>> = Cache::new(s, JsonCodec::new(), clock);
        assert_eq!(cache.statistics().memory_entries, 0);

        assert!(cache.get("q").is_hit());
        assert_eq!(cache.statistics().memory_entries, 1);

        // served from memory once the file is gone
        fs::remove_file(cache.storage_path("q")).unwrap();
        assert_eq!(cache.get("q").into_option(), Some(repos(&["x"])));
    }

    #[test]
    fn test_unreadable_memory_entry_is_degraded() {
        let temp_dir = TempDir::new().unwrap();
        let clock = Arc::new(ManualClock::starting_now());
        let mut s = settings(temp_dir.path(), HOUR);
        s.memory = Some(MemoryLimits {
            max_entries: 10,
            max_bytes: 1024,
        });
        let cache: Cache<JsonCodec<Vec<String>>> = Cache::new(s, JsonCodec::new(), clock.clone());

        let memory = cache.memory.as_ref().unwrap();
        memory.write(&cache.key_for("q"), b"garbage", clock.now()).unwrap();

        assert!(cache.get("q").is_degraded());
        let stats = cache.statistics();
        assert_eq!(stats.degraded, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.memory_entries, 0);

        // the disk tier still answers when it has the entry
        cache.put("q", repos(&["x"]));
        memory.write(&cache.key_for("q"), b"garbage", clock.now()).unwrap();
        assert_eq!(cache.get("q").into_option(), Some(repos(&["x"])));
        assert_eq!(cache.statistics().degraded, 2);
    }

    fn image_cache(dir: &Path, clock: Arc<ManualClock>) -> Cache<RawBytesCodec> {
        let mut s = settings(dir, HOUR);
        s.memory = Some(MemoryLimits {
            max_entries: 10,
            max_bytes: 1024,
        });
        s.write_mode = WriteMode::Behind;
        Cache::new(s, RawBytesCodec, clock)
    }

    #[tokio::test]
    async fn test_remove_discards_queued_write() {
        let temp_dir = TempDir::new().unwrap();
        let cache = image_cache(temp_dir.path(), Arc::new(ManualClock::starting_now()));

        cache.put("u", vec![1, 2, 3]);
        assert!(cache.remove("u"));
        cache.flush().await;

        assert!(matches!(cache.get("u"), Lookup::Miss));
        assert!(!cache.storage_path("u").exists());

        // later writes for the same key are kept
        cache.put("u", vec![4]);
        cache.flush().await;
        assert!(cache.storage_path("u").exists());
        assert_eq!(cache.get("u").into_option(), Some(vec![4]));
    }

    #[tokio::test]
    async fn test_empty_image_is_refused() {
        let temp_dir = TempDir::new().unwrap();
        let cache = image_cache(temp_dir.path(), Arc::new(ManualClock::starting_now()));

        let status = cache.put("e", Vec::new());
        cache.flush().await;

        assert!(matches!(status, WriteStatus::Degraded(CacheError::Serialization(_))));
        assert!(matches!(cache.get("e"), Lookup::Miss));
        assert!(!cache.storage_path("e").exists());
        assert_eq!(cache.statistics().memory_entries, 0);
    }

    #[tokio::test]
    async fn test_sweep_judges_images_by_file_time() {
        let temp_dir = TempDir::new().unwrap();
        let clock = Arc::new(ManualClock::starting_now());
        let cache = image_cache(temp_dir.path(), clock.clone());

        cache.put("old", vec![1]);
        clock.advance(Duration::from_secs(1800));
        cache.put("new", vec![2]);
        cache.flush().await;
        fs::write(cache.storage_path("torn"), b"").unwrap();
        clock.advance(Duration::from_secs(1800));

        assert_eq!(cache.invalidate_expired(), 2);
        assert!(!cache.storage_path("old").exists());
        assert!(!cache.storage_path("torn").exists());
        assert_eq!(cache.get("new").into_option(), Some(vec![2]));
    }
}
