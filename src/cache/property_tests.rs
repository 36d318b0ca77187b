//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the cache contract over generated identifiers,
//! values and operation sequences.

use proptest::prelude::*;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

use crate::cache::{
    Cache, CacheKey, CacheSettings, JsonCodec, Lookup, ManualClock, MemoryBackend, MemoryLimits,
    PayloadKind, StorageBackend, WriteMode,
};

// == Test Configuration ==
const TEST_TTL: Duration = Duration::from_secs(3600);

fn json_cache(dir: &Path, clock: Arc<ManualClock>, ttl: Duration) -> Cache<JsonCodec<Vec<String>>> {
    Cache::new(
        CacheSettings {
            name: "prop".to_string(),
            directory: dir.to_path_buf(),
            ttl,
            memory: None,
            write_mode: WriteMode::Through,
        },
        JsonCodec::new(),
        clock,
    )
}

// == Strategies ==
/// Identifiers as they show up in practice: queries, tags, URLs, and noise.
fn identifier_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9_]{1,64}",
        "[ -~]{1,200}",
        "https://avatars\\.githubusercontent\\.com/u/[0-9]{1,9}\\?v=[0-9]",
        any::<String>(),
    ]
}

fn value_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-zA-Z0-9/_-]{1,40}", 0..8)
}

#[derive(Debug, Clone)]
enum CacheOp {
    Put { id: String, value: Vec<String> },
    Get { id: String },
    Remove { id: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    // small identifier space so operations collide
    let id = "[a-e]";
    prop_oneof![
        (id, value_strategy()).prop_map(|(id, value)| CacheOp::Put { id, value }),
        id.prop_map(|id| CacheOp::Get { id }),
        id.prop_map(|id| CacheOp::Remove { id }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    // Storing a value and reading it back before expiry returns that value.
    #[test]
    fn prop_roundtrip_storage(id in identifier_strategy(), value in value_strategy()) {
        let temp_dir = TempDir::new().unwrap();
        let cache = json_cache(temp_dir.path(), Arc::new(ManualClock::starting_now()), TEST_TTL);

        prop_assert!(cache.put(&id, value.clone()).is_written());
        prop_assert_eq!(cache.get(&id).into_option(), Some(value));
    }

    // A second write under the same identifier supersedes the first.
    #[test]
    fn prop_overwrite_semantics(
        id in identifier_strategy(),
        first in value_strategy(),
        second in value_strategy()
    ) {
        let temp_dir = TempDir::new().unwrap();
        let cache = json_cache(temp_dir.path(), Arc::new(ManualClock::starting_now()), TEST_TTL);

        cache.put(&id, first);
        cache.put(&id, second.clone());

        prop_assert_eq!(cache.get(&id).into_option(), Some(second));
        prop_assert_eq!(cache.statistics().entry_count, 1);
    }

    // Entries are fresh strictly before the TTL and gone from the TTL on.
    #[test]
    fn prop_ttl_boundary(
        id in identifier_strategy(),
        value in value_strategy(),
        ttl_secs in 2u64..100_000
    ) {
        let temp_dir = TempDir::new().unwrap();
        let clock = Arc::new(ManualClock::starting_now());
        let cache = json_cache(temp_dir.path(), clock.clone(), Duration::from_secs(ttl_secs));

        cache.put(&id, value.clone());

        clock.advance(Duration::from_secs(ttl_secs - 1));
        prop_assert_eq!(cache.get(&id).into_option(), Some(value));

        clock.advance(Duration::from_secs(1));
        prop_assert!(matches!(cache.get(&id), Lookup::Miss));
    }

    // Key derivation is a deterministic, filesystem-safe function of the identifier.
    #[test]
    fn prop_key_derivation(ids in prop::collection::hash_set(identifier_strategy(), 1..40)) {
        let mut keys = HashSet::new();
        for id in &ids {
            let key = CacheKey::derive(id, PayloadKind::Json);
            prop_assert_eq!(&key, &CacheKey::derive(id, PayloadKind::Json));
            prop_assert!(key
                .as_str()
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')));
            prop_assert!(key.as_str().len() <= 48 + 1 + 16 + ".json".len());
            keys.insert(key);
        }
        prop_assert_eq!(keys.len(), ids.len(), "distinct identifiers collided");
    }

    // Hit and miss counters match what callers observed.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..40)) {
        let temp_dir = TempDir::new().unwrap();
        let cache = json_cache(temp_dir.path(), Arc::new(ManualClock::starting_now()), TEST_TTL);
        let mut expected_hits = 0u64;
        let mut expected_misses = 0u64;
        let mut live = HashSet::new();

        for op in ops {
            match op {
                CacheOp::Put { id, value } => {
                    cache.put(&id, value);
                    live.insert(id);
                }
                CacheOp::Get { id } => {
                    if cache.get(&id).is_hit() {
                        expected_hits += 1;
                    } else {
                        expected_misses += 1;
                    }
                }
                CacheOp::Remove { id } => {
                    cache.remove(&id);
                    live.remove(&id);
                }
            }
        }

        let stats = cache.statistics();
        prop_assert_eq!(stats.hits, expected_hits);
        prop_assert_eq!(stats.misses, expected_misses);
        prop_assert_eq!(stats.entry_count, live.len());
    }

    // The memory tier never holds more than its ceilings allow.
    #[test]
    fn prop_memory_limits_enforced(
        sizes in prop::collection::vec(0usize..300, 1..120),
        max_entries in 1usize..20,
        max_bytes in 1u64..1000
    ) {
        let memory = MemoryBackend::new(MemoryLimits { max_entries, max_bytes });
        let now = chrono::Utc::now();

        for (i, size) in sizes.iter().enumerate() {
            let key = CacheKey::from_file_name(format!("{}.jpg", i % 30));
            prop_assert!(memory.write(&key, &vec![0u8; *size], now).is_ok());
            prop_assert!(memory.len() <= max_entries);
            prop_assert!(memory.total_bytes() <= max_bytes);
        }
    }
}
