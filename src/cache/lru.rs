//! LRU Tracker Module
//!
//! Implements Least Recently Used tracking for memory tier eviction.

use std::collections::VecDeque;

use crate::cache::CacheKey;

// == LRU Tracker ==
/// Tracks access order for LRU eviction strategy.
///
/// Keys are stored in a VecDeque where:
/// - Front = Most recently used
/// - Back = Least recently used
///
/// `touch` and `remove` scan the whole deque, so every memory-tier read costs
/// O(n) under the tier's lock. Fine for the hundred or so images the memory
/// tier holds; a linked hash map would be needed for much larger limits.
#[derive(Debug, Default)]
pub struct LruTracker {
    /// Order of keys by access time
    order: VecDeque<CacheKey>,
}

impl LruTracker {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Touch ==
    /// Marks a key as recently used (moves to front).
    pub fn touch(&mut self, key: &CacheKey) {
        self.remove(key);
        self.order.push_front(key.clone());
    }

    // == Remove ==
    /// Removes a key from the tracker.
    pub fn remove(&mut self, key: &CacheKey) {
        self.order.retain(|k| k != key);
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<CacheKey> {
        self.order.pop_back()
    }

    pub fn clear(&mut self) {
        self.order.clear();
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Checks if a key is being tracked.
    #[cfg(test)]
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.order.iter().any(|k| k == key)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn key(name: &str) -> CacheKey {
        CacheKey::from_file_name(name)
    }

    #[test]
    fn test_lru_new() {
        let lru = LruTracker::new();
        assert!(lru.is_empty());
        assert_eq!(lru.len(), 0);
    }

    #[test]
    fn test_lru_evict_in_insertion_order() {
        let mut lru = LruTracker::new();

        lru.touch(&key("a.jpg"));
        lru.touch(&key("b.jpg"));
        lru.touch(&key("c.jpg"));

        assert_eq!(lru.evict_oldest(), Some(key("a.jpg")));
        assert_eq!(lru.evict_oldest(), Some(key("b.jpg")));
        assert_eq!(lru.len(), 1);
    }

    #[test]
    fn test_lru_touch_moves_to_front() {
        let mut lru = LruTracker::new();

        lru.touch(&key("a.jpg"));
        lru.touch(&key("b.jpg"));
        lru.touch(&key("c.jpg"));

        // a is now most recent
        lru.touch(&key("a.jpg"));

        assert_eq!(lru.evict_oldest(), Some(key("b.jpg")));
        assert_eq!(lru.evict_oldest(), Some(key("c.jpg")));
        assert_eq!(lru.evict_oldest(), Some(key("a.jpg")));
        assert_eq!(lru.evict_oldest(), None);
    }

    #[test]
    fn test_lru_touch_same_key_multiple_times() {
        let mut lru = LruTracker::new();

        lru.touch(&key("a.jpg"));
        lru.touch(&key("a.jpg"));
        lru.touch(&key("a.jpg"));

        assert_eq!(lru.len(), 1);
    }

    #[test]
    fn test_lru_remove_and_clear() {
        let mut lru = LruTracker::new();

        lru.touch(&key("a.jpg"));
        lru.touch(&key("b.jpg"));
        lru.remove(&key("a.jpg"));
        lru.remove(&key("missing.jpg"));

        assert!(!lru.contains(&key("a.jpg")));
        assert!(lru.contains(&key("b.jpg")));

        lru.clear();
        assert!(lru.is_empty());
    }
}
