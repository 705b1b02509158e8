//! TTL Map Module
//!
//! Synchronous core of the in-memory cache: a HashMap of expiring snapshots
//! bounded by LRU eviction.

use std::collections::HashMap;
use std::time::Duration;

use super::{CacheEntry, LruTracker};

// == TTL Map ==
#[derive(Debug)]
pub struct TtlMap {
    entries: HashMap<String, CacheEntry>,
    lru: LruTracker,
    max_entries: usize,
    evictions: u64,
}

impl TtlMap {
    /// Creates an empty map holding at most `max_entries` keys.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            max_entries: max_entries.max(1),
            evictions: 0,
        }
    }

    // == Set ==
    /// Stores a complete snapshot, replacing any previous one and resetting
    /// its TTL. Evicts the least recently used key when full.
    pub fn set(&mut self, key: &str, value: String, ttl: Duration) {
        if !self.entries.contains_key(key) && self.entries.len() >= self.max_entries {
            if let Some(evicted) = self.lru.evict_oldest() {
                self.entries.remove(&evicted);
                self.evictions += 1;
            }
        }

        self.entries
            .insert(key.to_string(), CacheEntry::new(value, ttl));
        self.lru.touch(key);
    }

    // == Get ==
    /// Returns the snapshot if present and unexpired. Expired entries are
    /// dropped on access.
    pub fn get(&mut self, key: &str) -> Option<String> {
        let expired = self.entries.get(key)?.is_expired();
        if expired {
            self.remove(key);
            return None;
        }

        self.lru.touch(key);
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Delete ==
    /// Removes a key. Returns whether it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        self.lru.remove(key);
        self.entries.remove(key).is_some()
    }

    // == Cleanup Expired ==
    /// Removes all expired entries and returns how many were dropped.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.remove(key);
        }
        expired.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn evictions(&self) -> u64 {
        self.evictions
    }
}
