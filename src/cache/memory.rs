//! In-process Cache Store backed by [`TtlMap`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{bounded, CacheLookup, CacheStore, CacheWrite, TtlMap};

/// Cloneable handle to a shared in-memory cache.
///
/// `set_available(false)` makes every call report `Unavailable`, which is how
/// tests and the health endpoint exercise the degraded path.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    map: Arc<RwLock<TtlMap>>,
    available: Arc<AtomicBool>,
    timeout: Duration,
}

impl MemoryCache {
    pub fn new(max_entries: usize, timeout: Duration) -> Self {
        Self {
            map: Arc::new(RwLock::new(TtlMap::new(max_entries))),
            available: Arc::new(AtomicBool::new(true)),
            timeout,
        }
    }

    /// Simulates the cache going down (`false`) or coming back (`true`).
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    /// Drops every expired entry. Used by the background sweep.
    pub async fn cleanup_expired(&self) -> usize {
        self.map.write().await.cleanup_expired()
    }

    pub async fn len(&self) -> usize {
        self.map.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.map.read().await.is_empty()
    }

    /// Entries dropped by LRU eviction since creation.
    pub async fn evictions(&self) -> u64 {
        self.map.read().await.evictions()
    }

    /// Whether `key` holds an unexpired entry, bypassing availability.
    pub async fn contains(&self, key: &str) -> bool {
        self.map.write().await.get(key).is_some()
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> CacheLookup {
        if !self.is_available() {
            return CacheLookup::Unavailable;
        }
        let value = bounded(self.timeout, "get", async {
            self.map.write().await.get(key)
        })
        .await;

        match value {
            Some(Some(value)) => CacheLookup::Hit(value),
            Some(None) => CacheLookup::Miss,
            None => CacheLookup::Unavailable,
        }
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> CacheWrite {
        if !self.is_available() {
            return CacheWrite::Unavailable;
        }
        let done = bounded(self.timeout, "set", async {
            self.map.write().await.set(key, value, ttl)
        })
        .await;

        match done {
            Some(()) => CacheWrite::Applied,
            None => CacheWrite::Unavailable,
        }
    }

    async fn delete(&self, key: &str) -> CacheWrite {
        if !self.is_available() {
            return CacheWrite::Unavailable;
        }
        match bounded(self.timeout, "delete", async { self.map.write().await.remove(key) }).await {
            Some(removed) => {
                debug!(key, removed, "memory cache delete");
                CacheWrite::Applied
            }
            None => CacheWrite::Unavailable,
        }
    }

    async fn ping(&self) -> bool {
        self.is_available()
    }

    async fn evictions(&self) -> Option<u64> {
        Some(MemoryCache::evictions(self).await)
    }
}
