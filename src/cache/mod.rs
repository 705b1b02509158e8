//! Cache Module
//!
//! The Cache Store capability: a best-effort, TTL-bounded key-value store.
//! Every operation is bounded by a short timeout and reports failure as a
//! value ([`CacheLookup::Unavailable`], [`CacheWrite::Unavailable`]) rather
//! than an error, so callers can degrade without error plumbing.

mod entry;
mod lru;
mod memory;
mod remote;
mod ttl_map;

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

// Re-export public types
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use memory::MemoryCache;
pub use remote::RedisCache;
pub use ttl_map::TtlMap;

/// Longest entry lifetime any backend accepts. Longer TTLs are clamped.
pub const MAX_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

// == Outcomes ==
/// Result of a cache read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup {
    /// Key present and unexpired
    Hit(String),
    /// Key absent or expired
    Miss,
    /// Transport failure, timeout or cache switched off
    Unavailable,
}

/// Result of a cache write or delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheWrite {
    /// The cache accepted the command (deleting an absent key counts)
    Applied,
    Unavailable,
}

// == Cache Store ==
/// Capability boundary for the fast-path cache. Implementations hold no
/// business logic and must never block past their configured timeout.
#[async_trait]
pub trait CacheStore: Send + Sync + 'static {
    async fn get(&self, key: &str) -> CacheLookup;

    async fn set(&self, key: &str, value: String, ttl: Duration) -> CacheWrite;

    async fn delete(&self, key: &str) -> CacheWrite;

    /// Reports whether the cache currently answers.
    async fn ping(&self) -> bool;

    /// Entries dropped to make room, for backends that count them.
    async fn evictions(&self) -> Option<u64> {
        None
    }

    /// Releases connections. Later calls report `Unavailable`.
    async fn close(&self) {}
}

/// Runs `fut` with an upper bound of `limit`. `None` means the deadline passed.
pub async fn bounded<T, F>(limit: Duration, op: &'static str, fut: F) -> Option<T>
where
    F: Future<Output = T>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(op, timeout_ms = limit.as_millis() as u64, "cache call timed out");
            None
        }
    }
}
