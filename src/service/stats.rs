//! Service Statistics Module
//!
//! Counters that make the cache path observable: hit vs miss, degraded cache
//! calls, fills and invalidations.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Service Stats ==
/// Lock-free counters updated by concurrent requests.
#[derive(Debug, Default)]
pub struct ServiceStats {
    hits: AtomicU64,
    misses: AtomicU64,
    store_reads: AtomicU64,
    cache_unavailable: AtomicU64,
    fills: AtomicU64,
    invalidations: AtomicU64,
    skipped_writes: AtomicU64,
}

impl ServiceStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_store_read(&self) {
        self.store_reads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_unavailable(&self) {
        self.cache_unavailable.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fill(&self) {
        self.fills.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_invalidation(&self) {
        self.invalidations.fetch_add(1, Ordering::Relaxed);
    }

    /// A cache set or delete that could not be applied.
    pub fn record_skipped_write(&self) {
        self.skipped_writes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            store_reads: self.store_reads.load(Ordering::Relaxed),
            cache_unavailable: self.cache_unavailable.load(Ordering::Relaxed),
            fills: self.fills.load(Ordering::Relaxed),
            invalidations: self.invalidations.load(Ordering::Relaxed),
            skipped_writes: self.skipped_writes.load(Ordering::Relaxed),
        }
    }
}

// == Stats Snapshot ==
/// Point-in-time copy of [`ServiceStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub hits: u64,
    /// Cache lookups that fell through to the store, including unavailable ones
    pub misses: u64,
    /// Reads that consulted the durable store
    pub store_reads: u64,
    pub cache_unavailable: u64,
    pub fills: u64,
    pub invalidations: u64,
    pub skipped_writes: u64,
}

impl StatsSnapshot {
    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
