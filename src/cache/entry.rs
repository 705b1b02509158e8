//! Cache Entry Module
//!
//! A complete serialized snapshot plus its expiry. Entries are replaced
//! whole, never patched.

use std::time::{Duration, Instant};

use super::MAX_TTL;

// == Cache Entry ==
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored snapshot
    pub value: String,
    /// Instant after which the entry reads as absent
    pub expires_at: Instant,
}

impl CacheEntry {
    /// Creates a new entry that expires `ttl` from now, clamped to [`MAX_TTL`].
    pub fn new(value: String, ttl: Duration) -> Self {
        Self::new_at(value, ttl, Instant::now())
    }

    fn new_at(value: String, ttl: Duration, now: Instant) -> Self {
        let ttl = ttl.min(MAX_TTL);
        let expires_at = now.checked_add(ttl).unwrap_or(now);
        Self { value, expires_at }
    }

    // == Is Expired ==
    /// An entry is expired once the current time reaches its expiry instant,
    /// so a fully elapsed TTL never serves a read.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}
