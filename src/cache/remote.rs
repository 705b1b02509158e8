//! Redis-backed Cache Store.
//!
//! The pool connects lazily, so a Redis that is down at startup only puts the
//! service in degraded mode. Every command, including checking a connection
//! out of the pool, runs under the cache timeout.

use std::time::Duration;

use async_trait::async_trait;
use deadpool_redis::{Config as PoolConfig, CreatePoolError, Pool, Runtime};
use redis::AsyncCommands;
use tracing::{debug, warn};

use super::{bounded, CacheLookup, CacheStore, CacheWrite, MAX_TTL};

pub struct RedisCache {
    pool: Pool,
    timeout: Duration,
}

impl RedisCache {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, CreatePoolError> {
        let pool = PoolConfig::from_url(url).create_pool(Some(Runtime::Tokio1))?;
        Ok(Self { pool, timeout })
    }
}

/// Millisecond expiry for `SET PX`. Redis rejects zero, so sub-millisecond
/// TTLs round up to 1 ms.
fn ttl_millis(ttl: Duration) -> u64 {
    (ttl.min(MAX_TTL).as_millis() as u64).max(1)
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> CacheLookup {
        let result = bounded(self.timeout, "get", async {
            let mut conn = self.pool.get().await.map_err(|e| e.to_string())?;
            conn.get::<_, Option<String>>(key)
                .await
                .map_err(|e| e.to_string())
        })
        .await;

        match result {
            Some(Ok(Some(value))) => CacheLookup::Hit(value),
            Some(Ok(None)) => CacheLookup::Miss,
            Some(Err(e)) => {
                warn!(key, error = %e, "Redis GET error");
                CacheLookup::Unavailable
            }
            None => CacheLookup::Unavailable,
        }
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> CacheWrite {
        let ttl_ms = ttl_millis(ttl);
        let result = bounded(self.timeout, "set", async {
            let mut conn = self.pool.get().await.map_err(|e| e.to_string())?;
            conn.pset_ex::<_, _, ()>(key, value, ttl_ms)
                .await
                .map_err(|e| e.to_string())
        })
        .await;

        match result {
            Some(Ok(())) => {
                debug!(key, ttl_ms, "Redis SET PX");
                CacheWrite::Applied
            }
            Some(Err(e)) => {
                warn!(key, error = %e, "Redis SET error");
                CacheWrite::Unavailable
            }
            None => CacheWrite::Unavailable,
        }
    }

    async fn delete(&self, key: &str) -> CacheWrite {
        let result = bounded(self.timeout, "delete", async {
            let mut conn = self.pool.get().await.map_err(|e| e.to_string())?;
            conn.del::<_, i64>(key).await.map_err(|e| e.to_string())
        })
        .await;

        match result {
            Some(Ok(removed)) => {
                debug!(key, removed, "Redis DEL");
                CacheWrite::Applied
            }
            Some(Err(e)) => {
                warn!(key, error = %e, "Redis DEL error");
                CacheWrite::Unavailable
            }
            None => CacheWrite::Unavailable,
        }
    }

    async fn ping(&self) -> bool {
        let result = bounded(self.timeout, "ping", async {
            let mut conn = self.pool.get().await.map_err(|e| e.to_string())?;
            let pong: String = redis::cmd("PING")
                .query_async(&mut conn)
                .await
                .map_err(|e| e.to_string())?;
            Ok::<_, String>(pong)
        })
        .await;

        matches!(result, Some(Ok(_)))
    }

    async fn close(&self) {
        self.pool.close();
    }
}
