//! TTL Cleanup Task
//!
//! Background task that periodically removes expired entries from the
//! in-memory cache. Expired entries already read as misses; the sweep only
//! reclaims their memory.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::MemoryCache;

/// Spawns a background task that sweeps `cache` every `cleanup_interval_secs`.
///
/// Returns a JoinHandle so the task can be aborted during graceful shutdown.
pub fn spawn_cleanup_task(cache: MemoryCache, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting TTL cleanup task with interval of {} seconds",
            cleanup_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.cleanup_expired().await;
            if removed > 0 {
                info!("TTL cleanup: removed {} expired entries", removed);
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }
    })
}
