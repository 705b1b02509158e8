use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::cache::{CacheLookup, CacheStore, CacheWrite};
use crate::config::Config;
use crate::error::{ServiceError, ServiceResult, StoreError, StoreResult};
use crate::models::{NewProduct, Product, ProductChanges};
use crate::store::ProductStore;

use super::{ServiceStats, StatsSnapshot};

// == Cache Settings ==
/// The part of [`Config`] the orchestration layer consumes.
#[derive(Debug, Clone)]
pub struct CacheSettings {
    /// When false, reads go straight to the store and writes skip invalidation
    pub enabled: bool,
    pub key_prefix: String,
    pub ttl: Duration,
    /// Upper bound on each store call
    pub store_timeout: Duration,
}

impl CacheSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            enabled: config.cache_enabled,
            key_prefix: config.cache_key_prefix.clone(),
            ttl: config.cache_ttl,
            store_timeout: config.store_timeout,
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Where a successful read was answered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadSource {
    Cache,
    Store,
}

// == Product Cache Service ==
/// Cache-aside read path with invalidate-on-write.
///
/// - Reads try the cache first. A miss, an undecodable entry or an
///   unavailable cache falls through to the store; a store hit is written
///   back with the configured TTL. Absence is only ever decided by the store.
/// - Creates go to the store only. The cache is filled lazily by reads.
/// - Updates and deletes commit to the store first, then delete the cache
///   entry. The entry is never rewritten in place.
///
/// Cache failures are absorbed and logged. Store failures, including store
/// timeouts, are returned unchanged.
///
/// The service holds no locks. A read that misses, loads the old record and
/// then fills the cache can land its fill after a concurrent write has
/// invalidated the key, leaving the old snapshot cached until the next
/// invalidation or TTL expiry. Staleness is therefore bounded by the TTL.
pub struct ProductCacheService {
    store: Arc<dyn ProductStore>,
    cache: Arc<dyn CacheStore>,
    settings: CacheSettings,
    stats: ServiceStats,
}

impl ProductCacheService {
    pub fn new(
        store: Arc<dyn ProductStore>,
        cache: Arc<dyn CacheStore>,
        settings: CacheSettings,
    ) -> Self {
        Self {
            store,
            cache,
            settings,
            stats: ServiceStats::new(),
        }
    }

    /// Cache key for a product identifier, e.g. `product:<id>`.
    pub fn cache_key(&self, id: &str) -> String {
        format!("{}{}", self.settings.key_prefix, id)
    }

    pub fn settings(&self) -> &CacheSettings {
        &self.settings
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Evictions reported by the cache backend, if it counts them.
    pub async fn cache_evictions(&self) -> Option<u64> {
        self.cache.evictions().await
    }

    // == Read ==
    pub async fn read(&self, id: &str) -> ServiceResult<Product> {
        self.read_traced(id).await.map(|(product, _)| product)
    }

    /// Like [`Self::read`], also reporting whether the cache answered.
    pub async fn read_traced(&self, id: &str) -> ServiceResult<(Product, ReadSource)> {
        let key = self.cache_key(id);

        if self.settings.enabled {
            if let Some(product) = self.lookup(id, &key).await {
                return Ok((product, ReadSource::Cache));
            }
        }

        self.stats.record_store_read();
        let product = self
            .with_store_timeout(self.store.get(id))
            .await?
            .ok_or_else(|| {
                info!(product_id = %id, "Product not found in store");
                ServiceError::NotFound(id.to_string())
            })?;

        if self.settings.enabled {
            self.fill(&key, &product).await;
        }

        Ok((product, ReadSource::Store))
    }

    // == Create ==
    pub async fn create(&self, new: NewProduct) -> ServiceResult<Product> {
        let product = self.with_store_timeout(self.store.create(new)).await?;
        info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    // == Update ==
    pub async fn update(&self, id: &str, changes: ProductChanges) -> ServiceResult<Product> {
        let Some(product) = self
            .with_store_timeout(self.store.update(id, changes))
            .await?
        else {
            info!(product_id = %id, "Product not found for update");
            return Err(ServiceError::NotFound(id.to_string()));
        };

        self.invalidate(id).await;
        info!(product_id = %id, "Updated product");
        Ok(product)
    }

    // == Delete ==
    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        if !self.with_store_timeout(self.store.delete(id)).await? {
            info!(product_id = %id, "Product not found for deletion");
            return Err(ServiceError::NotFound(id.to_string()));
        }

        self.invalidate(id).await;
        info!(product_id = %id, "Deleted product");
        Ok(())
    }

    // == Health ==
    /// "disabled", "connected" or "disconnected".
    pub async fn cache_status(&self) -> &'static str {
        if !self.settings.enabled {
            "disabled"
        } else if self.cache.ping().await {
            "connected"
        } else {
            "disconnected"
        }
    }

    /// Releases the cache, then flushes the store.
    pub async fn close(&self) -> StoreResult<()> {
        self.cache.close().await;
        self.store.close().await
    }

    // == Internals ==
    async fn lookup(&self, id: &str, key: &str) -> Option<Product> {
        match self.cache.get(key).await {
            CacheLookup::Hit(raw) => match serde_json::from_str::<Product>(&raw) {
                Ok(product) => {
                    self.stats.record_hit();
                    debug!(product_id = %id, "Cache HIT");
                    Some(product)
                }
                Err(e) => {
                    self.stats.record_miss();
                    warn!(product_id = %id, error = %e, "Undecodable cache entry, reading from store");
                    None
                }
            },
            CacheLookup::Miss => {
                self.stats.record_miss();
                debug!(product_id = %id, "Cache MISS");
                None
            }
            CacheLookup::Unavailable => {
                self.stats.record_miss();
                self.stats.record_unavailable();
                warn!(product_id = %id, "Cache unavailable, reading from store");
                None
            }
        }
    }

    async fn fill(&self, key: &str, product: &Product) {
        let encoded = match serde_json::to_string(product) {
            Ok(encoded) => encoded,
            Err(e) => {
                self.stats.record_skipped_write();
                warn!(product_id = %product.id, error = %e, "Could not encode product for cache");
                return;
            }
        };

        match self.cache.set(key, encoded, self.settings.ttl).await {
            CacheWrite::Applied => {
                self.stats.record_fill();
                debug!(
                    product_id = %product.id,
                    ttl_secs = self.settings.ttl.as_secs(),
                    "Cached product"
                );
            }
            CacheWrite::Unavailable => {
                self.stats.record_skipped_write();
                warn!(product_id = %product.id, "Cache unavailable, skipping fill");
            }
        }
    }

    /// Must only run after the store write has committed.
    async fn invalidate(&self, id: &str) {
        if !self.settings.enabled {
            return;
        }

        match self.cache.delete(&self.cache_key(id)).await {
            CacheWrite::Applied => {
                self.stats.record_invalidation();
                debug!(product_id = %id, "Invalidated cache entry");
            }
            CacheWrite::Unavailable => {
                self.stats.record_skipped_write();
                warn!(
                    product_id = %id,
                    "Cache unavailable, entry not invalidated; it expires with its TTL"
                );
            }
        }
    }

    async fn with_store_timeout<T, F>(&self, fut: F) -> StoreResult<T>
    where
        F: Future<Output = StoreResult<T>>,
    {
        let limit = self.settings.store_timeout;
        let result = match tokio::time::timeout(limit, fut).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout(limit)),
        };
        if let Err(e) = &result {
            error!(error = %e, "Store operation failed");
        }
        result
    }
}
