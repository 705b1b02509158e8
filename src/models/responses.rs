//! Response DTOs for the product API
//!
//! Defines the structure of outgoing HTTP response bodies. Product bodies are
//! the [`crate::models::Product`] itself.

use serde::Serialize;

use crate::service::StatsSnapshot;

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Reads answered from the cache
    pub hits: u64,
    /// Cache lookups that fell through to the store
    pub misses: u64,
    /// Reads answered by the durable store
    pub store_reads: u64,
    /// Cache calls that failed or timed out
    pub cache_unavailable: u64,
    /// Cache entries populated by miss reads
    pub fills: u64,
    /// Cache entries removed after writes
    pub invalidations: u64,
    /// Fills and invalidations dropped because the cache was unavailable
    pub skipped_writes: u64,
    /// hits / (hits + misses)
    pub hit_rate: f64,
    /// Whether the service consults the cache at all
    pub cache_enabled: bool,
    /// LRU evictions, for cache backends that count them
    pub cache_evictions: Option<u64>,
}

impl StatsResponse {
    /// Creates a new StatsResponse from a service snapshot
    pub fn new(
        snapshot: StatsSnapshot,
        cache_enabled: bool,
        cache_evictions: Option<u64>,
    ) -> Self {
        Self {
            hits: snapshot.hits,
            misses: snapshot.misses,
            store_reads: snapshot.store_reads,
            cache_unavailable: snapshot.cache_unavailable,
            fills: snapshot.fills,
            invalidations: snapshot.invalidations,
            skipped_writes: snapshot.skipped_writes,
            hit_rate: snapshot.hit_rate(),
            cache_enabled,
            cache_evictions,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status, always "healthy" while the API answers
    pub status: String,
    pub api: String,
    /// "connected", "disconnected" or "disabled"
    pub cache: String,
    /// Reads keep working through the store when the cache is down
    pub cache_fallback: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(cache: impl Into<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            api: "operational".to_string(),
            cache: cache.into(),
            cache_fallback: "enabled".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
