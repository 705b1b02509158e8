//! Configuration Module
//!
//! Loads the service configuration from environment variables and validates
//! it once at startup.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use tracing::warn;

use crate::cache::MAX_TTL;

// == Cache Backend Kind ==
/// Which Cache Store implementation backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackendKind {
    /// In-process TTL + LRU map
    Memory,
    /// Remote Redis server
    Redis,
}

impl FromStr for CacheBackendKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(CacheBackendKind::Memory),
            "redis" => Ok(CacheBackendKind::Redis),
            other => Err(format!("unknown cache backend '{other}'")),
        }
    }
}

// == Config Error ==
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("cache TTL must be greater than zero")]
    ZeroTtl,

    #[error("cache TTL ({ttl:?}) exceeds the maximum of {max:?}")]
    TtlTooLong { ttl: Duration, max: Duration },

    #[error("cache timeout must be greater than zero")]
    ZeroCacheTimeout,

    #[error("cache timeout ({cache:?}) must be shorter than store timeout ({store:?})")]
    CacheTimeoutTooLong { cache: Duration, store: Duration },

    #[error("cache key prefix cannot be empty")]
    EmptyKeyPrefix,

    #[error("cache max entries must be greater than zero")]
    ZeroMaxEntries,

    #[error("cleanup interval must be greater than zero")]
    ZeroCleanupInterval,
}

// == Config ==
/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// When false, reads go straight to the durable store
    pub cache_enabled: bool,
    /// Cache Store implementation
    pub cache_backend: CacheBackendKind,
    /// Redis connection URL, used when `cache_backend` is Redis
    pub redis_url: String,
    /// Prefix prepended to product identifiers to form cache keys
    pub cache_key_prefix: String,
    /// Lifetime of a cache entry
    pub cache_ttl: Duration,
    /// Upper bound on any single cache call
    pub cache_timeout: Duration,
    /// Upper bound on any single durable store call
    pub store_timeout: Duration,
    /// Capacity of the in-memory cache
    pub cache_max_entries: usize,
    /// In-memory cache sweep interval in seconds
    pub cleanup_interval: u64,
    /// sled database path; `None` keeps products in memory
    pub database_path: Option<PathBuf>,
    /// Insert sample products into an empty store at startup
    pub seed_data: bool,
}

impl Config {
    pub const DEFAULT_SERVER_PORT: u16 = 8080;
    pub const DEFAULT_REDIS_URL: &'static str = "redis://127.0.0.1:6379/0";
    pub const DEFAULT_KEY_PREFIX: &'static str = "product:";
    pub const DEFAULT_TTL_SECS: u64 = 3600;
    pub const DEFAULT_CACHE_TIMEOUT_MS: u64 = 250;
    pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 5000;
    pub const DEFAULT_MAX_ENTRIES: usize = 10_000;
    pub const DEFAULT_CLEANUP_INTERVAL: u64 = 1;

    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `CACHE_ENABLED` - Use the cache at all (default: true)
    /// - `CACHE_BACKEND` - `memory` or `redis` (default: memory)
    /// - `REDIS_URL` - Redis URL (default: redis://127.0.0.1:6379/0)
    /// - `CACHE_KEY_PREFIX` - Cache key prefix (default: `product:`)
    /// - `CACHE_TTL_SECONDS` - Entry lifetime (default: 3600)
    /// - `CACHE_TIMEOUT_MS` - Per-call cache timeout (default: 250)
    /// - `STORE_TIMEOUT_MS` - Per-call store timeout (default: 5000)
    /// - `CACHE_MAX_ENTRIES` - In-memory cache capacity (default: 10000)
    /// - `CLEANUP_INTERVAL` - In-memory sweep frequency in seconds (default: 1)
    /// - `DATABASE_PATH` - sled directory; unset means in-memory store
    /// - `SEED_DATA` - Seed sample products into an empty store (default: true)
    pub fn from_env() -> Self {
        Self {
            server_port: parse_var("SERVER_PORT", Self::DEFAULT_SERVER_PORT),
            cache_enabled: parse_flag("CACHE_ENABLED", true),
            cache_backend: parse_var("CACHE_BACKEND", CacheBackendKind::Memory),
            redis_url: env::var("REDIS_URL").unwrap_or_else(|_| Self::DEFAULT_REDIS_URL.into()),
            cache_key_prefix: env::var("CACHE_KEY_PREFIX")
                .unwrap_or_else(|_| Self::DEFAULT_KEY_PREFIX.into()),
            cache_ttl: Duration::from_secs(parse_var("CACHE_TTL_SECONDS", Self::DEFAULT_TTL_SECS)),
            cache_timeout: Duration::from_millis(parse_var(
                "CACHE_TIMEOUT_MS",
                Self::DEFAULT_CACHE_TIMEOUT_MS,
            )),
            store_timeout: Duration::from_millis(parse_var(
                "STORE_TIMEOUT_MS",
                Self::DEFAULT_STORE_TIMEOUT_MS,
            )),
            cache_max_entries: parse_var("CACHE_MAX_ENTRIES", Self::DEFAULT_MAX_ENTRIES),
            cleanup_interval: parse_var("CLEANUP_INTERVAL", Self::DEFAULT_CLEANUP_INTERVAL),
            database_path: env::var("DATABASE_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            seed_data: parse_flag("SEED_DATA", true),
        }
    }

    /// Checks cross-field constraints. Called once at startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_ttl.is_zero() {
            return Err(ConfigError::ZeroTtl);
        }
        if self.cache_ttl > MAX_TTL {
            return Err(ConfigError::TtlTooLong {
                ttl: self.cache_ttl,
                max: MAX_TTL,
            });
        }
        if self.cache_timeout.is_zero() {
            return Err(ConfigError::ZeroCacheTimeout);
        }
        if self.cache_timeout >= self.store_timeout {
            return Err(ConfigError::CacheTimeoutTooLong {
                cache: self.cache_timeout,
                store: self.store_timeout,
            });
        }
        if self.cache_key_prefix.is_empty() {
            return Err(ConfigError::EmptyKeyPrefix);
        }
        if self.cache_max_entries == 0 {
            return Err(ConfigError::ZeroMaxEntries);
        }
        if self.cleanup_interval == 0 {
            return Err(ConfigError::ZeroCleanupInterval);
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: Self::DEFAULT_SERVER_PORT,
            cache_enabled: true,
            cache_backend: CacheBackendKind::Memory,
            redis_url: Self::DEFAULT_REDIS_URL.to_string(),
            cache_key_prefix: Self::DEFAULT_KEY_PREFIX.to_string(),
            cache_ttl: Duration::from_secs(Self::DEFAULT_TTL_SECS),
            cache_timeout: Duration::from_millis(Self::DEFAULT_CACHE_TIMEOUT_MS),
            store_timeout: Duration::from_millis(Self::DEFAULT_STORE_TIMEOUT_MS),
            cache_max_entries: Self::DEFAULT_MAX_ENTRIES,
            cleanup_interval: Self::DEFAULT_CLEANUP_INTERVAL,
            database_path: None,
            seed_data: true,
        }
    }
}

// == Env Helpers ==
fn parse_var<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("Ignoring unparseable value '{}' for {}", raw, name);
            default
        }),
        Err(_) => default,
    }
}

fn parse_flag(name: &str, default: bool) -> bool {
    match env::var(name) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => {
                warn!("Ignoring unparseable flag '{}' for {}", raw, name);
                default
            }
        },
        Err(_) => default,
    }
}
