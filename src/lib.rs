//! Product Cache - a product catalog API with a cache-aside layer
//!
//! Reads go through a best-effort TTL cache in front of an authoritative
//! store; writes go to the store and invalidate the cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use service::ProductCacheService;
pub use tasks::spawn_cleanup_task;
