//! Product Cache Service
//!
//! Cache-aside orchestration over a [`crate::store::ProductStore`] and a
//! [`crate::cache::CacheStore`]. This is the only component that touches both.

mod cache_aside;
mod stats;

#[cfg(test)]
mod property_tests;

pub use cache_aside::{CacheSettings, ProductCacheService, ReadSource};
pub use stats::{ServiceStats, StatsSnapshot};
