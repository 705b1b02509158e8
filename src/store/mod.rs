//! Durable Store Module
//!
//! The authoritative product storage. Unlike the cache, every failure here is
//! fatal for the request and travels back to the caller unchanged.

mod memory;
mod seed;
mod sled_store;

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::models::{NewProduct, Product, ProductChanges};

pub use memory::MemoryStore;
pub use seed::{sample_products, seed_if_empty};
pub use sled_store::SledStore;

/// Port for product persistence.
#[async_trait]
pub trait ProductStore: Send + Sync + 'static {
    /// Persists a new product under a freshly generated identifier.
    async fn create(&self, new: NewProduct) -> StoreResult<Product>;

    /// `Ok(None)` when no product has this identifier.
    async fn get(&self, id: &str) -> StoreResult<Option<Product>>;

    /// Applies the present fields of `changes`; `Ok(None)` when absent.
    async fn update(&self, id: &str, changes: ProductChanges) -> StoreResult<Option<Product>>;

    /// `Ok(false)` when absent.
    async fn delete(&self, id: &str) -> StoreResult<bool>;

    async fn count(&self) -> StoreResult<usize>;

    /// Flushes pending writes. The store should not be used afterwards.
    async fn close(&self) -> StoreResult<()> {
        Ok(())
    }
}

/// Generates a new product identifier.
pub fn new_product_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
