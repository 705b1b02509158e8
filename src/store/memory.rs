//! Volatile product store, used for tests and ephemeral runs.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{new_product_id, ProductStore};
use crate::error::StoreResult;
use crate::models::{NewProduct, Product, ProductChanges};

#[derive(Debug, Default)]
pub struct MemoryStore {
    products: RwLock<HashMap<String, Product>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn create(&self, new: NewProduct) -> StoreResult<Product> {
        let product = Product::from_new(new_product_id(), new);
        self.products
            .write()
            .await
            .insert(product.id.clone(), product.clone());
        Ok(product)
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Product>> {
        Ok(self.products.read().await.get(id).cloned())
    }

    async fn update(&self, id: &str, changes: ProductChanges) -> StoreResult<Option<Product>> {
        let mut products = self.products.write().await;
        Ok(products.get_mut(id).map(|product| {
            product.apply(changes);
            product.clone()
        }))
    }

    async fn delete(&self, id: &str) -> StoreResult<bool> {
        Ok(self.products.write().await.remove(id).is_some())
    }

    async fn count(&self) -> StoreResult<usize> {
        Ok(self.products.read().await.len())
    }
}
