//! sled-backed product store.
//!
//! Records are JSON-encoded [`Product`]s keyed by identifier in a dedicated
//! tree. sled calls block, so each one runs on the blocking pool; that keeps
//! the service's store timeout effective.

use std::path::Path;

use async_trait::async_trait;
use tracing::info;

use super::{new_product_id, ProductStore};
use crate::error::{StoreError, StoreResult};
use crate::models::{NewProduct, Product, ProductChanges};

const PRODUCTS_TREE: &str = "products";

pub struct SledStore {
    db: sled::Db,
    products: sled::Tree,
}

impl SledStore {
    /// Opens (or creates) the database at `path`, creating parent directories.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Backend(format!("Failed to create directory: {}", e)))?;
        }

        let db = sled::open(path)?;
        let products = db.open_tree(PRODUCTS_TREE)?;
        info!("Opened product store at {}", path.display());

        Ok(Self { db, products })
    }

    async fn blocking<T, F>(&self, op: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(sled::Tree) -> StoreResult<T> + Send + 'static,
    {
        let tree = self.products.clone();
        tokio::task::spawn_blocking(move || op(tree))
            .await
            .map_err(|e| StoreError::Backend(format!("store task failed: {}", e)))?
    }
}

fn decode(bytes: &[u8]) -> StoreResult<Product> {
    Ok(serde_json::from_slice(bytes)?)
}

fn update_record(
    tree: &sled::Tree,
    id: &str,
    changes: ProductChanges,
) -> StoreResult<Option<Product>> {
    loop {
        let Some(current) = tree.get(id)? else {
            return Ok(None);
        };
        let mut product = decode(&current)?;
        product.apply(changes.clone());
        let encoded = serde_json::to_vec(&product)?;

        // Lost the race against another writer: reload and reapply.
        if tree
            .compare_and_swap(id, Some(current), Some(encoded))?
            .is_ok()
        {
            tree.flush()?;
            return Ok(Some(product));
        }
    }
}

#[async_trait]
impl ProductStore for SledStore {
    async fn create(&self, new: NewProduct) -> StoreResult<Product> {
        let product = Product::from_new(new_product_id(), new);
        let encoded = serde_json::to_vec(&product)?;
        let id = product.id.clone();

        self.blocking(move |tree| {
            tree.insert(id.as_bytes(), encoded)?;
            tree.flush()?;
            Ok(())
        })
        .await?;

        Ok(product)
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Product>> {
        let id = id.to_string();
        self.blocking(move |tree| match tree.get(id.as_bytes())? {
            Some(bytes) => decode(&bytes).map(Some),
            None => Ok(None),
        })
        .await
    }

    async fn update(&self, id: &str, changes: ProductChanges) -> StoreResult<Option<Product>> {
        let id = id.to_string();
        self.blocking(move |tree| update_record(&tree, &id, changes))
            .await
    }

    async fn delete(&self, id: &str) -> StoreResult<bool> {
        let id = id.to_string();
        self.blocking(move |tree| {
            let removed = tree.remove(id.as_bytes())?.is_some();
            tree.flush()?;
            Ok(removed)
        })
        .await
    }

    async fn count(&self) -> StoreResult<usize> {
        self.blocking(|tree| Ok(tree.len())).await
    }

    async fn close(&self) -> StoreResult<()> {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || db.flush().map(|_| ()))
            .await
            .map_err(|e| StoreError::Backend(format!("store task failed: {}", e)))??;
        info!("Product store flushed");
        Ok(())
    }
}
