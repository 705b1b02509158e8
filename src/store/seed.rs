//! Sample catalog inserted into an empty store at startup.

use tracing::info;

use super::ProductStore;
use crate::error::StoreResult;
use crate::models::NewProduct;

pub fn sample_products() -> Vec<NewProduct> {
    [
        (
            "Wireless Mouse",
            "Ergonomic wireless mouse with adjustable DPI settings",
            24.99,
            150,
        ),
        (
            "Mechanical Keyboard",
            "RGB mechanical keyboard with blue switches",
            89.99,
            75,
        ),
        (
            "USB-C Hub",
            "7-in-1 USB-C hub with HDMI, USB 3.0, and SD card reader",
            39.99,
            200,
        ),
        (
            "Laptop Stand",
            "Aluminum laptop stand with adjustable height",
            34.99,
            100,
        ),
        (
            "Webcam HD",
            "1080p HD webcam with built-in microphone",
            59.99,
            50,
        ),
    ]
    .into_iter()
    .map(|(name, description, price, stock_quantity)| NewProduct {
        name: name.to_string(),
        description: Some(description.to_string()),
        price,
        stock_quantity,
    })
    .collect()
}

/// Inserts the sample catalog when the store holds no products.
/// Returns the number of products inserted.
pub async fn seed_if_empty(store: &dyn ProductStore) -> StoreResult<usize> {
    let existing = store.count().await?;
    if existing > 0 {
        info!("Store already has {} products, skipping seeding", existing);
        return Ok(0);
    }

    let samples = sample_products();
    let total = samples.len();
    for product in samples {
        store.create(product).await?;
    }
    info!("Seeded store with {} sample products", total);
    Ok(total)
}
