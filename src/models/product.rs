//! Product domain types shared by the stores, the cache and the API.

use serde::{Deserialize, Serialize};

// == Product ==
/// A catalog product as held by the durable store.
///
/// The JSON form of this struct is also the cache snapshot encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Opaque identifier assigned by the store at creation
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub stock_quantity: u32,
}

impl Product {
    /// Builds a stored product from its creation payload.
    pub fn from_new(id: impl Into<String>, new: NewProduct) -> Self {
        Self {
            id: id.into(),
            name: new.name,
            description: new.description,
            price: new.price,
            stock_quantity: new.stock_quantity,
        }
    }

    /// Applies every field present in `changes`; absent fields are left alone.
    pub fn apply(&mut self, changes: ProductChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = Some(description);
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        if let Some(stock_quantity) = changes.stock_quantity {
            self.stock_quantity = stock_quantity;
        }
    }
}

// == New Product ==
/// A product that has not been assigned an identifier yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock_quantity: u32,
}

// == Product Changes ==
/// Partial update. `None` means "keep the current value".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock_quantity: Option<u32>,
}

impl ProductChanges {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.stock_quantity.is_none()
    }
}
