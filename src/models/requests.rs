//! Request DTOs for the product API
//!
//! Defines the structure of incoming HTTP request bodies and their validation.

use serde::Deserialize;

use super::product::{NewProduct, ProductChanges};

/// Maximum allowed product name length in characters
pub const MAX_NAME_LENGTH: usize = 255;

/// Request body for POST /products
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub stock_quantity: u32,
}

impl CreateProductRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        validate_name(&self.name)
            .or_else(|| validate_description(self.description.as_deref()))
            .or_else(|| validate_price(self.price))
    }
}

impl From<CreateProductRequest> for NewProduct {
    fn from(req: CreateProductRequest) -> Self {
        NewProduct {
            name: req.name.trim().to_string(),
            description: req.description,
            price: req.price,
            stock_quantity: req.stock_quantity,
        }
    }
}

/// Request body for PUT /products/:id. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProductRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub stock_quantity: Option<u32>,
}

impl UpdateProductRequest {
    /// Validates the provided fields. An update with no fields is rejected.
    pub fn validate(&self) -> Option<String> {
        if self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.stock_quantity.is_none()
        {
            return Some("Update must contain at least one field".to_string());
        }
        self.name
            .as_deref()
            .and_then(validate_name)
            .or_else(|| validate_description(self.description.as_deref()))
            .or_else(|| self.price.and_then(validate_price))
    }
}

impl From<UpdateProductRequest> for ProductChanges {
    fn from(req: UpdateProductRequest) -> Self {
        ProductChanges {
            name: req.name.map(|n| n.trim().to_string()),
            description: req.description,
            price: req.price,
            stock_quantity: req.stock_quantity,
        }
    }
}

fn validate_name(name: &str) -> Option<String> {
    let name = name.trim();
    if name.is_empty() {
        return Some("Name cannot be empty".to_string());
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Some(format!(
            "Name exceeds maximum length of {} characters",
            MAX_NAME_LENGTH
        ));
    }
    None
}

fn validate_description(description: Option<&str>) -> Option<String> {
    match description {
        Some(d) if d.trim().is_empty() => Some("Description cannot be empty".to_string()),
        _ => None,
    }
}

fn validate_price(price: f64) -> Option<String> {
    if !price.is_finite() || price < 0.0 {
        return Some("Price must be a non-negative number".to_string());
    }
    None
}
