//! Domain types and the DTOs used for HTTP request and response bodies.

pub mod product;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use product::{NewProduct, Product, ProductChanges};
pub use requests::{CreateProductRequest, UpdateProductRequest};
pub use responses::{ErrorResponse, HealthResponse, StatsResponse};
