//! API Handlers
//!
//! HTTP request handlers for each product endpoint. Handlers validate input,
//! call the [`ProductCacheService`] and map its outcomes to status codes.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::error::{ApiError, Result};
use crate::models::{
    CreateProductRequest, HealthResponse, Product, StatsResponse, UpdateProductRequest,
};
use crate::service::ProductCacheService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ProductCacheService>,
}

impl AppState {
    pub fn new(service: ProductCacheService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Handler for POST /products
pub async fn create_product_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>)> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let product = state.service.create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Handler for GET /products/:id
pub async fn get_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    Ok(Json(state.service.read(&id).await?))
}

/// Handler for PUT /products/:id
///
/// Only the fields present in the body are changed.
pub async fn update_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateProductRequest>,
) -> Result<Json<Product>> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    Ok(Json(state.service.update(&id, req.into()).await?))
}

/// Handler for DELETE /products/:id
pub async fn delete_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::new(
        state.service.stats(),
        state.service.settings().enabled,
        state.service.cache_evictions().await,
    ))
}

/// Handler for GET /health
///
/// Always 200 while the API answers; the cache state is informational.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.service.cache_status().await))
}
