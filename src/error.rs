//! Error types for the product service
//!
//! Cache failures never appear here: the cache layer reports them as
//! tri-state outcomes (see [`crate::cache::CacheLookup`]). Only the durable
//! store and the request layer produce errors.

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Store Error ==
/// Failure reported by the durable store. Always fatal for the request.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The storage backend failed (I/O, corruption, closed handle)
    #[error("storage backend error: {0}")]
    Backend(String),

    /// A stored record could not be encoded or decoded
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The store did not answer within its configured timeout
    #[error("store operation timed out after {0:?}")]
    Timeout(Duration),
}

impl From<sled::Error> for StoreError {
    fn from(err: sled::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

// == Service Error ==
/// Outcome of a failed [`crate::service::ProductCacheService`] operation.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// No product with this identifier exists in the durable store
    #[error("product not found: {0}")]
    NotFound(String),

    /// The durable store failed; propagated unchanged
    #[error(transparent)]
    Store(#[from] StoreError),
}

// == Api Error ==
/// Error type surfaced by the HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Product not found
    #[error("Product with id '{0}' not found")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Durable store unreachable or too slow
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(id) => ApiError::NotFound(id),
            ServiceError::Store(store_err @ (StoreError::Backend(_) | StoreError::Timeout(_))) => {
                ApiError::StoreUnavailable(store_err.to_string())
            }
            ServiceError::Store(store_err @ StoreError::Serialization(_)) => {
                ApiError::Internal(store_err.to_string())
            }
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Aliases ==
/// Result returned by durable store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Result returned by the product service.
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// Result returned by HTTP handlers.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let response = ApiError::from(ServiceError::NotFound("abc".into())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_store_timeout_maps_to_503() {
        let err = ServiceError::Store(StoreError::Timeout(Duration::from_millis(5)));
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_store_backend_maps_to_503() {
        let err = ServiceError::Store(StoreError::Backend("disk gone".into()));
        assert!(matches!(ApiError::from(err), ApiError::StoreUnavailable(_)));
    }

    #[test]
    fn test_serialization_maps_to_500() {
        let err = ServiceError::Store(StoreError::Serialization("bad json".into()));
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_store_error_passes_through_service_error_display() {
        let err = ServiceError::from(StoreError::Backend("boom".into()));
        assert_eq!(err.to_string(), "storage backend error: boom");
    }
}
