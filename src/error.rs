//! Error types for the order service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Store Error ==
/// Failure reported by the durable order store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No record exists for the key
    #[error("order {0} does not exist")]
    NotFound(String),

    /// The backend failed to execute the operation
    #[error("store backend failure: {0}")]
    Backend(String),

    /// The round trip did not finish within the allowed time
    #[error("store round trip timed out")]
    Timeout,
}

// == Cache Error ==
/// Failure to populate the in-memory cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("cache unavailable: {0}")]
    Unavailable(String),
}

// == Validation Error ==
/// First constraint an inbound order violates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `payment.currency`
    pub field: String,
    /// Human readable description of the violated constraint
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// == Order Error Enum ==
/// Outcome of a failed read or write through the order service.
#[derive(Error, Debug)]
pub enum OrderError {
    /// Order violates structural or business constraints
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Inbound payload is not a JSON order
    #[error("malformed order payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// Neither the cache nor the store holds the order
    #[error("order not found: {0}")]
    NotFound(String),

    /// The store could not be queried
    #[error("lookup of order {key} failed: {source}")]
    Lookup { key: String, source: StoreError },

    /// The store rejected or failed to commit the order
    ///
    /// With a [`StoreError::Timeout`] source the outcome is unknown: the
    /// caller stopped waiting, but the commit may still land afterwards and
    /// then update the cache. Any other source means nothing was written.
    #[error("persisting order {key} failed: {source}")]
    Persist { key: String, source: StoreError },
}

impl OrderError {
    /// Returns true for the expected "no such order" outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(self, OrderError::NotFound(_))
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            OrderError::NotFound(uid) => {
                (StatusCode::NOT_FOUND, format!("order {} not found", uid))
            }
            OrderError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            OrderError::Decode(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            OrderError::Lookup { .. } | OrderError::Persist { .. } => {
                tracing::error!(error = %self, "order operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the order service.
pub type Result<T> = std::result::Result<T, OrderError>;
