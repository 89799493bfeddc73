//! Error types for musiclib-api
//!
//! Client errors (4xx) carry their message to the caller. Server errors are
//! logged in full and answered with a generic message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::services::EnrichmentError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or out-of-range input (400)
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Referenced song does not exist (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Duplicate (group, song) pair (409)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Enrichment service failure (500)
    #[error("Upstream error: {0}")]
    Upstream(#[from] EnrichmentError),

    /// Persistence failure (500)
    #[error("Store error: {0}")]
    Store(#[from] sqlx::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Upstream(_) | ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::InvalidParameter(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg) => msg,
            ApiError::Upstream(err) => {
                error!("Failed to fetch song details: {}", err);
                "Failed to fetch song details".to_string()
            }
            ApiError::Store(err) => {
                error!("Database error: {}", err);
                "Internal server error".to_string()
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
