/// Error handling for the API server
///
/// This module provides a unified error type that maps to HTTP responses.
/// Handlers return `Result<T, ApiError>`, which converts to the right status
/// code and body shape for each route.
///
/// # Response shapes
///
/// | Variant | Status | Body |
/// |---|---|---|
/// | `MissingFields` | 400 | `{"error": "Name and email are required"}` |
/// | `Database` | 500 | `{"error": "<message>"}` |
/// | `Unhealthy` | 500 | `{"status": "unhealthy", "error": "<message>"}` |
/// | `Page` | 500 | `Database Error: <message>` (text/plain) |

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use userboard_shared::db::store::StoreError;

/// Message returned when the add-user form is incomplete
pub const MISSING_FIELDS_MESSAGE: &str = "Name and email are required";

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Name or email missing from the add-user form (400)
    MissingFields,

    /// Database failure on a JSON route (500)
    Database(String),

    /// Database unreachable during a health check (500)
    Unhealthy(String),

    /// Database failure while rendering the HTML page (500)
    Page(String),
}

/// JSON error body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

/// JSON body for a failed health check
#[derive(Debug, Serialize, Deserialize)]
pub struct UnhealthyResponse {
    /// Always "unhealthy"
    pub status: String,

    /// Why the database could not be reached
    pub error: String,
}

impl ApiError {
    /// Re-targets a database error at the HTML page route
    pub fn into_page(self) -> Self {
        match self {
            ApiError::Database(msg) | ApiError::Unhealthy(msg) => ApiError::Page(msg),
            other => other,
        }
    }

    /// Re-targets a database error at the health route
    pub fn into_unhealthy(self) -> Self {
        match self {
            ApiError::Database(msg) | ApiError::Page(msg) => ApiError::Unhealthy(msg),
            other => other,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::MissingFields => write!(f, "Bad request: {}", MISSING_FIELDS_MESSAGE),
            ApiError::Database(msg) => write!(f, "Database error: {}", msg),
            ApiError::Unhealthy(msg) => write!(f, "Unhealthy: {}", msg),
            ApiError::Page(msg) => write!(f, "Database Error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MissingFields => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: MISSING_FIELDS_MESSAGE.to_string(),
                }),
            )
                .into_response(),
            ApiError::Database(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse { error: msg }),
                )
                    .into_response()
            }
            ApiError::Unhealthy(msg) => {
                tracing::error!("Health check failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(UnhealthyResponse {
                        status: "unhealthy".to_string(),
                        error: msg,
                    }),
                )
                    .into_response()
            }
            ApiError::Page(msg) => {
                tracing::error!("Failed to load users: {}", msg);
                // A String body is sent as text/plain; charset=utf-8
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Database Error: {}", msg),
                )
                    .into_response()
            }
        }
    }
}

/// Convert storage errors to API errors
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Database(err.to_string())
    }
}

/// Convert form validation errors to API errors
impl From<validator::ValidationErrors> for ApiError {
    fn from(_: validator::ValidationErrors) -> Self {
        ApiError::MissingFields
    }
}
