/// Health check endpoint
///
/// Asks the store for a live connection. With MySQL that means a fresh
/// connection (usual retry policy and liveness ping) that is closed again.
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
///
/// # Response
///
/// ```json
/// { "status": "healthy", "database": "connected" }
/// ```
///
/// On failure the status is 500 and the body is
/// `{ "status": "unhealthy", "error": "<message>" }`.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Database status
    pub database: String,
}

/// Health check handler
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    state
        .store
        .ping()
        .await
        .map_err(|e| ApiError::from(e).into_unhealthy())?;

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        database: "connected".to_string(),
    }))
}
