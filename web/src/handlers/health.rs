//! Health check endpoints.
//!
//! These endpoints are used by load balancers and monitoring systems
//! to verify service health.

use crate::error::AppError;
use crate::state::AppState;
use crate::WebResult;
use axum::{extract::State, http::StatusCode, Json};
use sample_todo_core::{TodoConnection, TodoStore};
use serde::Serialize;

/// Simple health check endpoint (for basic liveness).
///
/// Returns 200 OK to indicate the service is running.
/// This endpoint does NOT check the record store.
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
#[allow(clippy::unused_async)]
pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

/// Readiness check response.
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    /// Overall readiness status
    pub ready: bool,
    /// Version reported by the record store
    pub store_version: String,
}

/// Readiness check against the record store.
///
/// # Status Codes
///
/// - 200 OK: a connection was acquired and answered a query
/// - 503 Service Unavailable: otherwise
///
/// # Endpoint
///
/// ```text
/// GET /health/ready
/// ```
///
/// # Errors
///
/// Returns [`AppError::unavailable`] if the store cannot be reached.
pub async fn readiness_check<S: TodoStore>(
    State(state): State<AppState<S>>,
) -> WebResult<Json<ReadinessResponse>> {
    let mut conn = state.store().acquire().await.map_err(|e| {
        tracing::warn!(error = %e, "Readiness check failed to acquire a connection");
        AppError::unavailable("Record store unreachable")
    })?;

    let store_version = conn.server_version().await.map_err(|e| {
        tracing::warn!(error = %e, "Readiness check query failed");
        AppError::unavailable("Record store not answering")
    })?;

    Ok(Json(ReadinessResponse {
        ready: true,
        store_version,
    }))
}
