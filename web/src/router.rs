//! Router configuration.

use crate::handlers::{health_check, metrics_export, readiness_check, todo_page};
use crate::middleware::with_request_tracing;
use crate::state::AppState;
use axum::{
    routing::{any, get},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sample_todo_core::TodoStore;

/// Build the complete Axum router.
///
/// - `GET /health`, `GET /health/ready`: health checks
/// - `/`, and every other path as fallback: the todo page, any method
///
/// Mutations redirect to the path they were posted to, so the page works
/// wherever it is mounted.
pub fn build_router<S: TodoStore>(state: AppState<S>) -> Router {
    with_request_tracing(todo_routes(state))
}

/// [`build_router`] plus `GET /metrics`, served from the installed
/// Prometheus recorder.
pub fn build_router_with_metrics<S: TodoStore>(
    state: AppState<S>,
    prometheus: PrometheusHandle,
) -> Router {
    let metrics = Router::new()
        .route("/metrics", get(metrics_export))
        .with_state(prometheus);

    with_request_tracing(todo_routes(state).merge(metrics))
}

fn todo_routes<S: TodoStore>(state: AppState<S>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness_check::<S>))
        .route("/", any(todo_page::<S>))
        .fallback(todo_page::<S>)
        .with_state(state)
}
