//! Request tracing middleware.
//!
//! Every request gets an `x-request-id` (kept from the client when present,
//! otherwise a new UUID), a tracing span carrying that id, and the id echoed
//! back on the response.
//!
//! # Example
//!
//! ```ignore
//! use sample_todo_web::middleware::with_request_tracing;
//!
//! let app = with_request_tracing(Router::new().route("/", get(page)));
//! ```

use axum::{
    body::Body,
    http::Request,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::Span;

/// Header carrying the request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Wrap `router` with request id assignment, per-request spans and id propagation.
#[must_use]
pub fn with_request_tracing(router: Router) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http().make_span_with(request_span))
            .layer(PropagateRequestIdLayer::x_request_id()),
    )
}

fn request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "http_request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    )
}
