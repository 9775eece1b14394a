//! Error types for web handlers.
//!
//! A failed mutation is fatal to its request: the handler stops and the
//! response body is a plain-text dump of the store's error details. There is
//! no redirect and no friendlier message.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use sample_todo_core::StoreError;
use std::fmt;

/// Application error type for web handlers.
///
/// # Examples
///
/// ```ignore
/// async fn handler(State(state): State<AppState<S>>) -> Result<Response, AppError> {
///     let mut conn = state.store().acquire().await
///         .map_err(|e| AppError::store_failure("Failed to connect to the record store", e))?;
///     // ...
/// }
/// ```
#[derive(Debug)]
pub struct AppError {
    /// HTTP status code
    status: StatusCode,
    /// What the handler was doing when it failed
    message: String,
    /// Error code
    code: &'static str,
    /// Store error whose details are dumped into the body
    source: Option<StoreError>,
}

impl AppError {
    /// Create a new application error.
    #[must_use]
    pub const fn new(status: StatusCode, message: String, code: &'static str) -> Self {
        Self {
            status,
            message,
            code,
            source: None,
        }
    }

    /// Create a 500 error carrying the store's error details.
    #[must_use]
    pub fn store_failure(message: impl Into<String>, source: StoreError) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
            code: "STORE_FAILURE",
            source: Some(source),
        }
    }

    /// Create a 503 Service Unavailable error.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            message.into(),
            "SERVICE_UNAVAILABLE",
        )
    }

    /// HTTP status this error responds with.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Plain-text body: the error line, then the store diagnostic if any.
    #[must_use]
    pub fn dump(&self) -> String {
        match &self.source {
            Some(source) => format!("{self}\n{source}\n"),
            None => format!("{self}\n"),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            if let Some(source) = &self.source {
                tracing::error!(
                    status = %self.status,
                    code = self.code,
                    message = %self.message,
                    error = %source,
                    "Store failure"
                );
            } else {
                tracing::error!(
                    status = %self.status,
                    code = self.code,
                    message = %self.message,
                    "Server error"
                );
            }
        }

        let body = self.dump();
        (
            self.status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            body,
        )
            .into_response()
    }
}
