//! Axum HTTP surface of the sample todo app.
//!
//! This crate is the imperative shell around `sample-todo-core`: it turns an
//! HTTP request into a [`TodoAction`](sample_todo_core::TodoAction), runs it
//! against one store connection and maps the outcome to a response.
//!
//! # Request Flow
//!
//! 1. **HTTP Request** arrives at [`handlers::todo_page`]
//! 2. **Extract** the document URI and the form action ([`extractors`])
//! 3. **Acquire** one connection from the store in [`AppState`]
//! 4. **Dispatch** the planned step through `sample_todo_core::dispatch::run`
//! 5. **Map result**: `302` redirect, rendered page ([`page`]), or a
//!    diagnostic dump ([`AppError`])
//! 6. **Release** the connection on drop, on every path
//!
//! # Example
//!
//! ```ignore
//! use sample_todo_postgres::PostgresTodoStore;
//! use sample_todo_web::{build_router, AppState};
//!
//! let store = PostgresTodoStore::connect(&database_url, 10, 30).await?;
//! let app = build_router(AppState::new(store));
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod host;
pub mod middleware;
pub mod page;
pub mod router;
pub mod state;

// Re-export key types for convenience
pub use error::AppError;
pub use extractors::{DocumentUri, FormAction};
pub use middleware::{with_request_tracing, REQUEST_ID_HEADER};
pub use router::{build_router, build_router_with_metrics};
pub use state::AppState;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
