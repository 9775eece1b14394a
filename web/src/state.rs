//! Application state for Axum handlers.

use sample_todo_core::TodoStore;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// Holds the record store handle and, optionally, a fixed hostname to show on
/// the page instead of the one resolved per request. The state carries no
/// request data; every request acquires its own connection from `store`.
///
/// # Examples
///
/// ```ignore
/// use sample_todo_postgres::PostgresTodoStore;
/// use sample_todo_web::{build_router, AppState};
///
/// let store = PostgresTodoStore::connect(&url, 10, 30).await?;
/// let app = build_router(AppState::new(store));
/// ```
pub struct AppState<S> {
    store: Arc<S>,
    hostname: Option<Arc<str>>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            hostname: self.hostname.clone(),
        }
    }
}

impl<S: TodoStore> AppState<S> {
    /// Create a new application state around `store`.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
            hostname: None,
        }
    }

    /// Show `hostname` on the page instead of resolving it per request.
    #[must_use]
    pub fn with_hostname(mut self, hostname: impl Into<Arc<str>>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    /// The record store handle.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Hostname to display for the current request.
    pub async fn hostname(&self) -> String {
        match &self.hostname {
            Some(fixed) => fixed.to_string(),
            None => crate::host::resolve_hostname().await,
        }
    }
}
