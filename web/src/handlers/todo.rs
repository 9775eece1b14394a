//! The todo page handler.
//!
//! One handler serves every method on the page path:
//!
//! - `POST` with `action=add` or `action=toggle` runs one statement and
//!   answers `302 Found` back to the same path, with an empty body.
//! - Anything else loads the list and answers `200` with the rendered page.
//!
//! A failed mutation answers with the store's error details instead of a
//! redirect. A failed list load renders an empty list.

use crate::error::AppError;
use crate::WebResult;
use crate::extractors::{DocumentUri, FormAction};
use crate::page::{render_page, SystemInfo};
use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use sample_todo_core::{dispatch, Outcome, TodoConnection, TodoStore};

/// Shown when the store does not report its version.
const UNKNOWN_VERSION: &str = "unknown";

/// Dispatch the request's action and answer with a redirect or the page.
///
/// # Errors
///
/// Returns a [`AppError::store_failure`] when no connection can be acquired
/// or when the insert/update statement fails.
#[tracing::instrument(skip_all, fields(action = action.name(), uri = %uri))]
pub async fn todo_page<S: TodoStore>(
    State(state): State<AppState<S>>,
    DocumentUri(uri): DocumentUri,
    FormAction(action): FormAction,
) -> WebResult<Response> {
    let name = action.name();
    let mut conn = state.store().acquire().await.map_err(|e| {
        metrics::counter!("todo_store_failures_total", "path" => "acquire").increment(1);
        AppError::store_failure("Failed to connect to the record store", e)
    })?;

    match dispatch::run(&mut conn, action.into_step()).await {
        Ok(Outcome::Redirect) => {
            metrics::counter!("todo_mutations_total", "action" => name).increment(1);
            Ok(redirect(uri))
        }
        Ok(Outcome::Render(items)) => {
            let store_version = server_version(&mut conn).await;
            drop(conn);

            let info = SystemInfo {
                hostname: state.hostname().await,
                store_version,
            };
            tracing::debug!(items = items.len(), "Rendering todo list");
            Ok(Html(render_page(&items, &info)).into_response())
        }
        Err(e) => {
            metrics::counter!("todo_store_failures_total", "path" => name).increment(1);
            Err(AppError::store_failure(format!("Failed to {name} todo"), e))
        }
    }
}

/// `302 Found` back to the document URI, no body.
fn redirect(uri: String) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, uri)]).into_response()
}

async fn server_version<C: TodoConnection>(conn: &mut C) -> String {
    match conn.server_version().await {
        Ok(version) => version,
        Err(error) => {
            tracing::warn!(%error, "Failed to read store version");
            UNKNOWN_VERSION.to_string()
        }
    }
}
