//! Executes a planned [`Step`] against one store connection.
//!
//! Mutation paths are fatal on failure: the store error is returned as-is so
//! the caller can report it. The render path never fails: a select error is
//! logged and the list is treated as empty.

use crate::action::{Mutation, Outcome, Step};
use crate::store::{Result, TodoConnection};
use crate::types::TodoItem;

/// Run `step` on `conn`.
///
/// Each mutation is exactly one statement. A `Negate` that matches no row is
/// still a successful redirect.
///
/// # Errors
///
/// Returns the store error of a failed insert or update. The render path
/// never returns an error.
pub async fn run<C: TodoConnection>(conn: &mut C, step: Step) -> Result<Outcome> {
    match step {
        Step::Mutate(Some(mutation)) => {
            apply(conn, mutation).await?;
            Ok(Outcome::Redirect)
        }
        Step::Mutate(None) => {
            tracing::debug!("Toggle without a numeric id, skipping update");
            Ok(Outcome::Redirect)
        }
        Step::Render => Ok(Outcome::Render(load_items(conn).await)),
    }
}

async fn apply<C: TodoConnection>(conn: &mut C, mutation: Mutation) -> Result<()> {
    match mutation {
        Mutation::Insert { title } => {
            let id = conn.insert(&title).await?;
            tracing::info!(todo_id = %id, "Todo added");
        }
        Mutation::Negate { id } => {
            let affected = conn.negate_done(id).await?;
            tracing::info!(todo_id = %id, affected, "Todo toggled");
        }
    }
    Ok(())
}

/// Load every item for rendering.
///
/// A failed select yields an empty list; the failure is only visible in logs.
pub async fn load_items<C: TodoConnection>(conn: &mut C) -> Vec<TodoItem> {
    match conn.select_all().await {
        Ok(items) => items,
        Err(error) => {
            tracing::warn!(%error, "Failed to load todo items, rendering an empty list");
            Vec::new()
        }
    }
}
