//! `PostgreSQL` record store for the sample todo app.
//!
//! This crate provides [`PostgresTodoStore`], which implements the
//! `TodoStore` trait from `sample-todo-core` on top of a sqlx connection pool.
//! Every statement is parameterized; the schema is expected to exist already
//! (see [`SCHEMA`]).
//!
//! # Example
//!
//! ```ignore
//! use sample_todo_postgres::PostgresTodoStore;
//! use sample_todo_core::{TodoConnection, TodoStore};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = PostgresTodoStore::connect("postgres://localhost/todo", 10, 30).await?;
//!     let mut conn = store.acquire().await?;
//!     let id = conn.insert("Buy milk").await?;
//!     conn.negate_done(id).await?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod store;

pub use store::{PostgresConnection, PostgresTodoStore};

/// DDL of the `todo` table this store reads and writes.
///
/// Applied by operators or test harnesses; the application never migrates.
pub const SCHEMA: &str = include_str!("../schema.sql");
