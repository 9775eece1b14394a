//! # Sample Todo Core
//!
//! Domain types, action dispatch and store traits for the sample todo app.
//!
//! The whole application is one page: it lists todo items and lets a user add
//! an item or toggle one. Every request follows the same small state machine:
//!
//! ```text
//! Received ──decode──▶ TodoAction ──plan──▶ Step
//!                                            │
//!              ┌─────────────────────────────┴───────────────┐
//!              ▼                                             ▼
//!   Mutate(Some(m)) / Mutate(None)                        Render
//!   one statement, then redirect             select all, then render page
//! ```
//!
//! This crate is free of I/O: the store is reached through the
//! [`TodoStore`]/[`TodoConnection`] traits, implemented by
//! `sample-todo-postgres` for production and `sample-todo-testing` for tests.
//!
//! ## Example
//!
//! ```ignore
//! use sample_todo_core::{dispatch, TodoAction, TodoForm, TodoStore};
//!
//! let mut conn = store.acquire().await?;
//! let step = TodoAction::from_form(&form).into_step();
//! let outcome = dispatch::run(&mut conn, step).await?;
//! ```

pub mod action;
pub mod dispatch;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use action::{Mutation, Outcome, Step, TodoAction, TodoForm};
pub use store::{Diagnostic, StoreError, TodoConnection, TodoStore};
pub use types::{InvalidTodoId, TodoId, TodoItem};
