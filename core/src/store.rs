//! Record store abstraction.
//!
//! The store is reached through two traits:
//!
//! - [`TodoStore`]: a shareable handle (normally a connection pool) that
//!   hands out one connection per request.
//! - [`TodoConnection`]: an acquired connection that runs the fixed set of
//!   parameterized statements this app needs.
//!
//! Dropping a connection returns it to its store, so a connection is released
//! on every exit path of a request, including the fatal ones.
//!
//! # Implementations
//!
//! - `PostgresTodoStore` (in `sample-todo-postgres`): production implementation
//! - `InMemoryTodoStore` (in `sample-todo-testing`): deterministic testing with
//!   failure injection

use crate::types::{TodoId, TodoItem};
use std::fmt;
use std::future::Future;
use thiserror::Error;

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Error details reported by the database for a failed statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Five-character SQLSTATE code, when the driver reported one
    pub sqlstate: Option<String>,
    /// Primary error message from the server
    pub message: String,
    /// Name of the violated constraint, if any
    pub constraint: Option<String>,
}

impl Diagnostic {
    /// Creates a diagnostic with only a message.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            sqlstate: None,
            message: message.into(),
            constraint: None,
        }
    }

    /// Sets the SQLSTATE code.
    #[must_use]
    pub fn with_sqlstate(mut self, sqlstate: impl Into<String>) -> Self {
        self.sqlstate = Some(sqlstate.into());
        self
    }

    /// Sets the violated constraint name.
    #[must_use]
    pub fn with_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.constraint = Some(constraint.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    /// One `key: value` line per known field.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(sqlstate) = &self.sqlstate {
            writeln!(f, "sqlstate: {sqlstate}")?;
        }
        write!(f, "message: {}", self.message)?;
        if let Some(constraint) = &self.constraint {
            write!(f, "\nconstraint: {constraint}")?;
        }
        Ok(())
    }
}

/// Errors surfaced by the record store, uninterpreted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No connection could be obtained, or the connection broke mid-statement.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The server rejected a statement.
    #[error("Statement failed\n{0}")]
    Statement(Diagnostic),
}

impl StoreError {
    /// SQLSTATE code of a rejected statement.
    #[must_use]
    pub fn sqlstate(&self) -> Option<&str> {
        match self {
            Self::Statement(diagnostic) => diagnostic.sqlstate.as_deref(),
            Self::Connection(_) => None,
        }
    }
}

/// Shareable handle to the record store.
pub trait TodoStore: Send + Sync + 'static {
    /// Connection type handed out by this store.
    type Connection: TodoConnection;

    /// Acquire one connection for the duration of a request.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the store is unreachable or the
    /// pool is exhausted.
    fn acquire(&self) -> impl Future<Output = Result<Self::Connection>> + Send;
}

/// An acquired connection running the app's parameterized statements.
pub trait TodoConnection: Send {
    /// Insert a row with `title` and `done = false`, returning the assigned id.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the insert is rejected or the connection fails.
    fn insert(&mut self, title: &str) -> impl Future<Output = Result<TodoId>> + Send;

    /// Negate `done` in place on the row with `id` in one statement.
    ///
    /// Returns the number of affected rows: `0` for an unknown id.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the update is rejected or the connection fails.
    fn negate_done(&mut self, id: TodoId) -> impl Future<Output = Result<u64>> + Send;

    /// Select every row in store-default order.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the select fails.
    fn select_all(&mut self) -> impl Future<Output = Result<Vec<TodoItem>>> + Send;

    /// Version string reported by the store server.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the query fails.
    fn server_version(&mut self) -> impl Future<Output = Result<String>> + Send;
}
