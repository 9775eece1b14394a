//! `PostgresTodoStore` and its per-request connection.

use sample_todo_core::store::{Diagnostic, Result, StoreError, TodoConnection, TodoStore};
use sample_todo_core::types::{TodoId, TodoItem};
use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Postgres;
use std::time::Duration;

const INSERT_TODO: &str = "INSERT INTO todo (title, done) VALUES ($1, FALSE) RETURNING id";
const NEGATE_DONE: &str = "UPDATE todo SET done = NOT done WHERE id = $1";
const SELECT_ALL: &str = "SELECT id, title, done FROM todo";
const SERVER_VERSION: &str = "SELECT version()";

/// PostgreSQL-backed record store.
///
/// Wraps a connection pool; cloning is cheap and shares the pool.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE todo (
///     id    BIGSERIAL PRIMARY KEY,
///     title TEXT      NOT NULL,
///     done  BOOLEAN   NOT NULL DEFAULT FALSE
/// );
/// ```
#[derive(Clone, Debug)]
pub struct PostgresTodoStore {
    pool: PgPool,
}

impl PostgresTodoStore {
    /// Create a store over an existing connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a new pool to `database_url`.
    ///
    /// # Arguments
    ///
    /// - `database_url`: `PostgreSQL` connection string
    /// - `max_connections`: upper bound of the pool
    /// - `connect_timeout_secs`: how long an acquire may wait
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the first connection cannot be made.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        connect_timeout_secs: u64,
    ) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(connect_timeout_secs))
            .connect(database_url)
            .await
            .map_err(|e| StoreError::Connection(format!("Failed to connect: {e}")))?;

        tracing::info!(max_connections, "Connected to PostgreSQL");
        Ok(Self::new(pool))
    }

    /// Get the underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl TodoStore for PostgresTodoStore {
    type Connection = PostgresConnection;

    async fn acquire(&self) -> Result<PostgresConnection> {
        let conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| StoreError::Connection(format!("Failed to acquire connection: {e}")))?;

        Ok(PostgresConnection { conn })
    }
}

/// One pooled connection, returned to the pool when dropped.
#[derive(Debug)]
pub struct PostgresConnection {
    conn: PoolConnection<Postgres>,
}

impl TodoConnection for PostgresConnection {
    async fn insert(&mut self, title: &str) -> Result<TodoId> {
        let (id,): (i64,) = sqlx::query_as(INSERT_TODO)
            .bind(title)
            .fetch_one(&mut *self.conn)
            .await
            .map_err(store_error)?;

        Ok(TodoId::new(id))
    }

    async fn negate_done(&mut self, id: TodoId) -> Result<u64> {
        let result = sqlx::query(NEGATE_DONE)
            .bind(id.get())
            .execute(&mut *self.conn)
            .await
            .map_err(store_error)?;

        Ok(result.rows_affected())
    }

    async fn select_all(&mut self) -> Result<Vec<TodoItem>> {
        let rows: Vec<(i64, String, bool)> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&mut *self.conn)
            .await
            .map_err(store_error)?;

        Ok(rows
            .into_iter()
            .map(|(id, title, done)| TodoItem::new(TodoId::new(id), title, done))
            .collect())
    }

    async fn server_version(&mut self) -> Result<String> {
        let (version,): (String,) = sqlx::query_as(SERVER_VERSION)
            .fetch_one(&mut *self.conn)
            .await
            .map_err(store_error)?;

        Ok(version)
    }
}

/// Translate a sqlx error into a [`StoreError`] without interpreting it.
///
/// Server-side rejections keep their SQLSTATE, message and constraint.
/// Transport and pool failures become [`StoreError::Connection`].
fn store_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let mut diagnostic = Diagnostic::message(db_err.message());
            if let Some(code) = db_err.code() {
                diagnostic = diagnostic.with_sqlstate(code);
            }
            if let Some(constraint) = db_err.constraint() {
                diagnostic = diagnostic.with_constraint(constraint);
            }
            StoreError::Statement(diagnostic)
        }
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Protocol(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => StoreError::Connection(err.to_string()),
        other => StoreError::Statement(Diagnostic::message(other.to_string())),
    }
}
