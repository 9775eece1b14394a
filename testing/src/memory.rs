//! In-memory record store for fast, deterministic testing.
//!
//! Behaves like the `todo` table: ids are assigned sequentially and never
//! reused, rows keep insertion order, `negate_done` flips in place. Failures
//! can be injected per path to exercise the fatal and degraded branches.

use sample_todo_core::store::{Result, StoreError, TodoConnection, TodoStore};
use sample_todo_core::types::{TodoId, TodoItem};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Version string reported by [`InMemoryTodoStore`] unless overridden.
pub const DEFAULT_SERVER_VERSION: &str = "InMemory 1.0";

#[derive(Debug)]
struct Table {
    rows: Vec<TodoItem>,
    next_id: i64,
    server_version: String,
    fail_acquire: Option<StoreError>,
    fail_writes: Option<StoreError>,
    fail_reads: Option<StoreError>,
    fail_version: Option<StoreError>,
    acquired: usize,
    open: usize,
}

/// In-memory implementation of [`TodoStore`].
///
/// Clones share the same table.
///
/// # Example
///
/// ```
/// use sample_todo_core::store::{Diagnostic, StoreError, TodoConnection, TodoStore};
/// use sample_todo_testing::InMemoryTodoStore;
///
/// # async fn example() {
/// let store = InMemoryTodoStore::new();
/// store.fail_writes(StoreError::Statement(Diagnostic::message("disk full")));
///
/// let mut conn = store.acquire().await.unwrap();
/// assert!(conn.insert("Buy milk").await.is_err());
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct InMemoryTodoStore {
    table: Arc<Mutex<Table>>,
}

impl InMemoryTodoStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: Arc::new(Mutex::new(Table {
                rows: Vec::new(),
                next_id: 1,
                server_version: DEFAULT_SERVER_VERSION.to_string(),
                fail_acquire: None,
                fail_writes: None,
                fail_reads: None,
                fail_version: None,
                acquired: 0,
                open: 0,
            })),
        }
    }

    /// Create a store pre-populated with `titles`, all not done.
    #[must_use]
    pub fn with_titles<I, T>(titles: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let store = Self::new();
        {
            let mut table = store.lock();
            for title in titles {
                let id = TodoId::new(table.next_id);
                table.next_id += 1;
                table.rows.push(TodoItem::new(id, title.into(), false));
            }
        }
        store
    }

    fn lock(&self) -> MutexGuard<'_, Table> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of every row in insertion order.
    #[must_use]
    pub fn items(&self) -> Vec<TodoItem> {
        self.lock().rows.clone()
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().rows.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().rows.is_empty()
    }

    /// Set the version string returned by `server_version`.
    pub fn set_server_version(&self, version: impl Into<String>) {
        self.lock().server_version = version.into();
    }

    /// Make every subsequent `acquire` fail with `error`.
    pub fn fail_acquire(&self, error: StoreError) {
        self.lock().fail_acquire = Some(error);
    }

    /// Make every subsequent insert and update fail with `error`.
    pub fn fail_writes(&self, error: StoreError) {
        self.lock().fail_writes = Some(error);
    }

    /// Make every subsequent select fail with `error`.
    pub fn fail_reads(&self, error: StoreError) {
        self.lock().fail_reads = Some(error);
    }

    /// Make every subsequent version query fail with `error`.
    pub fn fail_version(&self, error: StoreError) {
        self.lock().fail_version = Some(error);
    }

    /// Remove all injected failures.
    pub fn heal(&self) {
        let mut table = self.lock();
        table.fail_acquire = None;
        table.fail_writes = None;
        table.fail_reads = None;
        table.fail_version = None;
    }

    /// Total number of successful `acquire` calls.
    #[must_use]
    pub fn acquired_count(&self) -> usize {
        self.lock().acquired
    }

    /// Connections acquired and not yet dropped.
    #[must_use]
    pub fn open_connections(&self) -> usize {
        self.lock().open
    }
}

impl Default for InMemoryTodoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoStore for InMemoryTodoStore {
    type Connection = InMemoryConnection;

    async fn acquire(&self) -> Result<InMemoryConnection> {
        let mut table = self.lock();
        if let Some(error) = &table.fail_acquire {
            return Err(error.clone());
        }
        table.acquired += 1;
        table.open += 1;
        drop(table);

        Ok(InMemoryConnection {
            store: self.clone(),
        })
    }
}

/// Connection handed out by [`InMemoryTodoStore`].
///
/// Dropping it is tracked by [`InMemoryTodoStore::open_connections`].
#[derive(Debug)]
pub struct InMemoryConnection {
    store: InMemoryTodoStore,
}

impl Drop for InMemoryConnection {
    fn drop(&mut self) {
        let mut table = self.store.lock();
        table.open = table.open.saturating_sub(1);
    }
}

impl TodoConnection for InMemoryConnection {
    async fn insert(&mut self, title: &str) -> Result<TodoId> {
        let mut table = self.store.lock();
        if let Some(error) = &table.fail_writes {
            return Err(error.clone());
        }
        let id = TodoId::new(table.next_id);
        table.next_id += 1;
        table.rows.push(TodoItem::new(id, title.to_string(), false));
        Ok(id)
    }

    async fn negate_done(&mut self, id: TodoId) -> Result<u64> {
        let mut table = self.store.lock();
        if let Some(error) = &table.fail_writes {
            return Err(error.clone());
        }
        let mut affected = 0;
        for row in table.rows.iter_mut().filter(|row| row.id == id) {
            row.done = !row.done;
            affected += 1;
        }
        Ok(affected)
    }

    async fn select_all(&mut self) -> Result<Vec<TodoItem>> {
        let table = self.store.lock();
        if let Some(error) = &table.fail_reads {
            return Err(error.clone());
        }
        Ok(table.rows.clone())
    }

    async fn server_version(&mut self) -> Result<String> {
        let table = self.store.lock();
        if let Some(error) = &table.fail_version {
            return Err(error.clone());
        }
        Ok(table.server_version.clone())
    }
}
