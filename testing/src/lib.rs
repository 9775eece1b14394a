//! # Sample Todo Testing
//!
//! Testing utilities for the sample todo app.
//!
//! This crate provides:
//! - [`InMemoryTodoStore`]: a deterministic record store with failure injection
//! - [`properties`]: proptest strategies for titles and form values
//! - [`init_test_tracing`]: opt-in log output for debugging a test
//!
//! ## Example
//!
//! ```
//! use sample_todo_core::{dispatch, TodoAction, TodoForm, TodoStore};
//! use sample_todo_testing::InMemoryTodoStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = InMemoryTodoStore::new();
//! let mut conn = store.acquire().await?;
//!
//! let form = TodoForm {
//!     action: Some("add".to_string()),
//!     title: Some("Buy milk".to_string()),
//!     id: None,
//! };
//! dispatch::run(&mut conn, TodoAction::from_form(&form).into_step()).await?;
//!
//! assert_eq!(store.items()[0].title, "Buy milk");
//! # Ok(())
//! # }
//! ```

mod memory;

pub mod properties;

pub use memory::{InMemoryConnection, InMemoryTodoStore, DEFAULT_SERVER_VERSION};

/// Install a `fmt` subscriber honoring `RUST_LOG` for the current test binary.
///
/// Safe to call from several tests; only the first call installs it.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
