//! HTTP request handlers.

pub mod health;
pub mod metrics;
pub mod todo;

pub use health::{health_check, readiness_check};
pub use metrics::metrics_export;
pub use todo::todo_page;
