//! Sample todo HTTP server.
//!
//! The binary wires a `PostgresTodoStore` into the web router; this library
//! part holds what the binary needs to be testable, namely configuration.

pub mod config;

pub use config::{Config, ConfigError};
