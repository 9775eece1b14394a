//! Domain types for todo items.
//!
//! A todo list is a flat table of items. The store assigns every id; this
//! system only ever creates items and flips their `done` flag.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Store-assigned identifier of a todo item.
///
/// Backed by a `BIGSERIAL` column, so ids are positive and never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(i64);

impl TodoId {
    /// Wraps a raw id as returned by the store.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw id for binding into a statement.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a form value does not name an item id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not a numeric id: {0:?}")]
pub struct InvalidTodoId(pub String);

impl FromStr for TodoId {
    type Err = InvalidTodoId;

    /// Accepts any decimal numeric string with an integral value, ignoring
    /// surrounding ASCII whitespace: `"7"`, `"+7"`, `"07"`, `"7.0"` and
    /// `"7e0"` all name item 7.
    ///
    /// Fractional or out-of-range numbers can never match a `BIGSERIAL`
    /// row and are rejected along with non-numeric text, hex and the
    /// `inf`/`nan` spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim_ascii();
        if let Ok(id) = raw.parse::<i64>() {
            return Ok(Self(id));
        }

        integral_decimal(raw)
            .map(Self)
            .ok_or_else(|| InvalidTodoId(s.to_string()))
    }
}

/// Value of a fraction or exponent literal when it is a whole `i64`.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss, clippy::float_cmp)]
fn integral_decimal(raw: &str) -> Option<i64> {
    let decimal_only = raw.bytes().any(|b| b.is_ascii_digit())
        && raw
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !decimal_only {
        return None;
    }

    let value = raw.parse::<f64>().ok()?;
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    (value.fract() == 0.0 && in_range).then(|| value as i64)
}

/// A single row of the `todo` table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Unique identifier, assigned by the store
    pub id: TodoId,
    /// Title given at creation
    pub title: String,
    /// Whether the item has been checked off
    pub done: bool,
}

impl TodoItem {
    /// Creates an item as read back from the store.
    #[must_use]
    pub const fn new(id: TodoId, title: String, done: bool) -> Self {
        Self { id, title, done }
    }
}
