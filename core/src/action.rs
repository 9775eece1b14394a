//! Action decoding and dispatch planning.
//!
//! A request carries at most one action in its form body. The raw fields are
//! decoded once into [`TodoAction`], a closed set of variants with
//! [`TodoAction::Render`] as the default for anything unrecognized. The action
//! then becomes a [`Step`]: a pure description of what the request must do
//! against the store, executed by [`crate::dispatch::run`].
//!
//! ```
//! use sample_todo_core::action::{Mutation, Step, TodoAction, TodoForm};
//!
//! let form = TodoForm {
//!     action: Some("add".to_string()),
//!     title: Some("Buy milk".to_string()),
//!     id: None,
//! };
//!
//! let action = TodoAction::from_form(&form);
//! assert_eq!(
//!     action.into_step(),
//!     Step::Mutate(Some(Mutation::Insert { title: "Buy milk".to_string() }))
//! );
//! ```

use crate::types::TodoId;
use serde::Deserialize;

/// Raw form fields of a request, every one optional.
///
/// Unknown fields are ignored; a missing field is `None` and never an error.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TodoForm {
    /// Selected action (`add`, `toggle`, anything else renders)
    pub action: Option<String>,
    /// Title of the item to add
    pub title: Option<String>,
    /// Id of the item to toggle
    pub id: Option<String>,
}

/// Builds a form from decoded `key=value` pairs.
///
/// A repeated key keeps its last value, so `title=a&title=b` submits `b`.
impl FromIterator<(String, String)> for TodoForm {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut form = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "action" => form.action = Some(value),
                "title" => form.title = Some(value),
                "id" => form.id = Some(value),
                _ => {}
            }
        }
        form
    }
}

/// The decoded action of one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TodoAction {
    /// Insert a new item.
    Add {
        /// Title as submitted, empty when the field was missing
        title: String,
    },
    /// Flip `done` on an item.
    ///
    /// `id` is `None` when the submitted value was missing, not numeric, or
    /// a number no row can carry (`1.5`); the request still completes with a
    /// redirect.
    Toggle {
        /// Target item
        id: Option<TodoId>,
    },
    /// No mutation; render the list.
    Render,
}

impl TodoAction {
    /// Decodes the action from raw form fields.
    #[must_use]
    pub fn from_form(form: &TodoForm) -> Self {
        match form.action.as_deref() {
            Some("add") => Self::Add {
                title: form.title.clone().unwrap_or_default(),
            },
            Some("toggle") => Self::Toggle {
                id: form.id.as_deref().and_then(|raw| raw.parse().ok()),
            },
            _ => Self::Render,
        }
    }

    /// Short label used for logs and metrics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Toggle { .. } => "toggle",
            Self::Render => "render",
        }
    }

    /// Plans the work this action requires.
    #[must_use]
    pub fn into_step(self) -> Step {
        match self {
            Self::Add { title } => Step::Mutate(Some(Mutation::Insert { title })),
            Self::Toggle { id: Some(id) } => Step::Mutate(Some(Mutation::Negate { id })),
            Self::Toggle { id: None } => Step::Mutate(None),
            Self::Render => Step::Render,
        }
    }
}

/// A single write statement against the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mutation {
    /// Insert a row with the given title and `done = false`.
    Insert {
        /// Title of the new row
        title: String,
    },
    /// Negate `done` in place on the row with this id.
    Negate {
        /// Target row
        id: TodoId,
    },
}

/// What a request does once its action is known.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Run the mutation, if any, then redirect to the document URI.
    Mutate(Option<Mutation>),
    /// Load the list and render the page.
    Render,
}

/// Result of executing a [`Step`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// A mutation path finished; the response is a redirect with no body.
    Redirect,
    /// The render path loaded these items.
    Render(Vec<crate::types::TodoItem>),
}
