//! Custom Axum extractors.
//!
//! This module contains the request-parsing boundary of the app:
//! - `DocumentUri`: the request path, used as the redirect target
//! - `FormAction`: the decoded [`TodoAction`] of a request
//!
//! Neither extractor can reject a request. A missing or malformed field
//! decodes to a default, a repeated field keeps its last value, and anything
//! that is not a form `POST` decodes to [`TodoAction::Render`].
//!
//! # Examples
//!
//! ```ignore
//! async fn handler(
//!     DocumentUri(uri): DocumentUri,
//!     FormAction(action): FormAction,
//! ) -> Response {
//!     tracing::info!(uri = %uri, action = action.name(), "Processing request");
//!     // ...
//! }
//! ```

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, OriginalUri, Request},
    http::{request::Parts, Method},
    Form,
};
use sample_todo_core::{TodoAction, TodoForm};
use std::convert::Infallible;

/// Path of the current request, without query string.
///
/// Taken from [`OriginalUri`] so it is still the full path inside nested
/// routers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentUri(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for DocumentUri
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let path = parts
            .extensions
            .get::<OriginalUri>()
            .map_or_else(|| parts.uri.path(), |original| original.0.path());

        Ok(Self(path.to_string()))
    }
}

/// The action selected by a request's form body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormAction(pub TodoAction);

#[async_trait]
impl<S> FromRequest<S> for FormAction
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if req.method() != Method::POST {
            return Ok(Self(TodoAction::Render));
        }

        let form: TodoForm = match Form::<Vec<(String, String)>>::from_request(req, state).await {
            Ok(Form(pairs)) => pairs.into_iter().collect(),
            Err(rejection) => {
                tracing::debug!(%rejection, "Form body not decodable, treating as empty");
                TodoForm::default()
            }
        };

        Ok(Self(TodoAction::from_form(&form)))
    }
}
