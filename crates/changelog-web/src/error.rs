//! Error types for changelog-web

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

/// Result type alias for changelog-web operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in changelog-web
///
/// Missing projects and versions are not errors; handlers render a 404
/// placeholder for those directly.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from changelog-core
    #[error("Core error: {0}")]
    Core(#[from] changelog_core::Error),

    /// Template rendering failed
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// Binding or serving failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("<!DOCTYPE html><title>Error</title><h1>Something went wrong</h1>"),
        )
            .into_response()
    }
}
