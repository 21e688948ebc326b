//! Error types for changelog-cli

use thiserror::Error;

/// Result type alias for changelog-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in changelog-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from changelog-core
    #[error(transparent)]
    Core(#[from] changelog_core::Error),

    /// Error from changelog-web
    #[error(transparent)]
    Web(#[from] changelog_web::Error),

    /// JSON output failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing to stdout failed
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),

    /// A requested project or version does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// `validate` found documents that did not load
    #[error("{count} document(s) failed to load")]
    LoadFailed {
        /// Number of failed documents
        count: usize,
    },
}
