//! Error types for changelog-core

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for changelog-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in changelog-core
///
/// A missing project or version is never an error; lookups return
/// `Option` or an empty slice instead.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// I/O failure tied to a specific path
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A document could not be parsed into the project shape
    #[error("Parse error in {}: {message}", path.display())]
    Parse {
        /// Offending document
        path: PathBuf,
        /// What went wrong
        message: String,
    },

    /// JSON error without a known source path
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },
}

impl Error {
    /// Wrap an I/O error with the path that caused it.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a new parse error for a document.
    pub fn parse<S: Into<String>>(path: impl AsRef<Path>, message: S) -> Self {
        Error::Parse {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Path associated with this error, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Error::Io { path, .. } | Error::Parse { path, .. } => Some(path),
            Error::Json(_) | Error::Config { .. } => None,
        }
    }
}
