//! Changelog Core: data model, document loader, and lookup service.
//!
//! This crate has no internal dependencies. The web and CLI crates build on
//! the [`Catalog`] it produces.
//!
//! # Modules
//!
//! - [`model`]: Project, Version, Change and their extras
//! - [`loader`]: Discover and parse project documents into a catalog
//! - [`catalog`]: Read-only lookups (project, version, latest, list)
//! - [`search`]: Case-insensitive project filter
//! - [`validate`]: Non-fatal data-quality diagnostics
//! - [`traits`]: Configuration management trait
//! - [`error`]: Error types and Result alias

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod loader;
pub mod model;
pub mod search;
pub mod traits;
pub mod validate;

// Re-export key types at crate root for convenience
pub use catalog::Catalog;
pub use error::{Error, Result};
pub use loader::{ErrorHandling, LoadStats, Loader};
pub use model::{Change, ChangeKind, Credit, DownloadLink, MediaItem, MediaKind, Project, Version};
pub use traits::ConfigManager;
pub use validate::{Diagnostic, validate_catalog};
