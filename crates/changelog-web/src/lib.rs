//! # changelog-web
//!
//! HTTP front end for the changelog catalog.
//!
//! - Server-rendered pages: project list with search, per-project release
//!   history, per-release detail with a media lightbox
//! - Read-only JSON API under `/api`
//! - Embedded stylesheet and script, optional static directory
//!
//! ```no_run
//! # async fn run() -> changelog_web::Result<()> {
//! let (server, _stats) = changelog_web::Server::load("data/changelogs".as_ref()).await?;
//! server.serve().await
//! # }
//! ```

#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod api;
pub mod assets;
pub mod error;
pub mod lightbox;
pub mod routes;
pub mod server;
pub mod state;
pub mod views;

pub use error::{Error, Result};
pub use lightbox::Lightbox;
pub use routes::router;
pub use server::{Server, ServerConfig};
pub use state::{AppState, SiteSettings};
