//! HTTP server.

use std::path::{Path, PathBuf};

use axum::Router;
use changelog_core::{Catalog, ErrorHandling, LoadStats, Loader};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::Result;
use crate::routes;
use crate::state::{AppState, SiteSettings};

/// Default bind host.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default bind port.
pub const DEFAULT_PORT: u16 = 3000;

/// Where and how to listen.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host name or address to bind.
    pub host: String,
    /// TCP port.
    pub port: u16,
    /// Optional directory served under `/static`.
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            static_dir: None,
        }
    }
}

/// Changelog HTTP server.
pub struct Server {
    catalog: Catalog,
    config: ServerConfig,
    site: SiteSettings,
}

impl Server {
    /// Serve `catalog` with default settings.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            config: ServerConfig::default(),
            site: SiteSettings::default(),
        }
    }

    /// Load every document under `dir`, skipping files that fail to parse.
    pub async fn load(dir: &Path) -> Result<(Self, LoadStats)> {
        let (catalog, stats) = Loader::new()
            .with_error_handling(ErrorHandling::Skip)
            .load(dir)
            .await?;
        Ok((Self::new(catalog), stats))
    }

    /// Set the listen configuration.
    pub fn with_config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set presentation settings.
    pub fn with_site_settings(mut self, site: SiteSettings) -> Self {
        self.site = site;
        self
    }

    /// The listen configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// The loaded catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Build the full router, consuming the server.
    pub fn into_router(self) -> Router {
        let static_dir = self.config.static_dir.clone();
        let mut app = routes::router(AppState::with_settings(self.catalog, self.site));
        if let Some(dir) = static_dir {
            app = app.nest_service("/static", ServeDir::new(dir));
        }
        app.layer(TraceLayer::new_for_http())
    }

    /// Bind and serve until ctrl-c.
    pub async fn serve(self) -> Result<()> {
        let (host, port) = (self.config.host.clone(), self.config.port);
        let listener = TcpListener::bind((host.as_str(), port)).await?;
        tracing::info!(
            addr = %listener.local_addr()?,
            projects = self.catalog.len(),
            "listening"
        );

        axum::serve(listener, self.into_router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "could not install ctrl-c handler");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use changelog_core::Project;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert!(config.static_dir.is_none());
    }

    #[test]
    fn test_builder() {
        let server = Server::new(Catalog::from_projects([Project::new("a", "A")])).with_config(
            ServerConfig {
                port: 8080,
                ..ServerConfig::default()
            },
        );
        assert_eq!(server.config().port, 8080);
        assert_eq!(server.catalog().len(), 1);
    }

    #[tokio::test]
    async fn test_load_skips_bad_files() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.json"), r#"{"slug":"a","name":"A"}"#).unwrap();
        std::fs::write(dir.path().join("b.json"), "{ nope").unwrap();

        let (server, stats) = Server::load(dir.path()).await.unwrap();
        assert_eq!(server.catalog().len(), 1);
        assert_eq!(stats.files_skipped, 1);
    }
}
