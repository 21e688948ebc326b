//! Application configuration.
//!
//! Layered as defaults, then the TOML file, then `CHANGELOG_*` environment
//! variables. Command-line flags are applied last by the caller.

use std::path::PathBuf;

use changelog_core::traits::env_prefix;
use changelog_core::{ConfigManager, Error, Result};
use changelog_web::server::{DEFAULT_HOST, DEFAULT_PORT};
use changelog_web::state::DEFAULT_DEBOUNCE_MS;
use changelog_web::{ServerConfig, SiteSettings};
use serde::{Deserialize, Serialize};

/// Default data directory, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "data/changelogs";

/// Default tracing filter when neither `RUST_LOG` nor `-v` is given.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Top-level configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Directory of project documents.
    pub data_dir: PathBuf,
    /// Tracing filter directive.
    pub log_filter: String,
    /// HTTP listener.
    pub server: ServerSection,
    /// Search box behaviour.
    pub search: SearchSection,
}

/// `[server]`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Host to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Directory served under `/static`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<PathBuf>,
}

/// `[search]`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSection {
    /// Delay before the search box re-filters.
    pub debounce_ms: u64,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            server: ServerSection::default(),
            search: SearchSection::default(),
        }
    }
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            static_dir: None,
        }
    }
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl ChangelogConfig {
    fn var(suffix: &str) -> String {
        format!("{}_{suffix}", env_prefix(Self::project_name()))
    }

    /// Apply `CHANGELOG_*` overrides from `vars`. Empty values are ignored.
    pub fn apply_env<I>(&mut self, vars: I) -> Result<()>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let data_dir = Self::var("DATA_DIR");
        let host = Self::var("HOST");
        let port = Self::var("PORT");
        let static_dir = Self::var("STATIC_DIR");
        let log = Self::var("LOG");

        for (key, value) in vars {
            if value.is_empty() {
                continue;
            }
            if key == data_dir {
                self.data_dir = PathBuf::from(value);
            } else if key == host {
                self.server.host = value;
            } else if key == port {
                self.server.port = value
                    .parse()
                    .map_err(|_| Error::config(format!("{port} must be a port number, got '{value}'")))?;
            } else if key == static_dir {
                self.server.static_dir = Some(PathBuf::from(value));
            } else if key == log {
                self.log_filter = value;
            }
        }
        Ok(())
    }

    /// Listener settings for the web server.
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.server.host.clone(),
            port: self.server.port,
            static_dir: self.server.static_dir.clone(),
        }
    }

    /// Presentation settings for the web server.
    pub fn site_settings(&self) -> SiteSettings {
        SiteSettings {
            search_debounce_ms: self.search.debounce_ms,
        }
    }
}

impl ConfigManager for ChangelogConfig {
    fn project_name() -> &'static str {
        "changelog"
    }

    fn load(config_path: Option<&str>) -> Result<Self> {
        let mut config = match Self::resolve_config_path(config_path) {
            Some(path) if path.exists() => {
                let content =
                    std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
                Self::from_toml_str(&content).map_err(|e| {
                    Error::config(format!("Failed to parse {}: {e}", path.display()))
                })?
            }
            _ => Self::default(),
        };
        config.apply_env(std::env::vars())?;
        Ok(config)
    }

    fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let mut vars = vec![
            (Self::var("DATA_DIR"), self.data_dir.display().to_string()),
            (Self::var("HOST"), self.server.host.clone()),
            (Self::var("PORT"), self.server.port.to_string()),
        ];
        if let Some(dir) = &self.server.static_dir {
            vars.push((Self::var("STATIC_DIR"), dir.display().to_string()));
        }
        vars.push((Self::var("LOG"), self.log_filter.clone()));
        Ok(vars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = ChangelogConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("data/changelogs"));
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.search.debounce_ms, 300);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = ChangelogConfig::from_toml_str("[server]\nport = 9000\n").unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.data_dir, PathBuf::from("data/changelogs"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "data_dir = \"/srv/changelogs\"\n[search]\ndebounce_ms = 150\n")
            .unwrap();

        let config = ChangelogConfig::load(path.to_str()).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/changelogs"));
        assert_eq!(config.search.debounce_ms, 150);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        let config = ChangelogConfig::load(path.to_str()).unwrap();
        assert_eq!(config.server.port, ChangelogConfig::default().server.port);
    }

    #[test]
    fn test_load_malformed_file_is_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();

        let err = ChangelogConfig::load(path.to_str()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_apply_env_overrides() {
        let mut config = ChangelogConfig::default();
        config
            .apply_env(env(&[
                ("CHANGELOG_DATA_DIR", "/data"),
                ("CHANGELOG_HOST", "0.0.0.0"),
                ("CHANGELOG_PORT", "8081"),
                ("CHANGELOG_STATIC_DIR", "public"),
                ("CHANGELOG_LOG", "debug"),
                ("UNRELATED", "x"),
            ]))
            .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/data"));
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.static_dir, Some(PathBuf::from("public")));
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_apply_env_ignores_empty() {
        let mut config = ChangelogConfig::default();
        config.apply_env(env(&[("CHANGELOG_HOST", "")])).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_apply_env_bad_port() {
        let mut config = ChangelogConfig::default();
        let err = config
            .apply_env(env(&[("CHANGELOG_PORT", "eighty")]))
            .unwrap_err();
        assert!(err.to_string().contains("CHANGELOG_PORT"));
    }

    #[test]
    fn test_to_env_vars() {
        let vars = ChangelogConfig::default().to_env_vars().unwrap();
        assert!(vars.contains(&("CHANGELOG_PORT".to_string(), "3000".to_string())));
        assert!(vars.iter().all(|(k, _)| k != "CHANGELOG_STATIC_DIR"));
    }

    #[test]
    fn test_env_vars_round_trip_through_apply_env() {
        let mut source = ChangelogConfig::default();
        source.server.static_dir = Some(PathBuf::from("assets"));
        source.server.port = 4000;

        let mut target = ChangelogConfig::default();
        target.apply_env(source.to_env_vars().unwrap()).unwrap();
        assert_eq!(target, source);
    }

    #[test]
    fn test_web_settings() {
        let config = ChangelogConfig::default();
        assert_eq!(config.server_config().port, 3000);
        assert_eq!(config.site_settings().search_debounce_ms, 300);
    }
}
