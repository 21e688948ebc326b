//! Configuration management trait.
//!
//! Implemented by the application's config type so the generic `config`
//! subcommands (`path`, `get`, `set`, `init`, `export`) can work with it.

use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{Error, Result};

/// A TOML-backed configuration with environment overrides.
pub trait ConfigManager: Default + Serialize + DeserializeOwned + Sized {
    /// Short project name; used for the config directory and env prefix.
    fn project_name() -> &'static str;

    /// Load configuration: defaults, then file (if present), then env.
    fn load(config_path: Option<&str>) -> Result<Self>;

    /// Export the effective configuration as `(NAME, value)` pairs.
    fn to_env_vars(&self) -> Result<Vec<(String, String)>>;

    /// Env var holding an explicit config file path, e.g. `CHANGELOG_CONFIG`.
    fn config_env_var() -> String {
        format!("{}_CONFIG", env_prefix(Self::project_name()))
    }

    /// `<platform config dir>/<project>/config.toml`.
    fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(Self::project_name()).join("config.toml"))
    }

    /// Explicit path, else the config env var, else the default path.
    fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }
        if let Ok(path) = std::env::var(Self::config_env_var()) {
            if !path.is_empty() {
                return Some(PathBuf::from(path));
            }
        }
        Self::default_config_path()
    }

    /// Serialize as pretty TOML.
    fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Parse from TOML text.
    fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(e.to_string()))
    }
}

/// Convert a project name to an environment variable prefix:
/// `"my-app"` becomes `"MY_APP"`.
pub fn env_prefix(project_name: &str) -> String {
    project_name.to_uppercase().replace(['-', ' '], "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    struct TestConfig {
        name: String,
        port: u16,
    }

    impl ConfigManager for TestConfig {
        fn project_name() -> &'static str {
            "test-app"
        }

        fn load(_config_path: Option<&str>) -> Result<Self> {
            Ok(Self::default())
        }

        fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
            Ok(vec![("TEST_APP_PORT".to_string(), self.port.to_string())])
        }
    }

    #[test]
    fn test_env_prefix() {
        assert_eq!(env_prefix("changelog"), "CHANGELOG");
        assert_eq!(env_prefix("my-app"), "MY_APP");
        assert_eq!(env_prefix("my app"), "MY_APP");
    }

    #[test]
    fn test_config_env_var() {
        assert_eq!(TestConfig::config_env_var(), "TEST_APP_CONFIG");
    }

    #[test]
    fn test_resolve_explicit_path_wins() {
        let path = TestConfig::resolve_config_path(Some("/tmp/x.toml"));
        assert_eq!(path, Some(PathBuf::from("/tmp/x.toml")));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = TestConfig {
            name: "demo".to_string(),
            port: 8080,
        };
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("port = 8080"));
        assert_eq!(TestConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_from_toml_str_error_is_config() {
        let err = TestConfig::from_toml_str("port = \"nope\"").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
