//! Configuration module
//!
//! Handles loading and layering configuration: config file, then
//! `KONG_ADMIN_*` environment variables, then command-line flags.

mod env;
mod file;

pub use env::{env_help, EnvConfig};
pub use file::{expand_path, find_config_file, is_yaml_file};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default Kong Admin API address
pub const DEFAULT_ADMIN_URL: &str = "http://localhost:8001";

/// Application configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Kong Admin API base URL
    pub admin_url: String,

    /// Request timeout in seconds; transport default when unset
    pub timeout_secs: Option<u64>,

    /// User-Agent sent with every request
    pub user_agent: String,

    /// CLI output format (table, json, json-pretty, csv)
    pub format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            admin_url: DEFAULT_ADMIN_URL.to_string(),
            timeout_secs: None,
            user_agent: concat!("kong-admin/", env!("CARGO_PKG_VERSION")).to_string(),
            format: "table".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = if is_yaml_file(path) {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        };

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if is_yaml_file(path) {
            serde_yaml::to_string(self).context("Failed to serialize config")?
        } else {
            serde_json::to_string_pretty(self).context("Failed to serialize config")?
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Resolve configuration from an explicit file, `KONG_ADMIN_CONFIG`, or
    /// the standard locations, then apply environment overrides
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let env = EnvConfig::load();

        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| env.config_file.as_ref().map(PathBuf::from))
            .or_else(find_config_file);

        let mut config = match path {
            Some(path) => {
                tracing::debug!("Loading config from {}", path.display());
                Self::load(path)?
            }
            None => Self::default(),
        };

        if env.has_any() {
            tracing::debug!("Applying KONG_ADMIN_* environment overrides");
        }
        env.apply(&mut config);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.admin_url, "http://localhost:8001");
        assert_eq!(config.timeout_secs, None);
        assert!(config.user_agent.starts_with("kong-admin/"));
        assert_eq!(config.format, "table");
    }

    #[test]
    fn test_save_load_yaml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let config = AppConfig {
            admin_url: "http://kong:8001".to_string(),
            timeout_secs: Some(5),
            ..Default::default()
        };
        config.save(&path).unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_partial_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"admin_url": "https://kong.internal:8444"}"#).unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded.admin_url, "https://kong.internal:8444");
        assert_eq!(loaded.format, "table");
    }

    #[test]
    fn test_load_invalid_yaml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yml");
        std::fs::write(&path, "admin_url: [unterminated").unwrap();

        let err = AppConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse YAML config"));
    }

    #[test]
    fn test_resolve_explicit_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("explicit.yaml");
        std::fs::write(&path, "admin_url: http://explicit:8001\n").unwrap();

        let config = AppConfig::resolve(Some(&path)).unwrap();
        // KONG_ADMIN_URL may override the file in a developer shell
        if std::env::var("KONG_ADMIN_URL").is_err() {
            assert_eq!(config.admin_url, "http://explicit:8001");
        }
    }
}
