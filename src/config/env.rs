//! Environment variable configuration
//!
//! Provides environment variable overrides for configuration.

use std::env;

use super::AppConfig;

/// Environment variable prefix
const ENV_PREFIX: &str = "KONG_ADMIN";

/// Configuration overrides from environment variables
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnvConfig {
    /// Admin API URL from KONG_ADMIN_URL
    pub admin_url: Option<String>,
    /// Timeout from KONG_ADMIN_TIMEOUT
    pub timeout: Option<u64>,
    /// Output format from KONG_ADMIN_FORMAT
    pub format: Option<String>,
    /// Config file from KONG_ADMIN_CONFIG
    pub config_file: Option<String>,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| {
            lookup(&format!("{ENV_PREFIX}_{name}"))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            admin_url: get("URL"),
            timeout: get("TIMEOUT").and_then(|v| v.parse().ok()),
            format: get("FORMAT"),
            config_file: get("CONFIG"),
        }
    }

    /// Check if any environment variables are set
    pub fn has_any(&self) -> bool {
        self.admin_url.is_some()
            || self.timeout.is_some()
            || self.format.is_some()
            || self.config_file.is_some()
    }

    /// Overlay the set variables onto `config`
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(url) = &self.admin_url {
            config.admin_url = url.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = Some(timeout);
        }
        if let Some(format) = &self.format {
            config.format = format.clone();
        }
    }
}

/// Help text listing the supported variables
pub fn env_help() -> String {
    [
        format!("  {ENV_PREFIX}_URL       Kong Admin API base URL"),
        format!("  {ENV_PREFIX}_TIMEOUT   Request timeout in seconds"),
        format!("  {ENV_PREFIX}_FORMAT    Output format (table, json, json-pretty, csv)"),
        format!("  {ENV_PREFIX}_CONFIG    Path to configuration file"),
    ]
    .join("\n")
}
