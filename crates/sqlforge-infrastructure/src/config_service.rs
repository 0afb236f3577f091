//! Client configuration service.
//!
//! Loads the client configuration from `config.toml` under the sqlforge
//! config directory. Priority: environment variable > config file >
//! built-in default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sqlforge_core::error::{Result, SqlForgeError};

use crate::paths::SqlForgePaths;

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "SQLFORGE_API_URL";

const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

/// Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the SQL-generation service.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
        }
    }
}

/// Service for loading the client configuration.
pub struct ConfigService {
    config_file: PathBuf,
}

impl ConfigService {
    /// Creates a service reading the given config file.
    pub fn new(config_file: PathBuf) -> Self {
        Self { config_file }
    }

    /// Creates a service at the default location (`config.toml` under the
    /// sqlforge config directory).
    pub fn new_default() -> Result<Self> {
        let config_file = SqlForgePaths::config_file()
            .map_err(|e| SqlForgeError::config(format!("Failed to resolve config path: {}", e)))?;
        Ok(Self::new(config_file))
    }

    /// Loads the configuration.
    ///
    /// A missing file yields the defaults; a present but malformed file is
    /// a configuration error (silently ignoring it would send requests to
    /// the wrong host). The `SQLFORGE_API_URL` environment variable takes
    /// precedence over both.
    pub fn load(&self) -> Result<ClientConfig> {
        let mut config = self.load_file(&self.config_file)?;

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.api_base_url = url;
            }
        }

        Ok(config)
    }

    fn load_file(&self, path: &Path) -> Result<ClientConfig> {
        match std::fs::read_to_string(path) {
            Ok(raw) => {
                let config = toml::from_str(&raw)?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ClientConfig::default()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let service = ConfigService::new(dir.path().join("config.toml"));
        let config = service.load_file(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn file_overrides_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_base_url = \"http://10.0.0.5:9000\"\n").unwrap();

        let service = ConfigService::new(path.clone());
        let config = service.load_file(&path).unwrap();
        assert_eq!(config.api_base_url, "http://10.0.0.5:9000");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_base_url = [").unwrap();

        let service = ConfigService::new(path.clone());
        assert!(service.load_file(&path).is_err());
    }
}
