//! Configuration loading and validation.
//!
//! JSON5 on disk, camelCase keys.
//! Config location: `~/.pianoteq/pianoteq.json`

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding the state directory.
pub const STATE_DIR_ENV: &str = "PIANOTEQ_STATE_DIR";

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON5 parsing error.
    #[error("Parse error: {0}")]
    Parse(#[from] json5::Error),

    /// Config validation error.
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Pianoteq server connection.
    #[serde(default)]
    pub server: ServerConfig,

    /// Local favorites storage.
    #[serde(default)]
    pub favorites: FavoritesConfig,

    /// Global settings.
    #[serde(default)]
    pub settings: GlobalSettings,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns error if config cannot be loaded or parsed.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read, parsed, or validated.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = json5::from_str(&content)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Save configuration to a path.
    ///
    /// # Errors
    ///
    /// Returns error if serialization or file write fails.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::Validation(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default config file path.
    #[must_use]
    pub fn default_path() -> PathBuf {
        Self::state_dir().join("pianoteq.json")
    }

    /// Get the state directory.
    ///
    /// Uses `PIANOTEQ_STATE_DIR` env var if set, otherwise `~/.pianoteq`.
    #[must_use]
    pub fn state_dir() -> PathBuf {
        if let Ok(dir) = std::env::var(STATE_DIR_ENV) {
            PathBuf::from(dir)
        } else if let Some(home) = dirs::home_dir() {
            home.join(".pianoteq")
        } else {
            PathBuf::from(".pianoteq")
        }
    }

    /// Path of the favorites file, honouring the configured override.
    #[must_use]
    pub fn favorites_path(&self) -> PathBuf {
        self.favorites
            .path
            .clone()
            .unwrap_or_else(|| Self::state_dir().join("favorites.json"))
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] for an unusable base URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.server.base_url.trim();
        if url.is_empty() {
            return Err(ConfigError::Validation(
                "Server base URL cannot be empty".to_string(),
            ));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "Server base URL '{url}' must start with http:// or https://"
            )));
        }
        Ok(())
    }
}

/// Pianoteq server connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    /// Server root URL (the JSON-RPC endpoint is `<baseUrl>/jsonrpc`).
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8081".to_string()
}

/// Favorites storage settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoritesConfig {
    /// Favorites file override.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Global settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSettings {
    /// Enable debug logging.
    #[serde(default)]
    pub debug: bool,

    /// Log format.
    #[serde(default)]
    pub log_format: LogFormat,
}

/// Log format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format.
    #[default]
    Pretty,
    /// JSON format.
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.base_url, "http://127.0.0.1:8081");
        assert_eq!(config.settings.log_format, LogFormat::Pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nested").join("pianoteq.json");

        let mut config = Config::default();
        config.server.base_url = "http://192.168.86.66:8081".to_string();
        config.settings.debug = true;

        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_json5_parsing() {
        let json5_content = r#"{
            // Living room Raspberry Pi
            server: {
                baseUrl: "http://pianopi.local:8081",
            },
            settings: { logFormat: "json" },
        }"#;

        let config: Config = json5::from_str(json5_content).unwrap();
        assert_eq!(config.server.base_url, "http://pianopi.local:8081");
        assert_eq!(config.settings.log_format, LogFormat::Json);
        assert!(config.favorites.path.is_none());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        config.server.base_url = String::new();
        assert!(config.validate().is_err());

        config.server.base_url = "pianopi.local:8081".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("pianoteq.json");
        std::fs::write(&path, r#"{ server: { baseUrl: "ftp://x" } }"#).unwrap();
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_favorites_path_override() {
        let mut config = Config::default();
        assert!(config.favorites_path().ends_with("favorites.json"));

        config.favorites.path = Some(PathBuf::from("/tmp/favs.json"));
        assert_eq!(config.favorites_path(), PathBuf::from("/tmp/favs.json"));
    }
}
