//! CLI configuration management

use lsk_api::ClientConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::CliError;

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Log filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Client settings
    #[serde(default)]
    pub client: ClientConfig,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            client: ClientConfig::default(),
        }
    }
}

impl CliConfig {
    /// Get the config directory path
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".lsk"))
    }

    /// Get the default config file path
    pub fn default_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }

    /// Resolve the config file path
    pub fn resolve_path(path: Option<&Path>) -> Result<PathBuf, CliError> {
        match path {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::default_path()
                .ok_or_else(|| CliError::Config("Cannot determine config path".to_string())),
        }
    }

    /// Load config from `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, CliError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)
            .map_err(|e| CliError::Config(format!("{}: {}", path.display(), e)))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to `path`
    pub fn save(&self, path: &Path) -> Result<(), CliError> {
        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String, CliError> {
        toml::to_string_pretty(self).map_err(|e| CliError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = CliConfig::default();
        assert_eq!(config.log_level, "warn");
        assert!(config.client.random_peer());
        assert_eq!(config.client.peers.mainnet[0], "hub21.lisk.io");
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_config_deserialize() {
        let toml = r#"
            log_level = "debug"

            [client]
            node = "localhost"
            port = 7000
            testnet = true

            [client.peers]
            testnet = ["localhost", "testnet"]
        "#;
        let config: CliConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.client.node.as_deref(), Some("localhost"));
        assert_eq!(config.client.effective_port(), Some(7000));
        assert_eq!(config.client.peers.testnet.len(), 2);
        // unspecified lists keep their defaults
        assert_eq!(config.client.peers.mainnet.len(), 8);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = CliConfig::default();
        config.client.node = Some("localhost".to_string());
        config.client.banned_peers = vec!["hub21.lisk.io".to_string()];
        config.save(&path).unwrap();

        assert_eq!(CliConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "client = 5").unwrap();
        assert!(matches!(CliConfig::load(&path), Err(CliError::Config(_))));
    }
}
