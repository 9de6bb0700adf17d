//! Configuration management for scanner sessions.
//!
//! Stores configuration in JSON format at `~/.codescanner/config.json`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};
use crate::ports::ConfigRepository;

/// Configuration data stored in JSON format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Code type assigned to input lines without a type prefix.
    #[serde(default = "default_code_type", rename = "defaultCodeType")]
    pub default_code_type: char,

    /// Separator between the type prefix and the text of an input line.
    #[serde(default = "default_type_separator", rename = "typeSeparator")]
    pub type_separator: char,

    /// Open the scanner port as soon as a session starts.
    #[serde(default = "default_true", rename = "autoEnable")]
    pub auto_enable: bool,

    /// Print scanned codes as JSON lines.
    #[serde(default, rename = "jsonOutput")]
    pub json_output: bool,
}

fn default_code_type() -> char {
    'A'
}

fn default_type_separator() -> char {
    ':'
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_code_type: default_code_type(),
            type_separator: default_type_separator(),
            auto_enable: true,
            json_output: false,
        }
    }
}

/// Configuration store for managing scanner settings.
///
/// Handles reading and writing configuration to `~/.codescanner/config.json`.
pub struct ConfigStore {
    /// Path to the configuration file.
    config_path: PathBuf,
}

impl ConfigStore {
    /// Create a new config store with the default path.
    ///
    /// Default path: `~/.codescanner/config.json`
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))?;

        let config_path = home.join(".codescanner").join("config.json");

        Ok(Self { config_path })
    }

    /// Create a config store with a custom path.
    pub fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Path of the configuration file.
    pub fn path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Load configuration from disk.
    ///
    /// Returns default config if the file doesn't exist.
    pub async fn load(&self) -> Result<Config> {
        if !fs::try_exists(&self.config_path).await? {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&self.config_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub async fn save(&self, config: &Config) -> Result<()> {
        if let Some(config_dir) = self.config_path.parent() {
            fs::create_dir_all(config_dir)
                .await
                .map_err(|e| Error::Config(format!("Failed to create config directory: {}", e)))?;
        }

        let content = serde_json::to_string_pretty(config)?;

        // Write atomically by writing to temp file then renaming
        let temp_path = self.config_path.with_extension("json.tmp");

        let mut file = fs::File::create(&temp_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to create temp config file: {}", e)))?;

        file.write_all(content.as_bytes())
            .await
            .map_err(|e| Error::Config(format!("Failed to write config: {}", e)))?;

        file.sync_all()
            .await
            .map_err(|e| Error::Config(format!("Failed to sync config: {}", e)))?;

        fs::rename(&temp_path, &self.config_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to rename config file: {}", e)))?;

        Ok(())
    }

    async fn update(&self, apply: impl FnOnce(&mut Config)) -> Result<()> {
        let mut config = self.load().await?;
        apply(&mut config);
        self.save(&config).await
    }
}

impl ConfigRepository for ConfigStore {
    async fn get_default_code_type(&self) -> Result<char> {
        Ok(self.load().await?.default_code_type)
    }

    async fn set_default_code_type(&self, code_type: char) -> Result<()> {
        if code_type.is_whitespace() || code_type.is_control() {
            return Err(Error::Config(format!(
                "Invalid code type {:?}",
                code_type
            )));
        }
        self.update(|c| c.default_code_type = code_type).await
    }

    async fn get_type_separator(&self) -> Result<char> {
        Ok(self.load().await?.type_separator)
    }

    async fn set_type_separator(&self, separator: char) -> Result<()> {
        if separator.is_whitespace() || separator.is_control() {
            return Err(Error::Config(format!(
                "Invalid type separator {:?}",
                separator
            )));
        }
        self.update(|c| c.type_separator = separator).await
    }

    async fn get_auto_enable(&self) -> Result<bool> {
        Ok(self.load().await?.auto_enable)
    }

    async fn set_auto_enable(&self, enabled: bool) -> Result<()> {
        self.update(|c| c.auto_enable = enabled).await
    }

    async fn get_json_output(&self) -> Result<bool> {
        Ok(self.load().await?.json_output)
    }

    async fn set_json_output(&self, enabled: bool) -> Result<()> {
        self.update(|c| c.json_output = enabled).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn test_store() -> (ConfigStore, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        (ConfigStore::with_path(path), dir)
    }

    #[tokio::test]
    async fn test_load_nonexistent() {
        let (store, _dir) = test_store();
        let config = store.load().await.unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.default_code_type, 'A');
        assert!(config.auto_enable);
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let (store, _dir) = test_store();

        let config = Config {
            default_code_type: 'Q',
            type_separator: '|',
            auto_enable: false,
            json_output: true,
        };
        store.save(&config).await.unwrap();

        assert_eq!(store.load().await.unwrap(), config);
        assert!(!store.path().with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_missing_fields_use_defaults() {
        let (store, _dir) = test_store();
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), r#"{"jsonOutput": true}"#).unwrap();

        let config = store.load().await.unwrap();
        assert!(config.json_output);
        assert_eq!(config.type_separator, ':');
        assert!(config.auto_enable);
    }

    #[tokio::test]
    async fn test_invalid_json_is_config_error() {
        let (store, _dir) = test_store();
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "not json").unwrap();

        assert!(matches!(store.load().await, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_repository_setters() {
        let (store, _dir) = test_store();

        store.set_default_code_type('B').await.unwrap();
        store.set_type_separator('=').await.unwrap();
        store.set_auto_enable(false).await.unwrap();
        store.set_json_output(true).await.unwrap();

        assert_eq!(store.get_default_code_type().await.unwrap(), 'B');
        assert_eq!(store.get_type_separator().await.unwrap(), '=');
        assert!(!store.get_auto_enable().await.unwrap());
        assert!(store.get_json_output().await.unwrap());
    }

    #[tokio::test]
    async fn test_rejects_whitespace_separator() {
        let (store, _dir) = test_store();
        assert!(store.set_type_separator(' ').await.is_err());
        assert!(store.set_default_code_type('\n').await.is_err());
        assert_eq!(store.get_type_separator().await.unwrap(), ':');
    }
}
