//! Configuration management for cmdhist
//!
//! Handles loading, validating and saving the JSON configuration file that
//! controls which fields are displayed, how history lines are decoded and
//! how listings are ordered.

use crate::error::{Error, Result};
use crate::field::Field;
use crate::record::DecodeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::path::PathBuf;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = ".cmdhist.json";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Field names shown after the id when rendering
    pub visible_fields: Vec<String>,

    /// How malformed history lines are handled
    pub decode_mode: DecodeMode,

    /// Listing behaviour
    pub list: ListConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Defaults for the `list` command
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Drop repeated commands, keeping the first
    pub unique: bool,

    /// Show newest entries first
    pub reverse: bool,

    /// Sort by timestamp before other operations
    pub sort: bool,
}

/// Configuration for logging
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            visible_fields: vec![
                "Date".to_string(),
                "Command".to_string(),
                "Dir".to_string(),
            ],
            decode_mode: DecodeMode::Strict,
            list: ListConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            unique: true,
            reverse: true,
            sort: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path, falling back to defaults if absent
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a specific path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;

        Ok(())
    }

    /// Get the default configuration file path
    pub fn default_config_path() -> Result<PathBuf> {
        let home = home::home_dir().ok_or(Error::HomeDirectoryNotFound)?;
        Ok(home.join(DEFAULT_CONFIG_FILE))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if let Err(e) = Field::parse_list(&self.visible_fields) {
            return Err(Error::config_validation(
                "visible_fields".to_string(),
                e.to_string(),
            ));
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(Error::config_validation(
                    "logging.level",
                    "must be one of: trace, debug, info, warn, error",
                ));
            }
        }

        Ok(())
    }

    /// The configured visible fields, parsed
    pub fn visible_fields(&self) -> Result<Vec<Field>> {
        Field::parse_list(&self.visible_fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.decode_mode, DecodeMode::Strict);
        assert!(config.list.unique);
        assert!(config.list.reverse);
        assert_eq!(
            config.visible_fields().unwrap(),
            vec![Field::Date, Field::Command, Field::Dir]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        config.visible_fields.push("Bogus".to_string());
        let err = config.validate().unwrap_err();
        assert_eq!(err.category(), "config");

        config.visible_fields.pop();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_save_load() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("nested").join(DEFAULT_CONFIG_FILE);

        let mut config = Config::default();
        config.visible_fields = vec!["Time".to_string(), "Command".to_string()];
        config.decode_mode = DecodeMode::Tolerant;
        config.list.sort = true;

        config.save_to_path(&config_path).unwrap();
        let loaded = Config::load_from_path(&config_path).unwrap();

        assert_eq!(loaded.visible_fields, config.visible_fields);
        assert_eq!(loaded.decode_mode, DecodeMode::Tolerant);
        assert!(loaded.list.sort);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from_path(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config.visible_fields.len(), 3);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, r#"{ "decode_mode": "tolerant" }"#).unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.decode_mode, DecodeMode::Tolerant);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, r#"{ "visible_fields": ["Nope"] }"#).unwrap();

        assert!(Config::load_from_path(&path).is_err());
    }
}
