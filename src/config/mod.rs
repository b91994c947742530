//! Configuration module for hubterm.
//!
//! Handles loading and parsing the .hubtermrc configuration file.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::credentials::CredentialStorage;
use crate::logging::{DEFAULT_LOG_RETENTION_HOURS, LogConfig, LogLevel};

/// Default .hubtermrc file content with all settings documented.
const DEFAULT_HUBTERMRC: &str = r#"# hubterm Configuration File
# ===========================
# This file is read on application startup.
# Lines starting with '#' are comments.
#
# Connect Trigger
# ---------------
# true:  show a full "Connect" button next to the device
# false: show a compact console icon with an "Open console" menu item
# enable_connect_button = true

# Saved Keys
# ----------
# TOML file holding the private keys offered on the Public Key tab.
# Manage it with: hubterm --add-key NAME FILE / --remove-key NAME
# credentials_file = ~/.hubterm/keys.toml

# Logging Configuration
# ---------------------
# Logs are stored in ~/.hubterm/logs/ with automatic cleanup.
#
# log_enabled = true       # Enable/disable file logging (true/false)
# log_level = info         # Log level: trace, debug, info, warn, error, off
# log_retention = 24       # Hours to keep log files (default: 24)
"#;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Full connect button (true) or console icon + menu item (false).
    pub enable_connect_button: bool,
    /// Path to the saved keys file.
    pub credentials_path: PathBuf,
    /// Path to config file.
    pub config_path: PathBuf,
    /// Logging configuration.
    pub log_config: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enable_connect_button: true,
            credentials_path: CredentialStorage::default_path(),
            config_path: Self::default_config_path(),
            log_config: LogConfig::default(),
        }
    }
}

impl Config {
    /// Returns the default config file path (~/.hubtermrc).
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".hubtermrc")
    }

    /// Loads configuration from the default path, creating it if it doesn't exist.
    ///
    /// # Errors
    /// Returns error if config cannot be read or created.
    pub fn load() -> io::Result<Self> {
        Self::load_from(&Self::default_config_path())
    }

    /// Loads configuration from a specific path, creating it if it doesn't exist.
    ///
    /// # Errors
    /// Returns error if config cannot be read or created.
    pub fn load_from(path: &Path) -> io::Result<Self> {
        if !path.exists() {
            Self::create_default_config(path)?;
        }

        let content = fs::read_to_string(path)?;
        let mut config = Self {
            config_path: path.to_path_buf(),
            ..Self::default()
        };
        config.parse(&content);

        Ok(config)
    }

    /// Creates the default config file.
    fn create_default_config(path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::File::create(path)?;
        file.write_all(DEFAULT_HUBTERMRC.as_bytes())?;
        Ok(())
    }

    /// Parses the config file content.
    fn parse(&mut self, content: &str) {
        for line in content.lines() {
            let line = line.trim();

            // Skip comments and empty lines
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let value = value.trim();

                // Remove inline comments
                let value = value.split('#').next().unwrap_or(value).trim();

                self.apply_setting(key, value);
            }
        }
    }

    /// Applies a single setting. Unknown keys are ignored.
    fn apply_setting(&mut self, key: &str, value: &str) {
        match key {
            "enable_connect_button" | "connect_button" => {
                self.enable_connect_button = parse_bool(value);
            }
            "credentials_file" | "keys_file" => {
                if !value.is_empty() {
                    self.credentials_path = expand_home(value);
                }
            }
            "log_level" => {
                self.log_config.level = LogLevel::parse(value);
            }
            "log_retention" | "log_retention_hours" => {
                self.log_config.retention_hours =
                    value.parse().unwrap_or(DEFAULT_LOG_RETENTION_HOURS);
            }
            "log_enabled" | "logging" => {
                self.log_config.enabled = parse_bool(value);
            }
            _ => {
                tracing::debug!("Ignoring unknown setting '{}'", key);
            }
        }
    }
}

/// Parses a boolean setting.
fn parse_bool(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "yes" | "1" | "on")
}

/// Expands a leading `~/` to the home directory.
fn expand_home(value: &str) -> PathBuf {
    match value.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(rest),
        None => PathBuf::from(value),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_file_is_created_and_parses_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".hubtermrc");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(
            config,
            Config {
                config_path: path.clone(),
                ..Config::default()
            }
        );
    }

    #[test]
    fn test_settings_are_applied() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".hubtermrc");
        fs::write(
            &path,
            "enable_connect_button = false # compact\n\
             credentials_file = /tmp/keys.toml\n\
             log_level = DEBUG\n\
             log_retention = 48\n\
             log_enabled = no\n\
             unknown = whatever\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(!config.enable_connect_button);
        assert_eq!(config.credentials_path, PathBuf::from("/tmp/keys.toml"));
        assert_eq!(config.log_config.level, LogLevel::Debug);
        assert_eq!(config.log_config.retention_hours, 48);
        assert!(!config.log_config.enabled);
    }

    #[test]
    fn test_parse_bool() {
        for value in ["true", "YES", "1", "on"] {
            assert!(parse_bool(value), "{} should be true", value);
        }
        for value in ["false", "0", "off", "maybe"] {
            assert!(!parse_bool(value), "{} should be false", value);
        }
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/abs/keys.toml"), PathBuf::from("/abs/keys.toml"));
        assert!(expand_home("~/keys.toml").ends_with("keys.toml"));
    }
}
