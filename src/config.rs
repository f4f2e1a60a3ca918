//! Configuration management for MediBuddy
//!
//! Provides TOML-based configuration with defaults and validation.
//! Location: ~/.medibuddy/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::errors::{ChatError, Result};
use crate::models::client::DEFAULT_ENDPOINT;
use crate::pipeline::model::DEFAULT_MAX_LENGTH;
use crate::pipeline::ResponderMode;

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub responder: ResponderConfig,
    pub model: ModelConfig,
    pub language: LanguageConfig,
    pub display: DisplayConfig,
}

/// Responder selection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ResponderConfig {
    pub mode: ResponderMode,
}

/// Text-generation service settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ModelConfig {
    pub endpoint: String,
    /// Environment variable holding the bearer token
    pub token_env: String,
    pub max_length: u32,
    pub timeout_secs: u64,
}

/// Language detection settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LanguageConfig {
    pub fallback: String,
}

/// Terminal display settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub show_annotations: bool,
    pub color_output: bool,
    pub history_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            responder: ResponderConfig::default(),
            model: ModelConfig::default(),
            language: LanguageConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            mode: ResponderMode::Keyword,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token_env: "HF_API_TOKEN".to_string(),
            max_length: DEFAULT_MAX_LENGTH,
            timeout_secs: 60,
        }
    }
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            fallback: "en".to_string(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_annotations: true,
            color_output: true,
            history_file: "~/.medibuddy_history".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(config_path)
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ChatError::ConfigError(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| ChatError::ConfigError(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load from the standard location, or built-in defaults if absent
    pub fn load_default() -> Result<Self> {
        if let Some(config_path) = Self::default_path() {
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }
        }

        Ok(Config::default())
    }

    /// Standard config path
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".medibuddy").join("config.toml"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.model.max_length == 0 {
            return Err(ChatError::ConfigError(
                "max_length must be greater than 0".to_string(),
            ));
        }

        if self.model.timeout_secs == 0 {
            return Err(ChatError::ConfigError(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.responder.mode == ResponderMode::Model && self.model.endpoint.trim().is_empty() {
            return Err(ChatError::ConfigError(
                "model endpoint is required in model mode".to_string(),
            ));
        }

        if self.language.fallback.trim().is_empty() {
            return Err(ChatError::ConfigError(
                "fallback language must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ChatError::ConfigError(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ChatError::ConfigError(format!("Failed to create config dir: {}", e)))?;
        }

        std::fs::write(path, contents)
            .map_err(|e| ChatError::ConfigError(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Model request timeout
    pub fn model_timeout(&self) -> Duration {
        Duration::from_secs(self.model.timeout_secs)
    }

    /// Bearer token from the configured environment variable
    pub fn api_token(&self) -> Option<String> {
        std::env::var(&self.model.token_env)
            .ok()
            .filter(|t| !t.trim().is_empty())
    }

    /// Expand tilde in paths
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    /// Readline history file path
    pub fn history_path(&self) -> PathBuf {
        Self::expand_path(&self.display.history_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.responder.mode, ResponderMode::Keyword);
        assert_eq!(config.model.max_length, 200);
        assert_eq!(config.language.fallback, "en");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_zero_max_length() {
        let mut config = Config::default();
        config.model.max_length = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let mut config = Config::default();
        config.model.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_model_mode_needs_endpoint() {
        let mut config = Config::default();
        config.model.endpoint = "  ".to_string();
        assert!(config.validate().is_ok());

        config.responder.mode = ResponderMode::Model;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_empty_fallback() {
        let mut config = Config::default();
        config.language.fallback = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("[responder]\nmode = \"model\"\n").unwrap();
        assert_eq!(config.responder.mode, ResponderMode::Model);
        assert_eq!(config.model.endpoint, DEFAULT_ENDPOINT);
        assert!(config.display.show_annotations);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.responder.mode = ResponderMode::Model;
        config.model.max_length = 64;
        config.save(&path).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[model]\nmax_length = 0\n").unwrap();
        assert!(Config::load_from_file(&path).is_err());

        std::fs::write(&path, "not = [valid").unwrap();
        assert!(Config::load_from_file(&path).is_err());
    }

    #[test]
    fn test_expand_path() {
        assert!(!Config::expand_path("~/.medibuddy").to_string_lossy().contains('~'));
        assert_eq!(Config::expand_path("/abs/path"), PathBuf::from("/abs/path"));
    }

    #[test]
    fn test_model_timeout() {
        let config = Config::default();
        assert_eq!(config.model_timeout(), Duration::from_secs(60));
    }
}
