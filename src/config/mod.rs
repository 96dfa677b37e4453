//! Configuration management for adoread
//!
//! This module provides a layered configuration system that loads settings from:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use adoread::config::Config;
//!
//! let config = Config::load(None).expect("Failed to load configuration");
//! println!("Server listening on: {}", config.server.bind_addr);
//! ```
//!
//! # Environment Variables
//!
//! Configuration can be overridden using environment variables with the pattern:
//! `ADOREAD__<section>__<key>`
//!
//! Examples:
//! - `ADOREAD__SERVER__BIND_ADDR=127.0.0.1:8000`
//! - `ADOREAD__SERVER__CORS_ORIGINS=http://localhost:3000,http://localhost:5173`
//! - `ADOREAD__GENERATION__MODEL=gemini-2.5-flash`
//!
//! Provider keys are read only from `TAVILY_API_KEY` and `GOOGLE_API_KEY`
//! (`GEMINI_API_KEY` is accepted as a fallback).
//!
//! # Configuration File
//!
//! By default, the configuration is loaded from `config/adoread.toml`.
//! This can be overridden using the `ADOREAD_CONFIG` environment variable
//! or the `--config` CLI flag.

mod models;
mod sources;
mod validation;

pub use models::{
    ArticleConfig, ChatConfig, Config, GenerationProviderConfig, SearchProviderConfig,
    ServerConfig,
};
pub use validation::ValidationError;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// `path` overrides `ADOREAD_CONFIG` and the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file is malformed or a value
    /// fails validation. Missing API keys are not an error here; see
    /// [`Config::require_credentials`].
    pub fn load(path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let config = sources::load(path)?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path without reading secrets
    ///
    /// Useful for testing with custom configuration files.
    pub fn load_from_path(path: PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_from_sources(path)?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Fail unless both provider API keys are present
    pub fn require_credentials(&self) -> Result<(), ConfigError> {
        validation::validate_credentials(self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_minimal_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        fs::write(&config_path, "[server]\nbind_addr = \"127.0.0.1:8000\"\n").unwrap();

        let config = Config::load_from_path(config_path).unwrap();
        assert_eq!(config.server.bind_addr.to_string(), "127.0.0.1:8000");
        assert_eq!(config.server.cors_origins, vec!["http://localhost:3000"]);
    }

    #[test]
    fn test_validation_catches_bad_origin() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[server]
cors_origins = ["http://localhost:3000", "http://localhost:3000/adoread"]
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let result = Config::load_from_path(config_path);
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::ValidationError(ValidationError::InvalidCorsOrigin { .. })
        ));
    }

    #[test]
    fn test_malformed_duration_is_load_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        fs::write(&config_path, "[search]\ntimeout = \"soon\"\n").unwrap();

        let result = Config::load_from_path(config_path);
        assert!(matches!(result.unwrap_err(), ConfigError::LoadError(_)));
    }

    #[test]
    fn test_full_config_example() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[server]
bind_addr = "0.0.0.0:8000"
cors_origins = ["http://localhost:3000"]
max_body_bytes = 2097152

[search]
base_url = "https://api.tavily.com"
timeout = "30s"
search_depth = "basic"
max_results = 5

[generation]
base_url = "https://generativelanguage.googleapis.com"
api_version = "v1alpha"
model = "gemini-2.0-flash"
timeout = "1m"

[article]
output_path = "response.docx"

[chat]
max_sessions = 250
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let config = Config::load_from_path(config_path).unwrap();

        assert_eq!(config.server.max_body_bytes, 2 * 1024 * 1024);
        assert_eq!(config.generation.api_version, "v1alpha");
        assert_eq!(config.generation.timeout.as_millis(), 60_000);
        assert_eq!(config.chat.max_sessions, 250);
        assert!(config.require_credentials().is_err());
    }
}
