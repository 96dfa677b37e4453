use super::models::Config;
use config::{ConfigError, Environment, File};
use std::env;
use std::path::PathBuf;

const CONFIG_ENV_VAR: &str = "ADOREAD_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/adoread.toml";
const ENV_PREFIX: &str = "ADOREAD";
const ENV_SEPARATOR: &str = "__";

const TAVILY_KEY_VAR: &str = "TAVILY_API_KEY";
const GOOGLE_KEY_VAR: &str = "GOOGLE_API_KEY";
const GEMINI_KEY_VAR: &str = "GEMINI_API_KEY";

/// Resolve the config file path: explicit argument, then `ADOREAD_CONFIG`, then the default
pub fn config_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| env::var(CONFIG_ENV_VAR).ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Load configuration from multiple sources with priority:
/// 1. Defaults (embedded in structs)
/// 2. TOML file (if exists)
/// 3. Environment variables from .env file (via dotenvy)
/// 4. System environment variables (highest priority)
pub fn load(explicit_path: Option<PathBuf>) -> Result<Config, ConfigError> {
    // Missing .env is fine
    let _ = dotenvy::dotenv();

    let mut config = load_from_sources(config_path(explicit_path))?;
    load_secrets(&mut config);

    Ok(config)
}

/// Provider API keys come only from the environment
fn load_secrets(config: &mut Config) {
    if let Ok(key) = env::var(TAVILY_KEY_VAR) {
        config.search.api_key = Some(key);
    }

    if let Ok(key) = env::var(GOOGLE_KEY_VAR) {
        config.generation.api_key = Some(key);
    }

    if config.generation.api_key.is_none() {
        if let Ok(key) = env::var(GEMINI_KEY_VAR) {
            config.generation.api_key = Some(key);
        }
    }
}

/// Load configuration from a specific path and environment
pub fn load_from_sources(config_path: PathBuf) -> Result<Config, ConfigError> {
    let mut builder = config::Config::builder();

    if config_path.exists() {
        tracing::info!("Loading configuration from: {}", config_path.display());
        builder = builder.add_source(File::from(config_path).required(false));
    } else {
        tracing::warn!(
            "Configuration file not found at {}, using defaults and environment overrides",
            config_path.display()
        );
    }

    // ADOREAD__SERVER__BIND_ADDR -> server.bind_addr
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator(ENV_SEPARATOR)
            .separator(ENV_SEPARATOR)
            .list_separator(",")
            .with_list_parse_key("server.cors_origins")
            .try_parsing(true),
    );

    let config = builder.build()?;
    config.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_defaults_only() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.toml");

        let config = load_from_sources(config_path).unwrap();
        assert_eq!(config.server.bind_addr.to_string(), "0.0.0.0:8000");
        assert_eq!(config.generation.model, "gemini-2.0-flash");
    }

    #[test]
    fn test_load_from_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[server]
bind_addr = "127.0.0.1:9000"
cors_origins = ["http://localhost:3000", "http://localhost:5173"]

[search]
timeout = "5s"
search_depth = "advanced"
max_results = 10

[generation]
model = "gemini-2.5-flash"
timeout = "90s"

[article]
output_path = "out/article.md"

[chat]
max_sessions = 50
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let config = load_from_sources(config_path).unwrap();
        assert_eq!(config.server.bind_addr.to_string(), "127.0.0.1:9000");
        assert_eq!(config.server.cors_origins.len(), 2);
        assert_eq!(config.search.timeout.as_millis(), 5_000);
        assert_eq!(config.search.search_depth, "advanced");
        assert_eq!(config.search.max_results, 10);
        assert_eq!(config.generation.model, "gemini-2.5-flash");
        assert_eq!(config.generation.timeout.as_millis(), 90_000);
        assert_eq!(config.article.output_path, PathBuf::from("out/article.md"));
        assert_eq!(config.chat.max_sessions, 50);

        // Untouched fields keep their defaults
        assert_eq!(config.search.base_url, "https://api.tavily.com");
        assert_eq!(config.generation.api_version, "v1beta");
    }

    #[test]
    fn test_config_path_prefers_explicit() {
        let explicit = PathBuf::from("/etc/adoread/custom.toml");
        assert_eq!(config_path(Some(explicit.clone())), explicit);
    }

    // Environment overrides mutate process state and are not exercised here
}
