use crate::humanize::HumanDuration;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub search: SearchProviderConfig,
    #[serde(default)]
    pub generation: GenerationProviderConfig,
    #[serde(default)]
    pub article: ArticleConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    /// Origins allowed to issue cross-origin requests
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            cors_origins: default_cors_origins(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8000))
}

fn default_cors_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

fn default_max_body_bytes() -> usize {
    1024 * 1024 // 1 MB
}

/// Search/extraction provider (Tavily) configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchProviderConfig {
    #[serde(default = "default_search_base_url")]
    pub base_url: String,
    #[serde(default = "default_search_timeout")]
    pub timeout: HumanDuration,
    /// `basic` or `advanced`
    #[serde(default = "default_search_depth")]
    pub search_depth: String,
    #[serde(default = "default_max_results")]
    pub max_results: u32,
    /// Loaded from `TAVILY_API_KEY`, never from the config file
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for SearchProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_search_base_url(),
            timeout: default_search_timeout(),
            search_depth: default_search_depth(),
            max_results: default_max_results(),
            api_key: None,
        }
    }
}

fn default_search_base_url() -> String {
    "https://api.tavily.com".to_string()
}

fn default_search_timeout() -> HumanDuration {
    HumanDuration::from_secs(30)
}

fn default_search_depth() -> String {
    "basic".to_string()
}

fn default_max_results() -> u32 {
    5
}

/// Generation provider (Gemini) configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerationProviderConfig {
    #[serde(default = "default_generation_base_url")]
    pub base_url: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_generation_timeout")]
    pub timeout: HumanDuration,
    /// Loaded from `GOOGLE_API_KEY` (or `GEMINI_API_KEY`)
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for GenerationProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_generation_base_url(),
            api_version: default_api_version(),
            model: default_model(),
            timeout: default_generation_timeout(),
            api_key: None,
        }
    }
}

fn default_generation_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_api_version() -> String {
    "v1beta".to_string()
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_generation_timeout() -> HumanDuration {
    HumanDuration::from_secs(60)
}

/// Article synthesis output
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArticleConfig {
    /// Overwritten on every article request, relative to the working directory
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
}

impl Default for ArticleConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
        }
    }
}

fn default_output_path() -> PathBuf {
    PathBuf::from("response.docx")
}

/// Document chat sessions
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatConfig {
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_sessions: default_max_sessions(),
        }
    }
}

fn default_max_sessions() -> usize {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.bind_addr.to_string(), "0.0.0.0:8000");
        assert_eq!(config.server.cors_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.search.max_results, 5);
        assert_eq!(config.search.timeout.as_millis(), 30_000);
        assert_eq!(config.generation.model, "gemini-2.0-flash");
        assert_eq!(config.article.output_path, PathBuf::from("response.docx"));
        assert_eq!(config.chat.max_sessions, 1000);
        assert!(config.search.api_key.is_none());
    }

    #[test]
    fn test_secrets_are_not_serialized() {
        let mut config = Config::default();
        config.search.api_key = Some("tvly-secret".to_string());
        config.generation.api_key = Some("google-secret".to_string());

        let rendered = toml::to_string_pretty(&config).unwrap();
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("gemini-2.0-flash"));
    }
}
