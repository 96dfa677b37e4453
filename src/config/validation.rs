use super::models::Config;
use axum::http::HeaderValue;
use reqwest::Url;
use thiserror::Error;

const SEARCH_DEPTHS: &[&str] = &["basic", "advanced"];
const MAX_SEARCH_RESULTS: u32 = 20;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("At least one CORS origin must be configured")]
    NoCorsOrigins,

    #[error("Invalid CORS origin '{origin}', expected scheme://host[:port]")]
    InvalidCorsOrigin { origin: String },

    #[error("max_body_bytes must be positive")]
    InvalidBodyLimit,

    #[error("{section}.base_url '{url}' must be an http/https URL")]
    InvalidBaseUrl { section: &'static str, url: String },

    #[error("{section}.timeout must be positive")]
    ZeroTimeout { section: &'static str },

    #[error("search.search_depth must be 'basic' or 'advanced', got '{0}'")]
    InvalidSearchDepth(String),

    #[error("search.max_results must be between 1 and 20, got {0}")]
    InvalidMaxResults(u32),

    #[error("generation.{field} must not be empty")]
    EmptyGenerationField { field: &'static str },

    #[error("article.output_path must not be empty")]
    EmptyOutputPath,

    #[error("chat.max_sessions must be positive")]
    InvalidMaxSessions,

    #[error("Missing API key for {provider}: set {env_var}")]
    MissingApiKey {
        provider: &'static str,
        env_var: &'static str,
    },
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_server(config)?;
    validate_search(config)?;
    validate_generation(config)?;
    validate_article(config)?;
    validate_chat(config)?;
    Ok(())
}

/// Both provider keys must be present before the server starts
pub fn validate_credentials(config: &Config) -> Result<(), ValidationError> {
    if is_blank(config.search.api_key.as_deref()) {
        return Err(ValidationError::MissingApiKey {
            provider: "tavily",
            env_var: "TAVILY_API_KEY",
        });
    }

    if is_blank(config.generation.api_key.as_deref()) {
        return Err(ValidationError::MissingApiKey {
            provider: "gemini",
            env_var: "GOOGLE_API_KEY",
        });
    }

    Ok(())
}

fn is_blank(value: Option<&str>) -> bool {
    value.map(|v| v.trim().is_empty()).unwrap_or(true)
}

fn validate_server(config: &Config) -> Result<(), ValidationError> {
    if config.server.cors_origins.is_empty() {
        return Err(ValidationError::NoCorsOrigins);
    }

    for origin in &config.server.cors_origins {
        if !is_valid_origin(origin) {
            return Err(ValidationError::InvalidCorsOrigin {
                origin: origin.clone(),
            });
        }
    }

    if config.server.max_body_bytes == 0 {
        return Err(ValidationError::InvalidBodyLimit);
    }

    Ok(())
}

/// Browsers send `Origin` as `scheme://host[:port]` with no path
fn is_valid_origin(origin: &str) -> bool {
    if HeaderValue::from_str(origin).is_err() {
        return false;
    }

    match Url::parse(origin) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.origin().ascii_serialization() == origin
        }
        Err(_) => false,
    }
}

fn is_http_url(value: &str) -> bool {
    Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false)
}

fn validate_search(config: &Config) -> Result<(), ValidationError> {
    let search = &config.search;

    if !is_http_url(&search.base_url) {
        return Err(ValidationError::InvalidBaseUrl {
            section: "search",
            url: search.base_url.clone(),
        });
    }

    if search.timeout.is_zero() {
        return Err(ValidationError::ZeroTimeout { section: "search" });
    }

    if !SEARCH_DEPTHS.contains(&search.search_depth.as_str()) {
        return Err(ValidationError::InvalidSearchDepth(
            search.search_depth.clone(),
        ));
    }

    if !(1..=MAX_SEARCH_RESULTS).contains(&search.max_results) {
        return Err(ValidationError::InvalidMaxResults(search.max_results));
    }

    Ok(())
}

fn validate_generation(config: &Config) -> Result<(), ValidationError> {
    let generation = &config.generation;

    if !is_http_url(&generation.base_url) {
        return Err(ValidationError::InvalidBaseUrl {
            section: "generation",
            url: generation.base_url.clone(),
        });
    }

    if generation.timeout.is_zero() {
        return Err(ValidationError::ZeroTimeout {
            section: "generation",
        });
    }

    if generation.model.trim().is_empty() {
        return Err(ValidationError::EmptyGenerationField { field: "model" });
    }

    if generation.api_version.trim().is_empty() {
        return Err(ValidationError::EmptyGenerationField {
            field: "api_version",
        });
    }

    Ok(())
}

fn validate_article(config: &Config) -> Result<(), ValidationError> {
    if config.article.output_path.as_os_str().is_empty() {
        return Err(ValidationError::EmptyOutputPath);
    }
    Ok(())
}

fn validate_chat(config: &Config) -> Result<(), ValidationError> {
    if config.chat.max_sessions == 0 {
        return Err(ValidationError::InvalidMaxSessions);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::humanize::HumanDuration;
    use std::path::PathBuf;

    #[test]
    fn test_valid_config() {
        let config = Config::default();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_origin_with_path_rejected() {
        let mut config = Config::default();
        config.server.cors_origins = vec![
            "http://localhost:3000".to_string(),
            "http://localhost:3000/adoread".to_string(),
        ];

        let result = validate(&config);
        assert!(matches!(
            result,
            Err(ValidationError::InvalidCorsOrigin { ref origin }) if origin.ends_with("/adoread")
        ));
    }

    #[test]
    fn test_origin_forms() {
        assert!(is_valid_origin("http://localhost:3000"));
        assert!(is_valid_origin("https://app.example.com"));
        assert!(!is_valid_origin("https://app.example.com/"));
        assert!(!is_valid_origin("localhost:3000"));
        assert!(!is_valid_origin("ftp://example.com"));
    }

    #[test]
    fn test_empty_origins() {
        let mut config = Config::default();
        config.server.cors_origins.clear();
        assert!(matches!(
            validate(&config),
            Err(ValidationError::NoCorsOrigins)
        ));
    }

    #[test]
    fn test_invalid_base_url() {
        let mut config = Config::default();
        config.generation.base_url = "generativelanguage.googleapis.com".to_string();
        assert!(matches!(
            validate(&config),
            Err(ValidationError::InvalidBaseUrl {
                section: "generation",
                ..
            })
        ));
    }

    #[test]
    fn test_zero_timeout() {
        let mut config = Config::default();
        config.search.timeout = HumanDuration::from_secs(0);
        assert!(matches!(
            validate(&config),
            Err(ValidationError::ZeroTimeout { section: "search" })
        ));
    }

    #[test]
    fn test_search_bounds() {
        let mut config = Config::default();
        config.search.search_depth = "deep".to_string();
        assert!(matches!(
            validate(&config),
            Err(ValidationError::InvalidSearchDepth(_))
        ));

        let mut config = Config::default();
        config.search.max_results = 0;
        assert!(matches!(
            validate(&config),
            Err(ValidationError::InvalidMaxResults(0))
        ));
    }

    #[test]
    fn test_empty_output_path() {
        let mut config = Config::default();
        config.article.output_path = PathBuf::new();
        assert!(matches!(
            validate(&config),
            Err(ValidationError::EmptyOutputPath)
        ));
    }

    #[test]
    fn test_zero_sessions() {
        let mut config = Config::default();
        config.chat.max_sessions = 0;
        assert!(matches!(
            validate(&config),
            Err(ValidationError::InvalidMaxSessions)
        ));
    }

    #[test]
    fn test_credentials() {
        let mut config = Config::default();
        assert!(matches!(
            validate_credentials(&config),
            Err(ValidationError::MissingApiKey {
                provider: "tavily",
                ..
            })
        ));

        config.search.api_key = Some("tvly-key".to_string());
        config.generation.api_key = Some("   ".to_string());
        assert!(matches!(
            validate_credentials(&config),
            Err(ValidationError::MissingApiKey {
                provider: "gemini",
                ..
            })
        ));

        config.generation.api_key = Some("google-key".to_string());
        assert!(validate_credentials(&config).is_ok());
    }
}
