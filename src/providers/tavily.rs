//! Tavily search and extraction client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::error::ProviderError;
use super::types::{PageContent, SearchResultSet};
use super::SearchProvider;
use crate::config::SearchProviderConfig;

const PROVIDER: &str = "tavily";

/// Tavily API client
#[derive(Debug, Clone)]
pub struct TavilyClient {
    client: Client,
    base_url: String,
    api_key: String,
    search_depth: String,
    max_results: u32,
    timeout_ms: u64,
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    search_depth: &'a str,
    max_results: u32,
}

#[derive(Debug, Serialize)]
struct ExtractRequest<'a> {
    urls: [&'a str; 1],
}

#[derive(Debug, Deserialize)]
struct ExtractResponse {
    #[serde(default)]
    results: Vec<ExtractedPage>,
    #[serde(default)]
    failed_results: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct ExtractedPage {
    url: String,
    #[serde(default)]
    raw_content: Option<String>,
}

impl TavilyClient {
    /// Create a new Tavily client
    pub fn new(config: &SearchProviderConfig) -> Result<Self, ProviderError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ProviderError::Unauthorized { provider: PROVIDER })?;

        let timeout = config.timeout.as_duration();
        let client = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            search_depth: config.search_depth.clone(),
            max_results: config.max_results,
            timeout_ms: config.timeout.as_millis(),
        })
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<String, ProviderError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(%url, "Sending Tavily request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| ProviderError::from_send(e, self.timeout_ms))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::Transport(format!("Failed to read body: {}", e)))?;

        if !status.is_success() {
            warn!(%status, path, "Tavily request failed");
            return Err(ProviderError::from_status(PROVIDER, status, text));
        }

        Ok(text)
    }
}

#[async_trait]
impl SearchProvider for TavilyClient {
    async fn search(&self, query: &str) -> Result<SearchResultSet, ProviderError> {
        let request = SearchRequest {
            query,
            search_depth: &self.search_depth,
            max_results: self.max_results,
        };

        let body = self.post("search", &request).await?;
        let value: Value = serde_json::from_str(&body)
            .map_err(|e| ProviderError::MalformedResponse(format!("JSON parse error: {}", e)))?;

        let results = SearchResultSet::new(value);
        debug!(results = results.result_count(), "Tavily search completed");

        Ok(results)
    }

    async fn extract(&self, url: &str) -> Result<Vec<PageContent>, ProviderError> {
        let request = ExtractRequest { urls: [url] };

        let body = self.post("extract", &request).await?;
        let parsed: ExtractResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::MalformedResponse(format!("JSON parse error: {}", e)))?;

        if !parsed.failed_results.is_empty() {
            warn!(url, failed = parsed.failed_results.len(), "Tavily could not extract some URLs");
        }

        Ok(parsed
            .results
            .into_iter()
            .map(|page| PageContent {
                url: page.url,
                raw_content: page.raw_content.unwrap_or_default(),
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        PROVIDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SearchProviderConfig {
        SearchProviderConfig {
            api_key: Some("tvly-test".to_string()),
            ..SearchProviderConfig::default()
        }
    }

    #[test]
    fn test_client_creation() {
        let client = TavilyClient::new(&test_config()).unwrap();
        assert_eq!(client.name(), "tavily");
        assert_eq!(client.base_url, "https://api.tavily.com");
        assert_eq!(client.timeout_ms, 30_000);
    }

    #[test]
    fn test_missing_key_rejected() {
        let config = SearchProviderConfig::default();
        assert!(matches!(
            TavilyClient::new(&config),
            Err(ProviderError::Unauthorized { provider: "tavily" })
        ));
    }

    #[test]
    fn test_search_request_shape() {
        let request = SearchRequest {
            query: "rust ownership",
            search_depth: "basic",
            max_results: 5,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["query"], "rust ownership");
        assert_eq!(json["search_depth"], "basic");
        assert_eq!(json["max_results"], 5);
    }

    #[test]
    fn test_extract_response_deserialization() {
        let json = r#"{
            "results": [
                {"url": "https://example.com/a", "raw_content": "Body A"},
                {"url": "https://example.com/b", "raw_content": null}
            ],
            "failed_results": [],
            "response_time": 0.8
        }"#;

        let response: ExtractResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.results.len(), 2);
        assert_eq!(response.results[0].raw_content.as_deref(), Some("Body A"));
        assert!(response.results[1].raw_content.is_none());
    }

    #[test]
    fn test_extract_response_empty() {
        let response: ExtractResponse =
            serde_json::from_str(r#"{"failed_results": [{"url": "x", "error": "blocked"}]}"#)
                .unwrap();
        assert!(response.results.is_empty());
        assert_eq!(response.failed_results.len(), 1);
    }
}
