//! In-process providers for tests and local development.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

use super::error::ProviderError;
use super::types::{GenerationRequest, PageContent, SearchResultSet};
use super::{GenerationProvider, SearchProvider};

/// Search provider returning a fixed result set and fixed pages.
#[derive(Debug, Default)]
pub struct MockSearchProvider {
    results: Value,
    pages: Vec<PageContent>,
    fail: bool,
    search_calls: Mutex<Vec<String>>,
    extract_calls: Mutex<Vec<String>>,
}

impl MockSearchProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `results` from every search call.
    pub fn with_results(mut self, results: Value) -> Self {
        self.results = results;
        self
    }

    /// Return `pages` from every extract call.
    pub fn with_pages(mut self, pages: Vec<PageContent>) -> Self {
        self.pages = pages;
        self
    }

    /// Fail every call with a transport error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn search_calls(&self) -> Vec<String> {
        lock(&self.search_calls).clone()
    }

    pub fn extract_calls(&self) -> Vec<String> {
        lock(&self.extract_calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.search_calls).len() + lock(&self.extract_calls).len()
    }
}

#[async_trait]
impl SearchProvider for MockSearchProvider {
    async fn search(&self, query: &str) -> Result<SearchResultSet, ProviderError> {
        lock(&self.search_calls).push(query.to_string());
        if self.fail {
            return Err(ProviderError::Transport("mock search failure".to_string()));
        }
        Ok(SearchResultSet::new(self.results.clone()))
    }

    async fn extract(&self, url: &str) -> Result<Vec<PageContent>, ProviderError> {
        lock(&self.extract_calls).push(url.to_string());
        if self.fail {
            return Err(ProviderError::Transport("mock extract failure".to_string()));
        }
        Ok(self.pages.clone())
    }

    fn name(&self) -> &'static str {
        "mock-search"
    }
}

/// Generation provider replaying scripted replies.
///
/// Queued replies are consumed first; afterwards the fallback reply
/// (if any) is returned, otherwise the call fails.
#[derive(Debug, Default)]
pub struct MockGenerationProvider {
    queued: Mutex<VecDeque<String>>,
    fallback: Option<String>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl MockGenerationProvider {
    /// Always reply with `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            fallback: Some(text.into()),
            ..Self::default()
        }
    }

    /// Reply with each entry once, in order, then fail.
    pub fn scripted<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            queued: Mutex::new(replies.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Fail every call with a transport error.
    pub fn failing() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        lock(&self.requests).clone()
    }

    pub fn last_request(&self) -> Option<GenerationRequest> {
        lock(&self.requests).last().cloned()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }
}

#[async_trait]
impl GenerationProvider for MockGenerationProvider {
    async fn generate(&self, request: GenerationRequest) -> Result<String, ProviderError> {
        lock(&self.requests).push(request);

        if let Some(reply) = lock(&self.queued).pop_front() {
            return Ok(reply);
        }

        self.fallback
            .clone()
            .ok_or_else(|| ProviderError::Transport("mock generation failure".to_string()))
    }

    fn name(&self) -> &'static str {
        "mock-generation"
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::GenerationConfig;
    use serde_json::json;

    #[tokio::test]
    async fn test_scripted_replies_then_failure() {
        let provider = MockGenerationProvider::scripted(["first", "second"]);
        let request = || GenerationRequest::prompt("hi", GenerationConfig::default());

        assert_eq!(provider.generate(request()).await.unwrap(), "first");
        assert_eq!(provider.generate(request()).await.unwrap(), "second");
        assert!(provider.generate(request()).await.is_err());
        assert_eq!(provider.call_count(), 3);
    }

    #[tokio::test]
    async fn test_search_records_calls() {
        let provider = MockSearchProvider::new().with_results(json!({"results": []}));

        let results = provider.search("rust").await.unwrap();
        assert_eq!(results.0, json!({"results": []}));
        assert!(provider.extract("https://example.com").await.unwrap().is_empty());

        assert_eq!(provider.search_calls(), vec!["rust"]);
        assert_eq!(provider.extract_calls(), vec!["https://example.com"]);
        assert_eq!(provider.call_count(), 2);
    }
}
