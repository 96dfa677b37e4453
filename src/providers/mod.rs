//! Upstream provider abstractions
//!
//! Two capabilities back every request handler:
//!
//! - [`SearchProvider`] - web search and page extraction ([`TavilyClient`])
//! - [`GenerationProvider`] - text generation, optionally schema constrained ([`GeminiClient`])
//!
//! Both are constructed once at startup and shared as `Arc<dyn ...>` handles.
//! The [`mock`] module provides in-process implementations for tests.

mod error;
mod gemini;
pub mod mock;
mod tavily;
mod types;

use async_trait::async_trait;

pub use error::ProviderError;
pub use gemini::GeminiClient;
pub use tavily::TavilyClient;
pub use types::{
    GenerationConfig, GenerationRequest, Message, PageContent, Role, SearchResultSet,
};

/// Web search and content extraction
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run a search for the raw query string
    async fn search(&self, query: &str) -> Result<SearchResultSet, ProviderError>;

    /// Extract page content for a URL; may return zero pages
    async fn extract(&self, url: &str) -> Result<Vec<PageContent>, ProviderError>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}

/// Generative text provider
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Generate text for the request.
    ///
    /// Returns the empty string when the provider produced no candidate text;
    /// callers decide whether that is a failure.
    async fn generate(&self, request: GenerationRequest) -> Result<String, ProviderError>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}
