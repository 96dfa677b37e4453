use std::sync::Arc;
use tracing::{debug, info, warn};

use super::error::{HandlerError, require_non_empty};
use super::types::SuggestionsFeed;
use crate::providers::{
    GenerationConfig, GenerationProvider, GenerationRequest, SearchProvider, SearchResultSet,
};

const TEMPERATURE: f32 = 0.8;

/// Turns a free-text query into one structured content suggestion
pub struct FeedHandler {
    search: Arc<dyn SearchProvider>,
    generator: Arc<dyn GenerationProvider>,
}

impl FeedHandler {
    pub fn new(search: Arc<dyn SearchProvider>, generator: Arc<dyn GenerationProvider>) -> Self {
        Self { search, generator }
    }

    pub async fn handle(&self, query: &str) -> Result<SuggestionsFeed, HandlerError> {
        require_non_empty(query, "Query is required")?;
        info!(query, "Feed request");

        let results = self.search.search(query).await?;
        debug!(
            provider = self.search.name(),
            results = results.result_count(),
            "Search completed"
        );

        let prompt = build_feed_prompt(&results).map_err(|e| {
            HandlerError::GenerationFailed(format!("could not serialize search results: {}", e))
        })?;

        let request = GenerationRequest::prompt(
            prompt,
            GenerationConfig::default()
                .with_temperature(TEMPERATURE)
                .with_response_schema(SuggestionsFeed::response_schema()),
        );

        let raw = self.generator.generate(request).await?;
        info!(raw = %raw, "Feed generated");

        parse_feed(&raw)
    }
}

/// Instruction followed by the full, untrimmed search result set
pub fn build_feed_prompt(results: &SearchResultSet) -> Result<String, serde_json::Error> {
    let context = results.to_prompt_context()?;
    Ok(format!(
        "From the search results below, produce exactly one content suggestion as a JSON \
         object with the fields title, description, category and url.\n\n{context}"
    ))
}

fn parse_feed(raw: &str) -> Result<SuggestionsFeed, HandlerError> {
    if raw.trim().is_empty() {
        return Err(HandlerError::GenerationFailed(
            "no feed generated".to_string(),
        ));
    }

    serde_json::from_str(raw).map_err(|e| {
        warn!(error = %e, "Generated feed does not match schema");
        HandlerError::GenerationFailed(format!("feed does not match schema: {}", e))
    })
}
