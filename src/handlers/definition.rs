use std::sync::Arc;
use tracing::{debug, warn};

use super::error::{HandlerError, require_non_empty};
use super::types::DefinitionResult;
use crate::providers::{GenerationConfig, GenerationProvider, GenerationRequest};

const TEMPERATURE: f32 = 0.4;
const MAX_OUTPUT_TOKENS: u32 = 100;

/// Produces context-aware definitions for a word or phrase
pub struct DefinitionHandler {
    generator: Arc<dyn GenerationProvider>,
}

impl DefinitionHandler {
    pub fn new(generator: Arc<dyn GenerationProvider>) -> Self {
        Self { generator }
    }

    pub async fn handle(
        &self,
        word: &str,
        context: &str,
    ) -> Result<DefinitionResult, HandlerError> {
        require_non_empty(word, "Word and context are required")?;
        require_non_empty(context, "Word and context are required")?;

        let request = GenerationRequest::prompt(
            build_definition_prompt(word, context),
            GenerationConfig::default()
                .with_temperature(TEMPERATURE)
                .with_max_output_tokens(MAX_OUTPUT_TOKENS),
        );

        let definition = self.generator.generate(request).await?;
        if definition.trim().is_empty() {
            warn!(word, provider = self.generator.name(), "No definition generated");
            return Err(HandlerError::GenerationFailed(
                "no definition generated".to_string(),
            ));
        }

        debug!(word, chars = definition.len(), "Definition generated");
        Ok(DefinitionResult { definition })
    }
}

pub fn build_definition_prompt(word: &str, context: &str) -> String {
    format!(
        r#"I need a concise definition for the word or phrase "{word}" as it appears in the following context:

"{context}"

Please provide a clear, context-specific definition in 3-5 sentences that explains what "{word}" means in this specific context.
Don't include phrases like "In this context" or "Based on the text" in your response.
Just provide the definition directly."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::mock::MockGenerationProvider;

    #[test]
    fn prompt_embeds_word_and_context() {
        let prompt = build_definition_prompt("bank", "We sat on the river bank.");
        assert!(prompt.contains(r#""bank" as it appears"#));
        assert!(prompt.contains(r#""We sat on the river bank.""#));
        assert!(prompt.contains("3-5 sentences"));
        assert!(prompt.contains(r#"Don't include phrases like "In this context""#));
    }

    #[tokio::test]
    async fn returns_generated_text_verbatim() {
        let generator = Arc::new(MockGenerationProvider::replying("  The edge of a river.  "));
        let handler = DefinitionHandler::new(generator.clone());

        let result = handler.handle("bank", "the river bank").await.unwrap();
        assert_eq!(result.definition, "  The edge of a river.  ");

        let request = generator.last_request().unwrap();
        assert_eq!(request.config.temperature, Some(TEMPERATURE));
        assert_eq!(request.config.max_output_tokens, Some(MAX_OUTPUT_TOKENS));
        assert!(request.config.response_schema.is_none());
    }

    #[tokio::test]
    async fn empty_input_skips_provider() {
        let generator = Arc::new(MockGenerationProvider::replying("unused"));
        let handler = DefinitionHandler::new(generator.clone());

        for (word, context) in [("", "ctx"), ("word", ""), ("  ", "ctx")] {
            let err = handler.handle(word, context).await.unwrap_err();
            assert!(matches!(err, HandlerError::InvalidArgument(_)));
        }
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn empty_generation_is_failure() {
        let handler = DefinitionHandler::new(Arc::new(MockGenerationProvider::replying("")));
        let err = handler.handle("bank", "river bank").await.unwrap_err();
        assert!(matches!(err, HandlerError::GenerationFailed(_)));
    }

    #[tokio::test]
    async fn provider_error_propagates() {
        let handler = DefinitionHandler::new(Arc::new(MockGenerationProvider::failing()));
        let err = handler.handle("bank", "river bank").await.unwrap_err();
        assert!(matches!(err, HandlerError::Provider(_)));
    }
}
