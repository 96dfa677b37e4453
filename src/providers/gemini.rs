//! Google Gemini `generateContent` client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::error::ProviderError;
use super::types::{GenerationRequest, Message};
use super::GenerationProvider;
use crate::config::GenerationProviderConfig;

const PROVIDER: &str = "gemini";
const JSON_MIME_TYPE: &str = "application/json";

/// Gemini API client
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    timeout_ms: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<WireContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<WireContent<'a>>,
    generation_config: WireGenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct WireContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<WirePart<'a>>,
}

#[derive(Debug, Serialize)]
struct WirePart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<&'a Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: Option<u32>,
    #[serde(default)]
    candidates_token_count: Option<u32>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate; empty when there is none
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

fn wire_content(message: &Message) -> WireContent<'_> {
    WireContent {
        role: Some(message.role.as_str()),
        parts: vec![WirePart {
            text: &message.text,
        }],
    }
}

fn build_request(request: &GenerationRequest) -> GenerateContentRequest<'_> {
    let schema = request.config.response_schema.as_ref();

    GenerateContentRequest {
        contents: request.contents.iter().map(wire_content).collect(),
        system_instruction: request.system_instruction.as_deref().map(|text| WireContent {
            role: None,
            parts: vec![WirePart { text }],
        }),
        generation_config: WireGenerationConfig {
            temperature: request.config.temperature,
            max_output_tokens: request.config.max_output_tokens,
            response_mime_type: schema.map(|_| JSON_MIME_TYPE),
            response_schema: schema,
        },
    }
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(config: &GenerationProviderConfig) -> Result<Self, ProviderError> {
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

        let endpoint = format!(
            "{}/{}/models/{}:generateContent",
            config.base_url.trim_end_matches('/'),
            config.api_version,
            config.model
        );

        Ok(Self {
            client,
            endpoint,
            api_key,
            model: config.model.clone(),
            timeout_ms: config.timeout.as_millis(),
        })
    }
}

#[async_trait]
impl GenerationProvider for GeminiClient {
    async fn generate(&self, request: GenerationRequest) -> Result<String, ProviderError> {
        let body = build_request(&request);
        debug!(
            model = %self.model,
            turns = request.contents.len(),
            structured = request.config.response_schema.is_some(),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::from_send(e, self.timeout_ms))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::Transport(format!("Failed to read body: {}", e)))?;

        if !status.is_success() {
            warn!(%status, model = %self.model, "Gemini API error");
            return Err(ProviderError::from_status(PROVIDER, status, text));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text)
            .map_err(|e| ProviderError::MalformedResponse(format!("JSON parse error: {}", e)))?;

        if let Some(reason) = parsed
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.as_deref())
        {
            warn!(reason, "Gemini blocked the prompt");
        }

        if let Some(reason) = parsed
            .candidates
            .first()
            .and_then(|candidate| candidate.finish_reason.as_deref())
        {
            debug!(finish_reason = reason, "Gemini candidate finished");
        }

        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                prompt_tokens = ?usage.prompt_token_count,
                response_tokens = ?usage.candidates_token_count,
                "Gemini API usage"
            );
        }

        Ok(parsed.text())
    }

    fn name(&self) -> &'static str {
        PROVIDER
    }
}
