//! Value types exchanged with the search and generation providers

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw result set returned by a search call.
///
/// Kept verbatim: the feed pipeline hands the whole document to the
/// generation provider and never inspects individual fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchResultSet(pub Value);

impl SearchResultSet {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Serialized form embedded into generation prompts
    pub fn to_prompt_context(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.0)
    }

    /// Number of entries under `results`, for logging only
    pub fn result_count(&self) -> usize {
        self.0
            .get("results")
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

/// Raw page content extracted from a URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContent {
    pub url: String,
    pub raw_content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

/// One conversation turn sent to the generation provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub text: String,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

/// Sampling and output constraints for a single generation call
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenerationConfig {
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
    /// When set, the provider must answer with JSON matching this schema
    pub response_schema: Option<Value>,
}

impl GenerationConfig {
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_output_tokens(mut self, tokens: u32) -> Self {
        self.max_output_tokens = Some(tokens);
        self
    }

    pub fn with_response_schema(mut self, schema: Value) -> Self {
        self.response_schema = Some(schema);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    pub system_instruction: Option<String>,
    pub contents: Vec<Message>,
    pub config: GenerationConfig,
}

impl GenerationRequest {
    /// Single-turn request carrying one user prompt
    pub fn prompt(text: impl Into<String>, config: GenerationConfig) -> Self {
        Self {
            system_instruction: None,
            contents: vec![Message::user(text)],
            config,
        }
    }

    pub fn conversation(
        system_instruction: Option<String>,
        contents: Vec<Message>,
        config: GenerationConfig,
    ) -> Self {
        Self {
            system_instruction,
            contents,
            config,
        }
    }

    /// Concatenated text of every user turn, used by tests and debug logs
    pub fn user_text(&self) -> String {
        self.contents
            .iter()
            .filter(|m| m.role == Role::User)
            .map(|m| m.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn result_set_serializes_verbatim() {
        let raw = json!({
            "query": "rust async",
            "results": [{"title": "Tokio", "url": "https://tokio.rs", "content": "runtime"}],
            "response_time": 0.42
        });
        let set = SearchResultSet::new(raw.clone());

        let context = set.to_prompt_context().unwrap();
        let parsed: Value = serde_json::from_str(&context).unwrap();
        assert_eq!(parsed, raw);
        assert_eq!(set.result_count(), 1);
    }

    #[test]
    fn result_count_without_results_key() {
        let set = SearchResultSet::new(json!({"answer": null}));
        assert_eq!(set.result_count(), 0);
    }

    #[test]
    fn prompt_request_has_single_user_turn() {
        let request = GenerationRequest::prompt(
            "define this",
            GenerationConfig::default().with_temperature(0.4),
        );
        assert_eq!(request.contents.len(), 1);
        assert_eq!(request.contents[0].role, Role::User);
        assert_eq!(request.user_text(), "define this");
        assert_eq!(request.config.temperature, Some(0.4));
        assert!(request.system_instruction.is_none());
    }
}
