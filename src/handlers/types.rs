use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::path::PathBuf;

/// Context-specific definition of a word or phrase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionResult {
    pub definition: String,
}

/// One structured content suggestion produced from search results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionsFeed {
    pub title: String,
    pub description: String,
    pub category: String,
    pub url: String,
}

impl SuggestionsFeed {
    /// Output schema handed to the generation provider (OpenAPI subset)
    pub fn response_schema() -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "title": {"type": "STRING"},
                "description": {"type": "STRING"},
                "category": {"type": "STRING"},
                "url": {"type": "STRING"}
            },
            "required": ["title", "description", "category", "url"],
            "propertyOrdering": ["title", "description", "category", "url"]
        })
    }
}

/// Generated article written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleArtifact {
    pub path: PathBuf,
    pub bytes_written: u64,
}

/// Assistant answer within a chat session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub text: String,
    pub session_id: String,
}
