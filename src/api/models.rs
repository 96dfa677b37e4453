//! Wire models for the HTTP API.
//!
//! Request fields default to empty strings so that a missing field reaches
//! the handler's non-empty check and is reported as a 400 with the same
//! message as an empty one.
//!
//! ```json
//! POST /api/define   {"word": "bank", "context": "We sat on the river bank."}
//! POST /api/feed     {"query": "async rust"}
//! POST /api/chat     {"message": "Summarize it", "documentText": "...", "sessionId": "..."}
//! GET  /api/pdf?url=https://example.com/post
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::observability::MetricsSnapshot;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DefineRequest {
    pub word: String,
    pub context: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FeedRequest {
    pub query: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PdfQuery {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    pub document_text: Option<String>,
    pub session_id: Option<String>,
}

/// Literal body returned by `/api/pdf` once the article is on disk
pub const ARTICLE_SAVED: &str = "Success";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub components: BTreeMap<String, String>,
    pub version: String,
    pub metrics: MetricsSnapshot,
}
