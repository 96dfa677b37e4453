use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use std::collections::BTreeMap;
use tracing::info;

use super::{
    error::{ApiError, Endpoint},
    models::{ARTICLE_SAVED, ChatRequest, DefineRequest, FeedRequest, HealthResponse, PdfQuery},
    state::AppState,
};
use crate::handlers::{ChatReply, DefinitionResult, HandlerError, SuggestionsFeed};

/// Count and translate a handler failure
fn fail(state: &AppState, endpoint: Endpoint, err: HandlerError) -> ApiError {
    if matches!(err, HandlerError::InvalidArgument(_)) {
        state.metrics.request_rejected();
    } else if err.is_upstream() {
        state.metrics.upstream_failed();
    }
    ApiError::from_handler(endpoint, err)
}

fn reject(state: &AppState, err: impl Into<ApiError>) -> ApiError {
    state.metrics.request_rejected();
    err.into()
}

/// Context-aware definition (POST /api/define)
pub async fn define(
    State(state): State<AppState>,
    payload: Result<Json<DefineRequest>, JsonRejection>,
) -> Result<Json<DefinitionResult>, ApiError> {
    let Json(request) = payload.map_err(|e| reject(&state, e))?;

    let result = state
        .definitions
        .handle(&request.word, &request.context)
        .await
        .map_err(|e| fail(&state, Endpoint::Define, e))?;

    state.metrics.definition_served();
    Ok(Json(result))
}

/// One structured suggestion for a query (POST /api/feed)
pub async fn feed(
    State(state): State<AppState>,
    payload: Result<Json<FeedRequest>, JsonRejection>,
) -> Result<Json<SuggestionsFeed>, ApiError> {
    let Json(request) = payload.map_err(|e| reject(&state, e))?;

    let feed = state
        .feeds
        .handle(&request.query)
        .await
        .map_err(|e| fail(&state, Endpoint::Feed, e))?;

    state.metrics.feed_served();
    Ok(Json(feed))
}

/// Article from a URL, written to the configured output file (GET /api/pdf)
///
/// The response carries only the literal `"Success"`; the article itself is
/// read from disk by whoever consumes the output file.
pub async fn pdf(
    State(state): State<AppState>,
    query: Result<Query<PdfQuery>, QueryRejection>,
) -> Result<Json<&'static str>, ApiError> {
    let Query(query) = query.map_err(|e| reject(&state, e))?;
    let url = query.url.unwrap_or_default();

    let artifact = state
        .articles
        .handle(&url)
        .await
        .map_err(|e| fail(&state, Endpoint::Article, e))?;

    info!(path = %artifact.path.display(), bytes = artifact.bytes_written, "Article written");
    state.metrics.article_written();
    Ok(Json(ARTICLE_SAVED))
}

/// Document chat turn (POST /api/chat)
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, ApiError> {
    let Json(request) = payload.map_err(|e| reject(&state, e))?;

    let reply = state
        .chat
        .handle(
            &request.message,
            request.document_text.as_deref(),
            request.session_id.as_deref(),
        )
        .await
        .map_err(|e| fail(&state, Endpoint::Chat, e))?;

    state.metrics.chat_replied();
    Ok(Json(reply))
}

/// Health check (GET /health)
///
/// Providers are reported by name only; no upstream call is made.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let mut components = BTreeMap::new();
    components.insert("api".to_string(), "healthy".to_string());
    components.insert(
        format!("search:{}", state.search_provider),
        "configured".to_string(),
    );
    components.insert(
        format!("generation:{}", state.generation_provider),
        "configured".to_string(),
    );
    components.insert(
        "chat_sessions".to_string(),
        state.chat.session_count().to_string(),
    );

    let response = HealthResponse {
        status: "healthy".to_string(),
        components,
        version: env!("CARGO_PKG_VERSION").to_string(),
        metrics: state.metrics.snapshot(),
    };

    (StatusCode::OK, Json(response))
}
