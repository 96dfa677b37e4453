use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};
use thiserror::Error;
use tracing::{error, warn};

use super::models::ErrorResponse;
use crate::handlers::HandlerError;

const NOT_FOUND_DETAIL: &str = "No content could be extracted from URL";

/// Endpoint a failure belongs to; selects the generic 500 message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Define,
    Feed,
    Article,
    Chat,
}

impl Endpoint {
    fn internal_detail(self) -> &'static str {
        match self {
            Endpoint::Define => "Failed to generate definition",
            Endpoint::Feed => "Failed to generate feed",
            Endpoint::Article => "Failed to generate article",
            Endpoint::Chat => "Failed to generate chat response",
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    PayloadTooLarge(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Translate a handler failure. Only 400 messages reach the client
    /// verbatim; everything else is logged and replaced.
    pub fn from_handler(endpoint: Endpoint, err: HandlerError) -> Self {
        match err {
            HandlerError::InvalidArgument(message) => ApiError::BadRequest(message),
            HandlerError::NotFound(message) => {
                warn!(?endpoint, %message, "Nothing to process");
                ApiError::NotFound(NOT_FOUND_DETAIL.to_string())
            }
            other => {
                error!(?endpoint, error = %other, "Request failed");
                ApiError::Internal(endpoint.internal_detail().to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let body = ErrorResponse {
            detail: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Every malformed body is a 400 except an oversized one
impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        if value.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ApiError::PayloadTooLarge(value.body_text());
        }
        ApiError::BadRequest(value.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(value: QueryRejection) -> Self {
        ApiError::BadRequest(value.body_text())
    }
}
