use thiserror::Error;

/// Failures talking to an upstream provider
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Transport(String),

    #[error("request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("{provider} rejected the API key")]
    Unauthorized { provider: &'static str },

    #[error("{provider} rate limit exceeded")]
    RateLimited { provider: &'static str },

    #[error("provider API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
}

impl ProviderError {
    /// Map a reqwest send error, keeping timeouts distinct
    pub(crate) fn from_send(err: reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout { timeout_ms }
        } else {
            ProviderError::Transport(err.to_string())
        }
    }

    /// Map a non-success HTTP status
    pub(crate) fn from_status(
        provider: &'static str,
        status: reqwest::StatusCode,
        body: String,
    ) -> Self {
        match status.as_u16() {
            401 | 403 => ProviderError::Unauthorized { provider },
            429 => ProviderError::RateLimited { provider },
            code => ProviderError::Api {
                status: code,
                message: body,
            },
        }
    }
}
