use std::path::PathBuf;
use thiserror::Error;

use crate::providers::ProviderError;

/// Request handler errors
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("{0}")]
    InvalidArgument(String),

    /// The provider answered but the output was empty or unusable
    #[error("generation failed: {0}")]
    GenerationFailed(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("provider call failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("failed to persist article to {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl HandlerError {
    /// True when an upstream provider or its output caused the failure
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            HandlerError::Provider(_) | HandlerError::GenerationFailed(_)
        )
    }
}

/// Reject empty or whitespace-only input before any provider call
pub(crate) fn require_non_empty(value: &str, message: &str) -> Result<(), HandlerError> {
    if value.trim().is_empty() {
        return Err(HandlerError::InvalidArgument(message.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_non_empty() {
        assert!(require_non_empty("word", "required").is_ok());

        let err = require_non_empty("  \n", "Query is required").unwrap_err();
        assert!(matches!(err, HandlerError::InvalidArgument(ref m) if m == "Query is required"));
        assert_eq!(err.to_string(), "Query is required");
    }

    #[test]
    fn test_upstream_classification() {
        assert!(HandlerError::GenerationFailed("empty".into()).is_upstream());
        assert!(HandlerError::Provider(ProviderError::Timeout { timeout_ms: 10 }).is_upstream());
        assert!(!HandlerError::NotFound("url".into()).is_upstream());
        assert!(!HandlerError::InvalidArgument("x".into()).is_upstream());
    }
}
