use thiserror::Error;

use crate::constants::DimValidationError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EmbeddingError {
    #[error("embedding provider unavailable: {reason}")]
    ProviderUnavailable { reason: String },

    #[error("embedding request timed out after {after_ms} ms")]
    Timeout { after_ms: u64 },

    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The vector contains NaN or infinite values.
    #[error("invalid embedding vector: {reason}")]
    InvalidVector { reason: String },

    #[error("embedding request failed: {reason}")]
    Request { reason: String },

    #[error("embedding endpoint returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("invalid embedding provider configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl From<DimValidationError> for EmbeddingError {
    fn from(err: DimValidationError) -> Self {
        match err {
            DimValidationError::DimensionMismatch { expected, actual } => {
                EmbeddingError::DimensionMismatch { expected, actual }
            }
            DimValidationError::ZeroDimension => EmbeddingError::InvalidVector {
                reason: err.to_string(),
            },
        }
    }
}

impl From<reqwest::Error> for EmbeddingError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            EmbeddingError::ProviderUnavailable {
                reason: err.to_string(),
            }
        } else {
            EmbeddingError::Request {
                reason: err.to_string(),
            }
        }
    }
}
