use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScoringError {
    /// The embedding provider failed, timed out, or returned an unusable vector.
    #[error("embedding provider '{provider}' unavailable: {reason}")]
    ProviderUnavailable { provider: String, reason: String },
}

impl ScoringError {
    #[inline]
    pub fn is_provider_unavailable(&self) -> bool {
        matches!(self, ScoringError::ProviderUnavailable { .. })
    }
}
