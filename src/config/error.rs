//! Configuration error types.

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
///
/// Any of these is fatal at construction time: a verifier never starts with a
/// configuration that would produce silently wrong verdicts.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A weight is negative, above one, or not a finite number.
    #[error("weight '{name}' must be within [0, 1], got {value}")]
    WeightOutOfRange { name: &'static str, value: f32 },

    /// Both scoring weights are zero, so no signal could ever move the confidence.
    #[error("at least one of the lexical and semantic weights must be positive")]
    ZeroWeights,

    /// A threshold is outside `[0, 1]` or not a finite number.
    #[error("threshold '{name}' must be within [0, 1], got {value}")]
    ThresholdOutOfRange { name: &'static str, value: f32 },

    /// The low threshold is above the high threshold.
    #[error("low threshold {low} must not exceed high threshold {high}")]
    ThresholdOrder { low: f32, high: f32 },

    /// Provider timeout of zero would fail every semantic call.
    #[error("provider timeout must be greater than zero")]
    ZeroTimeout,

    /// The reference-embedding cache must hold at least one entry.
    #[error("cache capacity must be greater than zero")]
    ZeroCacheCapacity,

    /// Embedding dimension is zero.
    #[error("embedding dimension must be greater than zero")]
    ZeroDimension,

    /// The embedding provider's dimension differs from the configured one.
    #[error("provider '{provider}' produces {actual}-dimensional embeddings, expected {expected}")]
    DimensionMismatch {
        provider: String,
        expected: usize,
        actual: usize,
    },

    /// No normalization resources for the requested language.
    #[error("unsupported language '{value}'")]
    UnsupportedLanguage { value: String },

    /// An environment variable held a value that could not be parsed.
    #[error("failed to parse {name}='{value}': {reason}")]
    ParseError {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// A required environment variable was not set.
    #[error("missing required environment variable: {name}")]
    MissingEnvVar { name: &'static str },
}
