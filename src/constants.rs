//! Cross-cutting, shared constants.
//!
//! Scoring weights and thresholds here are defaults only. The values that actually drive a
//! verification live in [`crate::config::Config`], which is validated once at construction.
//!
//! # Dimension Invariants
//!
//! Every embedding that crosses the provider boundary is checked against a single declared
//! dimension. If you need a provider with a different size:
//!
//! 1. Set [`DimConfig`] (or `Config::embedding_dim`) to the provider's dimension
//! 2. Use [`validate_embedding_dim`] at module boundaries to catch mismatches early
//! 3. The compile-time constant remains the default for the built-in hashing embedder

pub const DEFAULT_EMBEDDING_DIM: usize = 384;

pub const DEFAULT_SEMANTIC_WEIGHT: f32 = 0.7;
pub const DEFAULT_LEXICAL_WEIGHT: f32 = 0.3;
pub const DEFAULT_CONCEPT_WEIGHT: f32 = 0.0;

pub const DEFAULT_HIGH_THRESHOLD: f32 = 0.80;
pub const DEFAULT_LOW_THRESHOLD: f32 = 0.50;

/// Share of the lexical score contributed by token-set overlap (Jaccard).
pub const LEXICAL_OVERLAP_WEIGHT: f32 = 0.5;
/// Share of the lexical score contributed by token-sequence edit similarity.
pub const LEXICAL_SEQUENCE_WEIGHT: f32 = 1.0 - LEXICAL_OVERLAP_WEIGHT;

pub const DEFAULT_PROVIDER_TIMEOUT_MS: u64 = 5_000;

pub const DEFAULT_CACHE_CAPACITY: u64 = 1_000;

/// Max characters of a candidate answer quoted back in feedback.
pub const FEEDBACK_QUOTE_CHARS: usize = 80;

/// Runtime dimension configuration for modules that agree on embedding sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimConfig {
    /// The embedding vector dimension (number of floats).
    pub embedding_dim: usize,
}

impl Default for DimConfig {
    fn default() -> Self {
        Self {
            embedding_dim: DEFAULT_EMBEDDING_DIM,
        }
    }
}

impl DimConfig {
    /// Creates a new dimension configuration with the specified embedding dimension.
    pub fn new(embedding_dim: usize) -> Self {
        Self { embedding_dim }
    }

    /// Returns an error if `embedding_dim` is zero.
    pub fn validate(&self) -> Result<(), DimValidationError> {
        if self.embedding_dim == 0 {
            return Err(DimValidationError::ZeroDimension);
        }
        Ok(())
    }

    /// Returns the number of bytes needed for F16 representation.
    pub fn f16_bytes(&self) -> usize {
        self.embedding_dim * 2
    }
}

/// Error returned when dimension validation fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DimValidationError {
    /// Embedding dimension cannot be zero.
    ZeroDimension,
    /// Runtime dimension does not match expected dimension.
    DimensionMismatch { expected: usize, actual: usize },
}

impl std::fmt::Display for DimValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroDimension => write!(f, "embedding dimension cannot be zero"),
            Self::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "dimension mismatch: expected {}, got {}",
                    expected, actual
                )
            }
        }
    }
}

impl std::error::Error for DimValidationError {}

/// Validates that a runtime embedding dimension matches the expected dimension.
///
/// # Example
///
/// ```
/// use verificator::constants::{validate_embedding_dim, DEFAULT_EMBEDDING_DIM};
///
/// let provider_dim = 384;
/// validate_embedding_dim(provider_dim, DEFAULT_EMBEDDING_DIM).unwrap();
/// ```
pub fn validate_embedding_dim(actual: usize, expected: usize) -> Result<(), DimValidationError> {
    if actual != expected {
        return Err(DimValidationError::DimensionMismatch { expected, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dim_config_default() {
        let config = DimConfig::default();
        assert_eq!(config.embedding_dim, DEFAULT_EMBEDDING_DIM);
    }

    #[test]
    fn test_dim_config_validate_zero() {
        let config = DimConfig::new(0);
        assert_eq!(config.validate(), Err(DimValidationError::ZeroDimension));
        assert!(DimConfig::new(7).validate().is_ok());
    }

    #[test]
    fn test_dim_config_byte_calculations() {
        let config = DimConfig::new(DEFAULT_EMBEDDING_DIM);
        assert_eq!(config.f16_bytes(), 768);
        assert_eq!(DimConfig::new(3).f16_bytes(), 6);
    }

    #[test]
    fn test_default_weights_favor_semantic() {
        assert!(DEFAULT_SEMANTIC_WEIGHT > DEFAULT_LEXICAL_WEIGHT);
        assert!(DEFAULT_LOW_THRESHOLD <= DEFAULT_HIGH_THRESHOLD);
        assert!((LEXICAL_OVERLAP_WEIGHT + LEXICAL_SEQUENCE_WEIGHT - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_validate_embedding_dim_mismatch() {
        assert!(validate_embedding_dim(384, 384).is_ok());
        assert_eq!(
            validate_embedding_dim(768, 384),
            Err(DimValidationError::DimensionMismatch {
                expected: 384,
                actual: 768
            })
        );
    }

    #[test]
    fn test_error_display() {
        let err = DimValidationError::ZeroDimension;
        assert_eq!(err.to_string(), "embedding dimension cannot be zero");

        let err = DimValidationError::DimensionMismatch {
            expected: 384,
            actual: 768,
        };
        assert!(err.to_string().contains("384"));
        assert!(err.to_string().contains("768"));
    }
}
