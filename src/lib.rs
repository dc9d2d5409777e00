//! Knowledge Verificator library crate (used by the CLI binary and integration tests).
//!
//! # Public API Surface
//!
//! ## Core Types
//! - [`Verifier`], [`VerifyError`] - The verification pipeline
//! - [`Question`], [`AnswerSubmission`] - Verification inputs
//! - [`Feedback`], [`Warning`] - Verification output
//! - [`Config`], [`ConfigError`] - Weights, thresholds, timeouts
//!
//! ## Scoring
//! - [`LexicalMatcher`] - Token overlap and edit similarity
//! - [`SemanticScorer`] - Embedding cosine similarity
//! - [`VerdictAggregator`], [`Verdict`], [`VerdictClass`] - Signal fusion and classification
//!
//! ## Embedding Providers
//! - [`EmbeddingProvider`] - The provider seam
//! - [`HashingEmbedder`] - Offline feature-hashing embedder
//! - [`HttpEmbedder`], [`HttpEmbedderConfig`] - Remote `/v1/embeddings` endpoint
//! - [`ReferenceEmbeddingCache`] - Single-flight cache of reference embeddings
//!
//! ## Utilities
//! - [`Normalizer`] - Text normalization (case folding, stopwords, stemming)
//! - [`evaluation`] - Offline evaluation against labelled answers
//! - [`DimConfig`], [`validate_embedding_dim`] - Dimension validation
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod cache;
pub mod config;
pub mod constants;
pub mod embedding;
pub mod engine;
pub mod evaluation;
pub mod feedback;
pub mod hashing;
pub mod lexical;
pub mod normalize;
pub mod question;
pub mod scoring;
pub mod semantic;

pub use cache::{CacheStats, ReferenceEmbeddingCache};
pub use config::{Config, ConfigError, SignalWeights, Thresholds};
pub use constants::{DimConfig, DimValidationError, validate_embedding_dim};
#[cfg(any(test, feature = "mock"))]
pub use embedding::MockEmbeddingProvider;
pub use embedding::{
    CompactEmbedding, Embedding, EmbeddingError, EmbeddingProvider, HashingEmbedder, HttpEmbedder,
    HttpEmbedderConfig,
};
pub use engine::{Verifier, VerifyError, is_readable_answer};
pub use evaluation::{EvaluationError, EvaluationReport, EvaluationSet, Metric, evaluate};
pub use feedback::{Feedback, FeedbackComposer, Observation, ObservationKind, Warning};
pub use hashing::{ReferenceKey, reference_cache_key};
pub use lexical::LexicalMatcher;
pub use normalize::{Language, NormalizedText, Normalizer};
pub use question::{AnswerSubmission, Question, QuestionError};
pub use scoring::{
    ConceptCoverage, ScoringError, SignalKind, SimilaritySignal, Verdict, VerdictAggregator,
    VerdictClass,
};
pub use semantic::SemanticScorer;
