//! Embedding providers and validated embedding vectors.
//!
//! - [`EmbeddingProvider`] is the seam the semantic scorer talks to.
//! - [`HashingEmbedder`] is the offline default; [`HttpEmbedder`] calls an
//!   OpenAI-compatible endpoint.
//! - [`Embedding`] / [`CompactEmbedding`] are the validated f32 and cached f16 forms.

mod error;
/// Local feature-hashing embedder.
pub mod hashing;
/// OpenAI-compatible HTTP embedder.
pub mod http;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
mod provider;
pub mod vector;


pub use error::EmbeddingError;
pub use hashing::HashingEmbedder;
pub use http::{DEFAULT_EMBEDDING_MODEL, HttpEmbedder, HttpEmbedderConfig};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockEmbeddingProvider;
pub use provider::EmbeddingProvider;
pub use vector::{CompactEmbedding, Embedding, cosine_similarity_f16_f32, cosine_similarity_f32};
