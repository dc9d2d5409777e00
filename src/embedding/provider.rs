use std::future::Future;

use super::error::EmbeddingError;

/// Source of text embeddings.
///
/// Implementations must return vectors of exactly [`dimension`](Self::dimension)
/// values; the semantic scorer validates every result before use. `version` is part of
/// the reference-cache key, so change it whenever the same text would embed differently.
pub trait EmbeddingProvider: Send + Sync {
    /// Short identifier used in logs and reports.
    fn name(&self) -> &str;

    /// Model or algorithm version.
    fn version(&self) -> &str;

    /// Length of every vector this provider returns.
    fn dimension(&self) -> usize;

    /// Embeds `text`.
    fn embed(&self, text: &str) -> impl Future<Output = Result<Vec<f32>, EmbeddingError>> + Send;
}
