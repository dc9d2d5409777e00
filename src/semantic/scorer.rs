use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument, warn};

use crate::cache::ReferenceEmbeddingCache;
use crate::constants::{DEFAULT_PROVIDER_TIMEOUT_MS, DEFAULT_SEMANTIC_WEIGHT};
use crate::embedding::{CompactEmbedding, Embedding, EmbeddingError, EmbeddingProvider};
use crate::hashing::reference_cache_key;
use crate::scoring::{ScoringError, SimilaritySignal};

/// Cosine-similarity scorer over an [`EmbeddingProvider`].
///
/// Every provider call is bounded by the configured timeout and every returned vector
/// is validated against the provider's declared dimension. Reference embeddings go
/// through the shared [`ReferenceEmbeddingCache`]; candidate embeddings are never
/// cached.
pub struct SemanticScorer<P> {
    provider: Arc<P>,
    cache: ReferenceEmbeddingCache,
    timeout: Duration,
    weight: f32,
}

impl<P> Clone for SemanticScorer<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            cache: self.cache.clone(),
            timeout: self.timeout,
            weight: self.weight,
        }
    }
}

impl<P: EmbeddingProvider> std::fmt::Debug for SemanticScorer<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SemanticScorer")
            .field("provider", &self.provider.name())
            .field("version", &self.provider.version())
            .field("dimension", &self.provider.dimension())
            .field("timeout", &self.timeout)
            .field("weight", &self.weight)
            .field("cache", &self.cache)
            .finish()
    }
}

impl<P: EmbeddingProvider> SemanticScorer<P> {
    pub fn new(provider: Arc<P>, cache: ReferenceEmbeddingCache) -> Self {
        Self {
            provider,
            cache,
            timeout: Duration::from_millis(DEFAULT_PROVIDER_TIMEOUT_MS),
            weight: DEFAULT_SEMANTIC_WEIGHT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    #[inline]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    #[inline]
    pub fn cache(&self) -> &ReferenceEmbeddingCache {
        &self.cache
    }

    #[inline]
    pub fn weight(&self) -> f32 {
        self.weight
    }

    /// Scores two texts without touching the cache.
    #[instrument(skip_all, fields(provider = self.provider.name()))]
    pub async fn semantic_score(
        &self,
        reference: &str,
        candidate: &str,
    ) -> Result<SimilaritySignal, ScoringError> {
        let (reference, candidate) =
            tokio::try_join!(self.embed_text(reference), self.embed_text(candidate))?;
        Ok(self.signal(reference.similarity(&candidate)))
    }

    /// Scores `candidate` against a question's reference form, caching the reference
    /// embedding under the question id.
    #[instrument(skip(self, reference, candidate), fields(provider = self.provider.name()))]
    pub async fn score_for_question(
        &self,
        question_id: &str,
        reference: &str,
        candidate: &str,
    ) -> Result<SimilaritySignal, ScoringError> {
        let (reference, candidate) = tokio::try_join!(
            self.reference_embedding(question_id, reference),
            self.embed_text(candidate)
        )?;
        Ok(self.score_embeddings(&reference, &candidate))
    }

    /// Signal for a cached reference against a candidate embedding.
    pub fn score_embeddings(
        &self,
        reference: &CompactEmbedding,
        candidate: &Embedding,
    ) -> SimilaritySignal {
        self.signal(reference.similarity(candidate))
    }

    /// Embeds and validates `text` with no caching.
    pub async fn embed_text(&self, text: &str) -> Result<Embedding, ScoringError> {
        self.embed_validated(text)
            .await
            .map_err(|e| self.unavailable(e.to_string()))
    }

    /// Returns the reference embedding for one form of a question, embedding it on a
    /// cache miss. Concurrent misses share one provider call.
    pub async fn reference_embedding(
        &self,
        question_id: &str,
        text: &str,
    ) -> Result<Arc<CompactEmbedding>, ScoringError> {
        let key = reference_cache_key(question_id, self.provider.version(), text);

        self.cache
            .get_or_try_insert_with(key, async {
                debug!(question_id, "Reference embedding cache miss");
                self.embed_validated(text)
                    .await
                    .map(|embedding| embedding.to_compact())
            })
            .await
            .map_err(|e| self.unavailable(e.to_string()))
    }

    async fn embed_validated(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        let raw = tokio::time::timeout(self.timeout, self.provider.embed(text))
            .await
            .map_err(|_| {
                warn!(
                    provider = self.provider.name(),
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Embedding provider timed out"
                );
                EmbeddingError::Timeout {
                    after_ms: self.timeout.as_millis() as u64,
                }
            })??;

        Embedding::new(raw, self.provider.dimension())
    }

    fn signal(&self, similarity: f32) -> SimilaritySignal {
        SimilaritySignal::semantic(similarity, self.weight)
    }

    fn unavailable(&self, reason: String) -> ScoringError {
        ScoringError::ProviderUnavailable {
            provider: self.provider.name().to_string(),
            reason,
        }
    }
}
