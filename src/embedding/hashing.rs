//! Local feature-hashing embedder.
//!
//! Hashes normalized word tokens and boundary-marked character trigrams into signed
//! buckets, then L2-normalizes. Deterministic, offline and always available; it picks
//! up shared stems and spelling overlap, not synonyms.

use crate::constants::DEFAULT_EMBEDDING_DIM;
use crate::normalize::Normalizer;

use super::error::EmbeddingError;
use super::provider::EmbeddingProvider;

const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

const WORD_FEATURE_WEIGHT: f32 = 1.0;
const TRIGRAM_FEATURE_WEIGHT: f32 = 0.5;

/// Feature-hashing [`EmbeddingProvider`].
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimension: usize,
    normalizer: Normalizer,
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_EMBEDDING_DIM)
    }
}

impl HashingEmbedder {
    pub const NAME: &'static str = "hashing";
    pub const VERSION: &'static str = "fnv1a-w1-c3-v1";

    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            normalizer: Normalizer::default(),
        }
    }

    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Embeds synchronously. Text with no surviving tokens maps to the zero vector.
    pub fn embed_sync(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimension];
        if self.dimension == 0 {
            return vector;
        }

        for token in self.normalizer.tokenize(text) {
            self.add_feature(&mut vector, &format!("w:{token}"), WORD_FEATURE_WEIGHT);

            let marked: Vec<char> = std::iter::once('#')
                .chain(token.chars())
                .chain(std::iter::once('#'))
                .collect();
            for trigram in marked.windows(3) {
                let feature: String = std::iter::once('c')
                    .chain(std::iter::once(':'))
                    .chain(trigram.iter().copied())
                    .collect();
                self.add_feature(&mut vector, &feature, TRIGRAM_FEATURE_WEIGHT);
            }
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vector {
                *v /= norm;
            }
        }

        vector
    }

    fn add_feature(&self, vector: &mut [f32], feature: &str, weight: f32) {
        let hash = fnv1a(feature.as_bytes());
        let bucket = (hash % self.dimension as u64) as usize;
        let sign = if hash >> 63 == 1 { -1.0 } else { 1.0 };
        vector[bucket] += sign * weight;
    }
}

impl EmbeddingProvider for HashingEmbedder {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn version(&self) -> &str {
        Self::VERSION
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Ok(self.embed_sync(text))
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |h, &b| {
        (h ^ u64::from(b)).wrapping_mul(FNV_PRIME)
    })
}
