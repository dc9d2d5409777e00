//! Validated fixed-dimension embeddings and cosine similarity.

use half::f16;

use super::error::EmbeddingError;
use crate::constants::validate_embedding_dim;

/// An embedding whose dimension and values have been checked.
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding {
    values: Vec<f32>,
}

impl Embedding {
    /// Validates a raw provider vector.
    ///
    /// Fails if the length differs from `expected_dim` or any value is not finite.
    pub fn new(values: Vec<f32>, expected_dim: usize) -> Result<Self, EmbeddingError> {
        validate_embedding_dim(values.len(), expected_dim)?;

        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(EmbeddingError::InvalidVector {
                reason: format!("non-finite value at index {index}"),
            });
        }

        Ok(Self { values })
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// Cosine similarity clamped into `[0, 1]`.
    pub fn similarity(&self, other: &Embedding) -> f32 {
        clamp_cosine(cosine_similarity_f32(&self.values, &other.values))
    }

    /// Converts to half precision for caching.
    pub fn to_compact(&self) -> CompactEmbedding {
        CompactEmbedding {
            values: self.values.iter().map(|&v| f16::from_f32(v)).collect(),
        }
    }
}

/// Half-precision embedding, as stored in the reference cache.
#[derive(Debug, Clone, PartialEq)]
pub struct CompactEmbedding {
    values: Vec<f16>,
}

impl CompactEmbedding {
    #[inline]
    pub fn dimension(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f16] {
        &self.values
    }

    /// Bytes held by the vector payload.
    #[inline]
    pub fn size_bytes(&self) -> usize {
        self.values.len() * std::mem::size_of::<f16>()
    }

    /// Cosine similarity against a full-precision embedding, clamped into `[0, 1]`.
    pub fn similarity(&self, other: &Embedding) -> f32 {
        clamp_cosine(cosine_similarity_f16_f32(&self.values, other.as_slice()))
    }

    pub fn to_f32_vec(&self) -> Vec<f32> {
        self.values.iter().map(|v| v.to_f32()).collect()
    }
}

/// Clamps a cosine into `[0, 1]`; NaN becomes zero.
#[inline]
fn clamp_cosine(cosine: f32) -> f32 {
    if cosine.is_nan() {
        0.0
    } else {
        cosine.clamp(0.0, 1.0)
    }
}

/// Raw cosine similarity. Zero for mismatched lengths, empty input or zero vectors.
pub fn cosine_similarity_f32(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (dot, norm_a_sq, norm_b_sq) = a
        .iter()
        .zip(b.iter())
        .fold((0.0f32, 0.0f32, 0.0f32), |(dot, na, nb), (&av, &bv)| {
            (dot + av * bv, na + av * av, nb + bv * bv)
        });

    let norm_a = norm_a_sq.sqrt();
    let norm_b = norm_b_sq.sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

#[inline]
pub fn cosine_similarity_f16_f32(a: &[f16], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot_product = 0.0f32;
    let mut norm_a_sq = 0.0f32;
    let mut norm_b_sq = 0.0f32;

    for (av_f16, &bv) in a.iter().zip(b.iter()) {
        let av = av_f16.to_f32();
        dot_product += av * bv;
        norm_a_sq += av * av;
        norm_b_sq += bv * bv;
    }

    let norm_a = norm_a_sq.sqrt();
    let norm_b = norm_b_sq.sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}
