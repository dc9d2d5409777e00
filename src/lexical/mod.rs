//! Lexical similarity: token-set overlap blended with token edit similarity.
//!
//! Cheap and deterministic. It always runs, so a verdict is available even when the
//! embedding provider is down.


use std::collections::HashSet;

use crate::constants::{DEFAULT_LEXICAL_WEIGHT, LEXICAL_OVERLAP_WEIGHT, LEXICAL_SEQUENCE_WEIGHT};
use crate::normalize::NormalizedText;
use crate::scoring::SimilaritySignal;

/// Produces [`SignalKind::Lexical`](crate::scoring::SignalKind::Lexical) signals with a
/// fixed weight.
#[derive(Debug, Clone, Copy)]
pub struct LexicalMatcher {
    weight: f32,
}

impl Default for LexicalMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_LEXICAL_WEIGHT)
    }
}

impl LexicalMatcher {
    pub fn new(weight: f32) -> Self {
        Self { weight }
    }

    #[inline]
    pub fn weight(&self) -> f32 {
        self.weight
    }

    /// Scores `candidate` against `reference`. Symmetric in its arguments.
    pub fn score(&self, reference: &NormalizedText, candidate: &NormalizedText) -> SimilaritySignal {
        SimilaritySignal::lexical(token_similarity(reference.tokens(), candidate.tokens()), self.weight)
    }
}

/// Lexical signal with the default weight.
pub fn lexical_score(reference: &NormalizedText, candidate: &NormalizedText) -> SimilaritySignal {
    LexicalMatcher::default().score(reference, candidate)
}

/// Blended similarity of two token sequences in `[0, 1]`.
///
/// Both empty is a perfect match; exactly one empty scores zero.
pub fn token_similarity(a: &[String], b: &[String]) -> f32 {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return 1.0,
        (true, false) | (false, true) => return 0.0,
        _ => {}
    }

    let overlap = jaccard(a, b);
    let max_len = a.len().max(b.len());
    let sequence = 1.0 - levenshtein(a, b) as f32 / max_len as f32;

    LEXICAL_OVERLAP_WEIGHT * overlap + LEXICAL_SEQUENCE_WEIGHT * sequence
}

/// Jaccard index of the distinct tokens.
pub fn jaccard(a: &[String], b: &[String]) -> f32 {
    let a: HashSet<&str> = a.iter().map(String::as_str).collect();
    let b: HashSet<&str> = b.iter().map(String::as_str).collect();

    let union = a.union(&b).count();
    if union == 0 {
        return 1.0;
    }
    a.intersection(&b).count() as f32 / union as f32
}

/// Token-level edit distance.
///
/// Two rows sized by the shorter sequence; O(n·m) time, no backtracking.
pub fn levenshtein<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return long.len();
    }

    let mut prev: Vec<usize> = (0..=short.len()).collect();
    let mut curr = vec![0usize; short.len() + 1];

    for (i, l) in long.iter().enumerate() {
        curr[0] = i + 1;
        for (j, s) in short.iter().enumerate() {
            let cost = usize::from(l != s);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[short.len()]
}
