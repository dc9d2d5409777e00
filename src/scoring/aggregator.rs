use std::collections::HashSet;

use tracing::debug;

use crate::config::{Config, SignalWeights, Thresholds};
use crate::normalize::{NormalizedText, Normalizer};
use crate::question::Question;

use super::types::{ConceptCoverage, SignalKind, SimilaritySignal, Verdict, VerdictClass};

/// Weighted mean of signal scores.
///
/// Returns `0.0` for an empty list or when every weight is zero.
pub fn weighted_confidence(signals: &[SimilaritySignal]) -> f32 {
    let total = total_weight(signals);
    if total <= 0.0 {
        return 0.0;
    }

    let weighted: f32 = signals.iter().map(|s| s.weight() * s.score()).sum();
    (weighted / total).clamp(0.0, 1.0)
}

/// Maps a confidence and optional concept coverage onto a verdict class.
///
/// Both thresholds are inclusive. Partial concept coverage alone is enough for
/// PartiallyCorrect; Correct also requires every concept to be covered.
pub fn classify(
    confidence: f32,
    coverage: Option<&ConceptCoverage>,
    thresholds: &Thresholds,
) -> VerdictClass {
    let concepts_complete = coverage.is_none_or(ConceptCoverage::is_complete);
    let concepts_partial = coverage.is_some_and(ConceptCoverage::is_partial);

    if confidence >= thresholds.high && concepts_complete {
        VerdictClass::Correct
    } else if confidence >= thresholds.low || concepts_partial {
        VerdictClass::PartiallyCorrect
    } else {
        VerdictClass::Incorrect
    }
}

/// Combines similarity signals into a [`Verdict`].
#[derive(Debug, Clone)]
pub struct VerdictAggregator {
    weights: SignalWeights,
    thresholds: Thresholds,
    normalizer: Normalizer,
}

impl Default for VerdictAggregator {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl VerdictAggregator {
    pub fn new(weights: SignalWeights, thresholds: Thresholds, normalizer: Normalizer) -> Self {
        Self {
            weights,
            thresholds,
            normalizer,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.weights,
            config.thresholds,
            Normalizer::new(config.language),
        )
    }

    #[inline]
    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Aggregates `signals` for `candidate` answering `question`.
    ///
    /// When the question declares key concepts, a concept-coverage signal is appended
    /// (unless the caller already supplied one) and the coverage gates the class.
    pub fn aggregate(
        &self,
        signals: &[SimilaritySignal],
        question: &Question,
        candidate: &NormalizedText,
    ) -> Verdict {
        let mut trace = signals.to_vec();
        let coverage = self.concept_coverage(question, candidate);

        if let Some(coverage) = &coverage
            && !trace
                .iter()
                .any(|s| s.kind() == SignalKind::ConceptCoverage)
        {
            trace.push(SimilaritySignal::concept_coverage(
                coverage.ratio,
                self.weights.concept_coverage,
            ));
        }

        let confidence = weighted_confidence(&trace);
        let class = if signals.is_empty() || total_weight(&trace) <= 0.0 {
            VerdictClass::Incorrect
        } else {
            classify(confidence, coverage.as_ref(), &self.thresholds)
        };

        debug!(
            question_id = %question.id,
            confidence,
            class = class.as_str(),
            coverage = coverage.as_ref().map(|c| c.ratio),
            num_signals = trace.len(),
            "Aggregated verdict"
        );

        Verdict::new(class, confidence, trace, coverage)
    }

    /// Measures which of the question's key concepts the candidate covers.
    ///
    /// A concept's credit is the share of its distinct normalized tokens present in the
    /// candidate. Concepts that normalize to nothing are ignored; `None` if none remain.
    pub fn concept_coverage(
        &self,
        question: &Question,
        candidate: &NormalizedText,
    ) -> Option<ConceptCoverage> {
        let candidate_tokens = candidate.unique_tokens();

        let mut matched = Vec::new();
        let mut missing = Vec::new();
        let mut total_credit = 0.0f32;

        for concept in &question.key_concepts {
            let normalized = self.normalizer.normalize(concept);
            let concept_tokens: HashSet<&str> = normalized.unique_tokens();
            if concept_tokens.is_empty() {
                continue;
            }

            let found = concept_tokens
                .iter()
                .filter(|t| candidate_tokens.contains(*t))
                .count();
            let credit = found as f32 / concept_tokens.len() as f32;
            total_credit += credit;

            let label = concept.trim().to_string();
            if found == concept_tokens.len() {
                matched.push(label);
            } else {
                missing.push(label);
            }
        }

        let counted = matched.len() + missing.len();
        if counted == 0 {
            return None;
        }

        Some(ConceptCoverage {
            matched,
            missing,
            ratio: (total_credit / counted as f32).clamp(0.0, 1.0),
        })
    }
}

fn total_weight(signals: &[SimilaritySignal]) -> f32 {
    signals.iter().map(SimilaritySignal::weight).sum()
}
