use serde::{Deserialize, Serialize};

/// Clamps a score into `[0, 1]`; NaN becomes `0.0`.
#[inline]
pub fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Kind of evidence a [`SimilaritySignal`] carries.
pub enum SignalKind {
    /// Token overlap + token edit similarity.
    Lexical,
    /// Cosine similarity of embeddings.
    Semantic,
    /// Share of the question's key concepts found in the answer.
    ConceptCoverage,
}

impl SignalKind {
    /// Stable metric name used in traces and reports.
    pub fn name(&self) -> &'static str {
        match self {
            SignalKind::Lexical => "lexical-overlap",
            SignalKind::Semantic => "semantic-cosine",
            SignalKind::ConceptCoverage => "concept-coverage",
        }
    }
}

impl std::fmt::Display for SignalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
/// A named metric with a score and weight, both in `[0, 1]`.
pub struct SimilaritySignal {
    kind: SignalKind,
    score: f32,
    weight: f32,
}

impl SimilaritySignal {
    /// Creates a signal, clamping `score` and `weight` into `[0, 1]`.
    pub fn new(kind: SignalKind, score: f32, weight: f32) -> Self {
        Self {
            kind,
            score: clamp_unit(score),
            weight: clamp_unit(weight),
        }
    }

    pub fn lexical(score: f32, weight: f32) -> Self {
        Self::new(SignalKind::Lexical, score, weight)
    }

    pub fn semantic(score: f32, weight: f32) -> Self {
        Self::new(SignalKind::Semantic, score, weight)
    }

    pub fn concept_coverage(score: f32, weight: f32) -> Self {
        Self::new(SignalKind::ConceptCoverage, score, weight)
    }

    #[inline]
    pub fn kind(&self) -> SignalKind {
        self.kind
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    #[inline]
    pub fn score(&self) -> f32 {
        self.score
    }

    #[inline]
    pub fn weight(&self) -> f32 {
        self.weight
    }

    /// Returns a copy with a different weight.
    pub fn with_weight(self, weight: f32) -> Self {
        Self::new(self.kind, self.score, weight)
    }
}

impl std::fmt::Display for SimilaritySignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}={:.4} (weight {:.2})",
            self.kind.name(),
            self.score,
            self.weight
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Outcome class of a verification, ordered from worst to best.
pub enum VerdictClass {
    Incorrect,
    PartiallyCorrect,
    Correct,
}

impl VerdictClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictClass::Correct => "CORRECT",
            VerdictClass::PartiallyCorrect => "PARTIALLY_CORRECT",
            VerdictClass::Incorrect => "INCORRECT",
        }
    }

    #[inline]
    pub fn is_correct(&self) -> bool {
        matches!(self, VerdictClass::Correct)
    }
}

impl std::fmt::Display for VerdictClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Which key concepts an answer covered.
pub struct ConceptCoverage {
    /// Concepts whose every normalized token appears in the answer.
    pub matched: Vec<String>,
    /// Concepts with at least one token absent from the answer.
    pub missing: Vec<String>,
    /// Mean per-concept token coverage in `[0, 1]`.
    pub ratio: f32,
}

impl ConceptCoverage {
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.ratio >= 1.0
    }

    /// `0 < ratio < 1`.
    #[inline]
    pub fn is_partial(&self) -> bool {
        self.ratio > 0.0 && self.ratio < 1.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Verification verdict with the signal trace that produced it.
pub struct Verdict {
    class: VerdictClass,
    confidence: f32,
    signals: Vec<SimilaritySignal>,
    coverage: Option<ConceptCoverage>,
}

impl Verdict {
    pub fn new(
        class: VerdictClass,
        confidence: f32,
        signals: Vec<SimilaritySignal>,
        coverage: Option<ConceptCoverage>,
    ) -> Self {
        Self {
            class,
            confidence: clamp_unit(confidence),
            signals,
            coverage,
        }
    }

    /// Incorrect verdict with zero confidence and no signals.
    pub fn unanswered() -> Self {
        Self::new(VerdictClass::Incorrect, 0.0, Vec::new(), None)
    }

    #[inline]
    pub fn class(&self) -> VerdictClass {
        self.class
    }

    #[inline]
    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    #[inline]
    pub fn signals(&self) -> &[SimilaritySignal] {
        &self.signals
    }

    #[inline]
    pub fn coverage(&self) -> Option<&ConceptCoverage> {
        self.coverage.as_ref()
    }

    /// Returns the first signal of `kind`, if present.
    pub fn signal(&self, kind: SignalKind) -> Option<&SimilaritySignal> {
        self.signals.iter().find(|s| s.kind() == kind)
    }

    /// Returns the semantic score if the semantic scorer contributed.
    pub fn semantic_score(&self) -> Option<f32> {
        self.signal(SignalKind::Semantic).map(SimilaritySignal::score)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (confidence: {:.4})", self.class, self.confidence)
    }
}
