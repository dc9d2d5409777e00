//! Answer verification pipeline.
//!
//! A call validates the question, normalizes the candidate once, scores every reference
//! form lexically and semantically (concurrently), aggregates a verdict per form, keeps
//! the best one and composes feedback. A failing embedding provider degrades the call
//! to lexical-only scoring instead of failing it.

pub mod error;


pub use error::VerifyError;

use std::sync::Arc;

use futures_util::future::try_join_all;
use tracing::{debug, info, instrument, warn};

use crate::cache::ReferenceEmbeddingCache;
use crate::config::{Config, ConfigError};
use crate::constants::validate_embedding_dim;
use crate::embedding::EmbeddingProvider;
use crate::feedback::{Feedback, FeedbackComposer, Warning};
use crate::lexical::LexicalMatcher;
use crate::normalize::{NormalizedText, Normalizer};
use crate::question::{AnswerSubmission, Question};
use crate::scoring::{ScoringError, SimilaritySignal, Verdict, VerdictAggregator};
use crate::semantic::SemanticScorer;

struct VerifierInner<P> {
    config: Config,
    normalizer: Normalizer,
    lexical: LexicalMatcher,
    semantic: SemanticScorer<P>,
    aggregator: VerdictAggregator,
    composer: FeedbackComposer,
}

/// Verifies learner answers against questions.
///
/// Cheap to clone; clones share the provider and the reference-embedding cache.
pub struct Verifier<P> {
    inner: Arc<VerifierInner<P>>,
}

impl<P> Clone for Verifier<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P: EmbeddingProvider> std::fmt::Debug for Verifier<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Verifier")
            .field("config", &self.inner.config)
            .field("semantic", &self.inner.semantic)
            .finish()
    }
}

impl<P: EmbeddingProvider> Verifier<P> {
    /// Builds a verifier. Fails if `config` is invalid or the provider's dimension
    /// differs from `config.embedding_dim`.
    pub fn new(
        config: Config,
        provider: Arc<P>,
        cache: ReferenceEmbeddingCache,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        validate_embedding_dim(provider.dimension(), config.embedding_dim).map_err(|_| {
            ConfigError::DimensionMismatch {
                provider: provider.name().to_string(),
                expected: config.embedding_dim,
                actual: provider.dimension(),
            }
        })?;

        info!(
            provider = provider.name(),
            provider_version = provider.version(),
            dimension = config.embedding_dim,
            bytes_per_reference = config.dims().f16_bytes(),
            language = %config.language,
            "Verifier initialized"
        );

        let semantic = SemanticScorer::new(provider, cache)
            .with_timeout(config.provider_timeout)
            .with_weight(config.weights.semantic);

        Ok(Self {
            inner: Arc::new(VerifierInner {
                normalizer: Normalizer::new(config.language),
                lexical: LexicalMatcher::new(config.weights.lexical),
                semantic,
                aggregator: VerdictAggregator::from_config(&config),
                composer: FeedbackComposer::new(config.thresholds.low),
                config,
            }),
        })
    }

    /// Builds a verifier with its own cache sized from `config`.
    pub fn from_config(config: Config, provider: Arc<P>) -> Result<Self, ConfigError> {
        let cache = ReferenceEmbeddingCache::from_config(&config);
        Self::new(config, provider, cache)
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    #[inline]
    pub fn provider(&self) -> &P {
        self.inner.semantic.provider()
    }

    #[inline]
    pub fn cache(&self) -> &ReferenceEmbeddingCache {
        self.inner.semantic.cache()
    }

    /// Verifies `candidate` as an answer to `question`.
    ///
    /// Only an invalid question is an error. A blank or binary candidate yields
    /// Incorrect "No answer provided." feedback; an unavailable provider yields a
    /// lexical-only verdict carrying a [`Warning::DegradedMode`].
    #[instrument(skip(self, question, candidate), fields(question_id = %question.id, candidate_len = candidate.len()))]
    pub async fn verify(&self, question: &Question, candidate: &str) -> Result<Feedback, VerifyError> {
        question.validate()?;

        if !is_readable_answer(candidate) {
            info!(class = "INCORRECT", "No answer provided");
            return Ok(self.inner.composer.no_answer());
        }

        let inner = &self.inner;
        let candidate_text = inner.normalizer.normalize(candidate);
        let forms: Vec<&str> = question.reference_forms().collect();

        let (lexical, semantic) = tokio::join!(
            async { self.lexical_signals(&forms, &candidate_text) },
            self.semantic_signals(&question.id, &forms, candidate)
        );

        let (semantic, degraded) = match semantic {
            Ok(signals) => (Some(signals), None),
            Err(err) => {
                warn!(error = %err, "Semantic scoring unavailable, falling back to lexical only");
                (None, Some(err))
            }
        };

        let verdict = self.best_verdict(question, &candidate_text, lexical, semantic);

        info!(
            class = verdict.class().as_str(),
            confidence = verdict.confidence(),
            degraded = degraded.is_some(),
            forms = forms.len(),
            "Answer verified"
        );

        let feedback = inner.composer.compose(verdict, question, candidate);
        Ok(match degraded {
            Some(err) => feedback.with_warning(Warning::DegradedMode {
                reason: degraded_reason(&err),
            }),
            None => feedback,
        })
    }

    /// Verifies a submission; it must target `question`.
    pub async fn verify_submission(
        &self,
        question: &Question,
        submission: &AnswerSubmission,
    ) -> Result<Feedback, VerifyError> {
        submission.ensure_for(question)?;
        self.verify(question, &submission.text).await
    }

    fn lexical_signals(&self, forms: &[&str], candidate: &NormalizedText) -> Vec<SimilaritySignal> {
        forms
            .iter()
            .map(|form| {
                let reference = self.inner.normalizer.normalize(form);
                self.inner.lexical.score(&reference, candidate)
            })
            .collect()
    }

    /// One semantic signal per form. The candidate is embedded once; reference forms
    /// come from the cache.
    async fn semantic_signals(
        &self,
        question_id: &str,
        forms: &[&str],
        candidate: &str,
    ) -> Result<Vec<SimilaritySignal>, ScoringError> {
        let semantic = &self.inner.semantic;

        let (candidate, references) = tokio::try_join!(
            semantic.embed_text(candidate),
            try_join_all(
                forms
                    .iter()
                    .map(|form| semantic.reference_embedding(question_id, form))
            )
        )?;

        Ok(references
            .iter()
            .map(|reference| semantic.score_embeddings(reference, &candidate))
            .collect())
    }

    /// Aggregates each form and keeps the highest confidence; ties go to the earliest form.
    fn best_verdict(
        &self,
        question: &Question,
        candidate: &NormalizedText,
        lexical: Vec<SimilaritySignal>,
        semantic: Option<Vec<SimilaritySignal>>,
    ) -> Verdict {
        let mut best: Option<Verdict> = None;

        for (index, lexical) in lexical.into_iter().enumerate() {
            let mut signals = Vec::with_capacity(2);
            match semantic.as_ref().and_then(|s| s.get(index)) {
                Some(semantic) => {
                    signals.push(*semantic);
                    signals.push(lexical);
                }
                // lexical alone decides the verdict, whatever its configured weight
                None => signals.push(lexical.with_weight(1.0)),
            }

            let verdict = self.inner.aggregator.aggregate(&signals, question, candidate);
            debug!(
                form = index,
                confidence = verdict.confidence(),
                class = verdict.class().as_str(),
                "Scored reference form"
            );

            if best
                .as_ref()
                .is_none_or(|b| verdict.confidence() > b.confidence())
            {
                best = Some(verdict);
            }
        }

        best.unwrap_or_else(Verdict::unanswered)
    }
}

/// Blank text or text with non-whitespace control characters is not an answer.
pub fn is_readable_answer(text: &str) -> bool {
    !text.trim().is_empty() && !text.chars().any(|c| c.is_control() && !c.is_whitespace())
}

fn degraded_reason(err: &ScoringError) -> String {
    let ScoringError::ProviderUnavailable { reason, .. } = err;
    reason.clone()
}
