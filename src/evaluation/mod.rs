//! Offline evaluation of a verifier against labelled answers.
//!
//! An [`EvaluationSet`] pairs questions and answers with the verdict a human grader
//! expects. [`evaluate`] runs every case and reports verdict agreement plus per-metric
//! averages (cosine, lexical, BLEU-4, METEOR, ROUGE-3, confidence), which is how providers and
//! thresholds get compared.

pub mod ngram;
pub mod report;

#[cfg(test)]
mod tests;

pub use ngram::{BLEU_EPSILON, METEOR_ALPHA, bleu4, meteor, rouge3, rouge_n};
pub use report::{CaseResult, EvaluationReport, Metric, MetricSummary};

use std::path::{Path, PathBuf};

use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument};

use crate::embedding::EmbeddingProvider;
use crate::engine::{Verifier, VerifyError};
use crate::normalize::Normalizer;
use crate::question::Question;
use crate::scoring::{SignalKind, VerdictClass};

#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("failed to read or write {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid evaluation set: {reason}")]
    Parse { reason: String },

    #[error("evaluation set contains no cases")]
    Empty,

    #[error(transparent)]
    Verify(#[from] VerifyError),
}

/// One labelled answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationCase {
    pub question: Question,
    pub answer: String,
    pub expected: VerdictClass,
}

/// Labelled cases, loaded from a JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvaluationSet {
    pub cases: Vec<EvaluationCase>,
}

impl EvaluationSet {
    pub fn new(cases: Vec<EvaluationCase>) -> Self {
        Self { cases }
    }

    pub fn from_json_str(json: &str) -> Result<Self, EvaluationError> {
        let set: Self = serde_json::from_str(json).map_err(|e| EvaluationError::Parse {
            reason: e.to_string(),
        })?;
        if set.cases.is_empty() {
            return Err(EvaluationError::Empty);
        }
        Ok(set)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, EvaluationError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| EvaluationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

/// Runs every case through `verifier` concurrently and summarizes the results.
///
/// Fails on the first invalid question.
#[instrument(skip_all, fields(provider = verifier.provider().name(), cases = set.len()))]
pub async fn evaluate<P: EmbeddingProvider>(
    verifier: &Verifier<P>,
    set: &EvaluationSet,
) -> Result<EvaluationReport, EvaluationError> {
    let normalizer = Normalizer::new(verifier.config().language);

    let outcomes = join_all(set.cases.iter().map(|case| async move {
        let feedback = verifier.verify(&case.question, &case.answer).await?;
        let verdict = feedback.verdict();

        let reference = normalizer.normalize(&case.question.reference);
        let answer = normalizer.normalize(&case.answer);

        let mut scores = Vec::with_capacity(Metric::ALL.len());
        if let Some(cosine) = verdict.semantic_score() {
            scores.push((Metric::CosineSimilarity, cosine));
        }
        if let Some(lexical) = verdict.signal(SignalKind::Lexical) {
            scores.push((Metric::Lexical, lexical.score()));
        }
        scores.push((Metric::Bleu4, bleu4(reference.tokens(), answer.tokens())));
        scores.push((Metric::Meteor, meteor(reference.tokens(), answer.tokens())));
        scores.push((Metric::Rouge3, rouge3(reference.tokens(), answer.tokens())));
        scores.push((Metric::Confidence, verdict.confidence()));

        Ok::<_, EvaluationError>(CaseResult {
            question_id: case.question.id.clone(),
            expected: case.expected,
            actual: feedback.class(),
            degraded: feedback.is_degraded(),
            scores,
        })
    }))
    .await;

    let cases = outcomes.into_iter().collect::<Result<Vec<_>, _>>()?;
    let report = EvaluationReport::from_cases(verifier.provider().name(), cases);

    info!(
        agreement = report.agreement,
        accuracy = report.accuracy(),
        "Evaluation finished"
    );

    Ok(report)
}
