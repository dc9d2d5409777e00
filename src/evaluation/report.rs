use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::scoring::VerdictClass;

use super::EvaluationError;

/// Metrics recorded for every evaluated case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Metric {
    CosineSimilarity,
    Lexical,
    #[serde(rename = "BLEU_4")]
    Bleu4,
    Meteor,
    #[serde(rename = "ROUGE_3")]
    Rouge3,
    Confidence,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::CosineSimilarity,
        Metric::Lexical,
        Metric::Bleu4,
        Metric::Meteor,
        Metric::Rouge3,
        Metric::Confidence,
    ];

    /// Name used in CSV output.
    pub fn name(&self) -> &'static str {
        match self {
            Metric::CosineSimilarity => "COSINE_SIMILARITY",
            Metric::Lexical => "LEXICAL",
            Metric::Bleu4 => "BLEU_4",
            Metric::Meteor => "METEOR",
            Metric::Rouge3 => "ROUGE_3",
            Metric::Confidence => "CONFIDENCE",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of one evaluated case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseResult {
    pub question_id: String,
    pub expected: VerdictClass,
    pub actual: VerdictClass,
    /// Semantic scoring was unavailable for this case.
    pub degraded: bool,
    /// Metric values; cosine is absent for degraded cases.
    pub scores: Vec<(Metric, f32)>,
}

impl CaseResult {
    #[inline]
    pub fn agrees(&self) -> bool {
        self.expected == self.actual
    }

    pub fn score(&self, metric: Metric) -> Option<f32> {
        self.scores
            .iter()
            .find(|(m, _)| *m == metric)
            .map(|(_, s)| *s)
    }
}

/// Average of one metric over the cases that recorded it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricSummary {
    pub metric: Metric,
    pub average: f32,
    pub samples: usize,
}

/// Results of running a verifier over an evaluation set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub provider: String,
    pub cases: Vec<CaseResult>,
    /// Cases whose verdict matched the expected class.
    pub agreement: usize,
    pub metrics: Vec<MetricSummary>,
}

impl EvaluationReport {
    pub fn from_cases(provider: impl Into<String>, cases: Vec<CaseResult>) -> Self {
        let agreement = cases.iter().filter(|c| c.agrees()).count();
        let metrics = Metric::ALL
            .iter()
            .filter_map(|&metric| {
                let values: Vec<f32> = cases.iter().filter_map(|c| c.score(metric)).collect();
                (!values.is_empty()).then(|| MetricSummary {
                    metric,
                    average: values.iter().sum::<f32>() / values.len() as f32,
                    samples: values.len(),
                })
            })
            .collect();

        Self {
            provider: provider.into(),
            cases,
            agreement,
            metrics,
        }
    }

    /// Share of cases with the expected verdict; `0.0` for an empty report.
    pub fn accuracy(&self) -> f32 {
        if self.cases.is_empty() {
            0.0
        } else {
            self.agreement as f32 / self.cases.len() as f32
        }
    }

    pub fn metric(&self, metric: Metric) -> Option<&MetricSummary> {
        self.metrics.iter().find(|m| m.metric == metric)
    }

    /// `provider,metric,average_score` rows, averages to three decimals.
    pub fn to_csv(&self) -> String {
        let mut csv = String::from("provider,metric,average_score\n");
        for summary in &self.metrics {
            csv.push_str(&format!(
                "{},{},{:.3}\n",
                self.provider,
                summary.metric.name(),
                summary.average
            ));
        }
        csv
    }

    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<(), EvaluationError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_csv()).map_err(|source| EvaluationError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
