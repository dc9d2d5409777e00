use crate::constants::{DEFAULT_LOW_THRESHOLD, FEEDBACK_QUOTE_CHARS};
use crate::question::Question;
use crate::scoring::{Verdict, VerdictClass};

use super::types::{Feedback, Observation, ObservationKind};

pub const NO_ANSWER_MESSAGE: &str = "No answer provided.";

/// Turns a verdict and its signal trace into [`Feedback`].
#[derive(Debug, Clone, Copy)]
pub struct FeedbackComposer {
    low_threshold: f32,
}

impl Default for FeedbackComposer {
    fn default() -> Self {
        Self::new(DEFAULT_LOW_THRESHOLD)
    }
}

impl FeedbackComposer {
    /// `low_threshold` separates on-topic from unrelated semantic scores.
    pub fn new(low_threshold: f32) -> Self {
        Self { low_threshold }
    }

    pub fn compose(&self, verdict: Verdict, question: &Question, candidate: &str) -> Feedback {
        let mut observations = vec![Observation::new(
            ObservationKind::Verdict,
            verdict_statement(verdict.class()),
        )];

        if let Some(coverage) = verdict.coverage() {
            if !coverage.matched.is_empty() {
                observations.push(Observation::new(
                    ObservationKind::MatchedConcepts,
                    format!("Covered key concepts: {}.", coverage.matched.join(", ")),
                ));
            }
            if verdict.class() != VerdictClass::Correct && !coverage.missing.is_empty() {
                observations.push(Observation::new(
                    ObservationKind::MissingConcepts,
                    format!("Missing key concepts: {}.", coverage.missing.join(", ")),
                ));
            }
        }

        if verdict.class() != VerdictClass::Correct
            && let Some(semantic) = verdict.semantic_score()
        {
            let note = if semantic >= self.low_threshold {
                "Your answer is on-topic but incomplete.".to_string()
            } else if question.prompt.trim().is_empty() {
                format!("Your answer \"{}\" appears unrelated.", excerpt(candidate))
            } else {
                format!(
                    "Your answer \"{}\" appears unrelated to the question \"{}\".",
                    excerpt(candidate),
                    excerpt(&question.prompt)
                )
            };
            observations.push(Observation::new(ObservationKind::Phrasing, note));
        }

        Feedback::new(verdict, observations)
    }

    /// Feedback for a blank or unreadable answer.
    pub fn no_answer(&self) -> Feedback {
        Feedback::new(
            Verdict::unanswered(),
            vec![Observation::new(ObservationKind::NoAnswer, NO_ANSWER_MESSAGE)],
        )
    }
}

fn verdict_statement(class: VerdictClass) -> &'static str {
    match class {
        VerdictClass::Correct => "Correct. Your answer matches the expected answer.",
        VerdictClass::PartiallyCorrect => {
            "Partially correct. Your answer covers part of the expected answer."
        }
        VerdictClass::Incorrect => "Incorrect. Your answer does not match the expected answer.",
    }
}

/// First [`FEEDBACK_QUOTE_CHARS`] characters of the trimmed, whitespace-collapsed text.
pub(crate) fn excerpt(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= FEEDBACK_QUOTE_CHARS {
        return collapsed;
    }

    let mut cut: String = collapsed.chars().take(FEEDBACK_QUOTE_CHARS).collect();
    cut.truncate(cut.trim_end().len());
    cut.push('…');
    cut
}
