//! Questions and learner submissions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a question or submission cannot be verified.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuestionError {
    #[error("question id must not be blank")]
    BlankId,

    #[error("question '{id}' has a blank reference answer")]
    BlankReference { id: String },

    /// A submission targeted a different question.
    #[error("submission for question '{submitted}' cannot be verified against '{expected}'")]
    SubmissionMismatch { expected: String, submitted: String },
}

/// A question with its reference answer.
///
/// Immutable once issued. Deserializes from the JSON records a question bank provides;
/// `variants` and `key_concepts` default to empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    #[serde(default)]
    pub prompt: String,
    pub reference: String,
    /// Other acceptable answers, each scored like the reference.
    #[serde(default)]
    pub variants: Vec<String>,
    /// Terms or phrases a complete answer must contain.
    #[serde(default)]
    pub key_concepts: Vec<String>,
}

impl Question {
    pub fn new(
        id: impl Into<String>,
        prompt: impl Into<String>,
        reference: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            reference: reference.into(),
            variants: Vec::new(),
            key_concepts: Vec::new(),
        }
    }

    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variants.push(variant.into());
        self
    }

    pub fn with_key_concepts<I, S>(mut self, concepts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.key_concepts.extend(concepts.into_iter().map(Into::into));
        self
    }

    /// Checks that the id and reference answer are non-blank.
    pub fn validate(&self) -> Result<(), QuestionError> {
        if self.id.trim().is_empty() {
            return Err(QuestionError::BlankId);
        }
        if self.reference.trim().is_empty() {
            return Err(QuestionError::BlankReference {
                id: self.id.clone(),
            });
        }
        Ok(())
    }

    /// Reference answer first, then non-blank variants in declaration order.
    pub fn reference_forms(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.reference.as_str()).chain(
            self.variants
                .iter()
                .map(String::as_str)
                .filter(|v| !v.trim().is_empty()),
        )
    }

    #[inline]
    pub fn has_key_concepts(&self) -> bool {
        self.key_concepts.iter().any(|c| !c.trim().is_empty())
    }
}

/// A learner's answer to one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSubmission {
    pub question_id: String,
    pub text: String,
    pub submitted_at: DateTime<Utc>,
}

impl AnswerSubmission {
    /// Creates a submission stamped with the current time.
    pub fn new(question_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            text: text.into(),
            submitted_at: Utc::now(),
        }
    }

    /// Checks that the submission targets `question`.
    pub fn ensure_for(&self, question: &Question) -> Result<(), QuestionError> {
        if self.question_id != question.id {
            return Err(QuestionError::SubmissionMismatch {
                expected: question.id.clone(),
                submitted: self.question_id.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mitosis() -> Question {
        Question::new(
            "bio-1",
            "What is mitosis?",
            "Mitosis is cell division producing two identical daughter cells.",
        )
    }

    #[test]
    fn test_validate_ok() {
        assert!(mitosis().validate().is_ok());
    }

    #[test]
    fn test_validate_blank_id() {
        let mut q = mitosis();
        q.id = "  ".to_string();
        assert_eq!(q.validate(), Err(QuestionError::BlankId));
    }

    #[test]
    fn test_validate_blank_reference() {
        let mut q = mitosis();
        q.reference = "\n\t".to_string();
        assert!(matches!(
            q.validate(),
            Err(QuestionError::BlankReference { id }) if id == "bio-1"
        ));
    }

    #[test]
    fn test_reference_forms_order_skips_blank_variants() {
        let q = mitosis()
            .with_variant("Division of a cell into two identical cells.")
            .with_variant("   ")
            .with_variant("Nuclear division.");

        let forms: Vec<&str> = q.reference_forms().collect();
        assert_eq!(forms.len(), 3);
        assert_eq!(forms[0], q.reference);
        assert_eq!(forms[2], "Nuclear division.");
    }

    #[test]
    fn test_deserialize_defaults() {
        let q: Question = serde_json::from_str(
            r#"{"id": "q1", "reference": "Paris is the capital of France."}"#,
        )
        .expect("minimal question should deserialize");

        assert_eq!(q.prompt, "");
        assert!(q.variants.is_empty());
        assert!(!q.has_key_concepts());
    }

    #[test]
    fn test_has_key_concepts_ignores_blank() {
        let q = mitosis().with_key_concepts(["", " "]);
        assert!(!q.has_key_concepts());

        let q = mitosis().with_key_concepts(["daughter cells"]);
        assert!(q.has_key_concepts());
    }

    #[test]
    fn test_submission_mismatch() {
        let q = mitosis();
        let ok = AnswerSubmission::new("bio-1", "cells divide");
        assert!(ok.ensure_for(&q).is_ok());

        let wrong = AnswerSubmission::new("bio-2", "cells divide");
        assert_eq!(
            wrong.ensure_for(&q),
            Err(QuestionError::SubmissionMismatch {
                expected: "bio-1".to_string(),
                submitted: "bio-2".to_string(),
            })
        );
    }
}
