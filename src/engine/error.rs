use thiserror::Error;

use crate::question::QuestionError;

/// Errors returned to the caller of [`Verifier::verify`](super::Verifier::verify).
///
/// Provider trouble and unreadable answers are not errors; they surface as degraded
/// or `no answer` feedback instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VerifyError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] QuestionError),
}
