//! Human-readable feedback for a verdict.
//!
//! Purely textual and deterministic: the same verdict, question and answer always
//! produce the same observations.

pub mod composer;
pub mod types;


pub use composer::{FeedbackComposer, NO_ANSWER_MESSAGE};
pub use types::{Feedback, Observation, ObservationKind, Warning};
