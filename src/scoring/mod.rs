//! Signal types and verdict aggregation.
//!
//! Scorers emit [`SimilaritySignal`]s; the [`VerdictAggregator`] folds them into a
//! weighted confidence, measures key-concept coverage and classifies the result into a
//! [`Verdict`].

pub mod aggregator;
pub mod error;
pub mod types;


pub use aggregator::{VerdictAggregator, classify, weighted_confidence};
pub use error::ScoringError;
pub use types::{
    ConceptCoverage, SignalKind, SimilaritySignal, Verdict, VerdictClass, clamp_unit,
};
