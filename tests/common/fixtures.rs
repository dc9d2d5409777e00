//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use verificator::config::Config;
use verificator::embedding::{EmbeddingProvider, HashingEmbedder};
use verificator::engine::Verifier;
use verificator::question::Question;

pub const QUESTION_ID: &str = "bio-mitosis";

pub const PROMPT: &str = "What is mitosis?";

pub const REFERENCE: &str = "Mitosis is cell division producing two identical daughter cells.";

pub const KEY_CONCEPTS: [&str; 2] = ["cell division", "daughter cells"];

pub const GOOD_ANSWER: &str = "Mitosis is when a cell divides into two daughter cells.";

pub const PARTIAL_ANSWER: &str = "Mitosis is a type of cell.";

pub const UNRELATED_ANSWER: &str = "Paris is the capital of France.";

/// The mitosis question with its key concepts.
pub fn mitosis_question() -> Question {
    Question::new(QUESTION_ID, PROMPT, REFERENCE).with_key_concepts(KEY_CONCEPTS)
}

/// The mitosis question without key concepts.
pub fn plain_mitosis_question() -> Question {
    Question::new(QUESTION_ID, PROMPT, REFERENCE)
}

pub fn hashing_verifier() -> Verifier<HashingEmbedder> {
    verifier_with(Config::default(), HashingEmbedder::default())
}

pub fn verifier_with<P: EmbeddingProvider>(config: Config, provider: P) -> Verifier<P> {
    Verifier::from_config(config, Arc::new(provider)).expect("valid verifier config")
}
