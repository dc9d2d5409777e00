//! Meaning-level similarity via embeddings.

pub mod scorer;


pub use scorer::SemanticScorer;
