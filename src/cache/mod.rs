//! Reference-embedding cache.

pub mod reference;


pub use reference::{CacheStats, ReferenceEmbeddingCache};
