use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;

use super::error::EmbeddingError;
use super::hashing::HashingEmbedder;
use super::provider::EmbeddingProvider;

/// Scriptable [`EmbeddingProvider`] for tests.
///
/// Returns fixed vectors for registered texts and falls back to a [`HashingEmbedder`]
/// for everything else. Can be switched into failure mode, delayed, and counts calls
/// per text.
#[derive(Debug)]
pub struct MockEmbeddingProvider {
    dimension: usize,
    fallback: HashingEmbedder,
    fixed: Mutex<HashMap<String, Vec<f32>>>,
    calls: Mutex<HashMap<String, usize>>,
    total_calls: AtomicUsize,
    failing: AtomicBool,
    delay: Mutex<Option<Duration>>,
}

impl Default for MockEmbeddingProvider {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_EMBEDDING_DIM)
    }
}

impl MockEmbeddingProvider {
    pub const NAME: &'static str = "mock";

    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            fallback: HashingEmbedder::new(dimension),
            fixed: Mutex::new(HashMap::new()),
            calls: Mutex::new(HashMap::new()),
            total_calls: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
            delay: Mutex::new(None),
        }
    }

    /// A provider whose every call fails.
    pub fn failing(dimension: usize) -> Self {
        let provider = Self::new(dimension);
        provider.set_failing(true);
        provider
    }

    /// Registers the vector returned for `text`. Lengths are not checked here.
    pub fn with_vector(self, text: impl Into<String>, vector: Vec<f32>) -> Self {
        self.fixed.lock().insert(text.into(), vector);
        self
    }

    pub fn with_delay(self, delay: Duration) -> Self {
        *self.delay.lock() = Some(delay);
        self
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of `embed` calls made for exactly `text`.
    pub fn calls_for(&self, text: &str) -> usize {
        self.calls.lock().get(text).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.total_calls.load(Ordering::SeqCst)
    }
}

impl EmbeddingProvider for MockEmbeddingProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn version(&self) -> &str {
        "mock-v1"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.total_calls.fetch_add(1, Ordering::SeqCst);
        *self.calls.lock().entry(text.to_string()).or_insert(0) += 1;

        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.load(Ordering::SeqCst) {
            return Err(EmbeddingError::ProviderUnavailable {
                reason: "mock provider configured to fail".to_string(),
            });
        }

        let fixed = self.fixed.lock().get(text).cloned();
        Ok(fixed.unwrap_or_else(|| self.fallback.embed_sync(text)))
    }
}
