//! Reference-embedding cache (in-memory, bounded, single-flight).
//!
//! Keys come from [`reference_cache_key`](crate::hashing::reference_cache_key); values
//! are half-precision [`CompactEmbedding`]s. Concurrent misses on one key share a
//! single initialization; failed initializations are not stored.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use moka::future::Cache;
use tracing::debug;

use crate::config::Config;
use crate::constants::DEFAULT_CACHE_CAPACITY;
use crate::embedding::CompactEmbedding;
use crate::hashing::ReferenceKey;

/// Hit/miss counters for a [`ReferenceEmbeddingCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    /// Lookups that ran the initializer (successfully or not).
    pub misses: u64,
}

struct Inner {
    entries: Cache<ReferenceKey, Arc<CompactEmbedding>>,
    capacity: u64,
    hits: AtomicU64,
    misses: AtomicU64,
}

#[derive(Clone)]
/// Shared handle to the reference-embedding cache. Clones share entries.
pub struct ReferenceEmbeddingCache {
    inner: Arc<Inner>,
}

impl ReferenceEmbeddingCache {
    /// Creates a cache with the default capacity and no idle expiry.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    /// Creates a cache with a max entry capacity.
    pub fn with_capacity(capacity: u64) -> Self {
        Self::build(capacity, None)
    }

    /// Creates a cache whose entries also expire after `idle` without access.
    pub fn with_idle_timeout(capacity: u64, idle: Duration) -> Self {
        Self::build(capacity, Some(idle))
    }

    /// Creates a cache sized from `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::build(config.cache_capacity, config.cache_idle_timeout)
    }

    fn build(capacity: u64, idle: Option<Duration>) -> Self {
        let mut builder = Cache::builder().max_capacity(capacity);
        if let Some(idle) = idle {
            builder = builder.time_to_idle(idle);
        }

        Self {
            inner: Arc::new(Inner {
                entries: builder.build(),
                capacity,
                hits: AtomicU64::new(0),
                misses: AtomicU64::new(0),
            }),
        }
    }

    /// Returns the cached embedding, or runs `init` to produce and store it.
    ///
    /// Callers racing on the same missing key wait for one shared `init`. If it fails,
    /// every waiter receives the same error and nothing is cached.
    pub async fn get_or_try_insert_with<F, E>(
        &self,
        key: ReferenceKey,
        init: F,
    ) -> Result<Arc<CompactEmbedding>, Arc<E>>
    where
        F: Future<Output = Result<CompactEmbedding, E>>,
        E: Send + Sync + 'static,
    {
        let inner = &self.inner;
        let result = inner
            .entries
            .entry(key)
            .or_try_insert_with(async {
                inner.misses.fetch_add(1, Ordering::Relaxed);
                init.await.map(Arc::new)
            })
            .await;

        match result {
            Ok(entry) => {
                if !entry.is_fresh() {
                    inner.hits.fetch_add(1, Ordering::Relaxed);
                }
                Ok(entry.into_value())
            }
            Err(err) => {
                debug!("Reference embedding initialization failed; not cached");
                Err(err)
            }
        }
    }

    pub async fn get(&self, key: &ReferenceKey) -> Option<Arc<CompactEmbedding>> {
        self.inner.entries.get(key).await
    }

    pub async fn insert(&self, key: ReferenceKey, embedding: CompactEmbedding) {
        self.inner.entries.insert(key, Arc::new(embedding)).await;
    }

    pub async fn invalidate(&self, key: &ReferenceKey) {
        self.inner.entries.invalidate(key).await;
    }

    #[inline]
    pub fn contains(&self, key: &ReferenceKey) -> bool {
        self.inner.entries.contains_key(key)
    }

    /// Approximate entry count; call [`run_pending_tasks`](Self::run_pending_tasks)
    /// first for an exact figure.
    #[inline]
    pub fn len(&self) -> u64 {
        self.inner.entries.entry_count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn capacity(&self) -> u64 {
        self.inner.capacity
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.inner.hits.load(Ordering::Relaxed),
            misses: self.inner.misses.load(Ordering::Relaxed),
        }
    }

    pub fn clear(&self) {
        self.inner.entries.invalidate_all();
    }

    /// Runs pending eviction and expiry work.
    pub async fn run_pending_tasks(&self) {
        self.inner.entries.run_pending_tasks().await;
    }
}

impl Default for ReferenceEmbeddingCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ReferenceEmbeddingCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReferenceEmbeddingCache")
            .field("entries", &self.inner.entries.entry_count())
            .field("capacity", &self.inner.capacity)
            .field("stats", &self.stats())
            .finish()
    }
}
