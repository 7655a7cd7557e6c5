//! Read-through caching with moka
//!
//! A [`NamedCache`] is one bounded, TTL-expiring key/value space with hit and
//! miss counters. Loaders run on a miss and their result is stored only when
//! they succeed; errors and panics leave the cache untouched.
//!
//! # Staleness guard
//!
//! Every invalidation bumps an epoch. A loader that started before an
//! invalidation does not publish its (possibly stale) value afterwards, so a
//! read issued after a completed write never observes pre-write data.
//!
//! # Example
//!
//! ```rust,ignore
//! let cache: NamedCache<Profile> = NamedCache::new("profile", CacheSettings::default());
//! let profile = cache
//!     .get_or_try_load("owner", || async { repository.find_owner().await })
//!     .await?;
//! ```

use std::{
    future::Future,
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use moka::future::Cache;
use serde::Serialize;

/// Default TTL for cache entries (10 minutes)
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 600;

/// Default max capacity per cache
pub const DEFAULT_CACHE_MAX_CAPACITY: u64 = 500;

/// Cache configuration shared by every named cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheSettings {
    /// Maximum number of entries in each cache
    pub max_capacity: u64,

    /// Time-to-live for cache entries, measured from insertion
    pub time_to_live: Duration,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            max_capacity: DEFAULT_CACHE_MAX_CAPACITY,
            time_to_live: Duration::from_secs(DEFAULT_CACHE_TTL_SECONDS),
        }
    }
}

impl CacheSettings {
    /// Create settings with custom TTL (useful for testing)
    pub fn with_ttl(time_to_live: Duration) -> Self {
        Self {
            time_to_live,
            ..Self::default()
        }
    }

    /// Log configuration at startup
    pub fn log_config(&self) {
        tracing::info!(
            ttl_seconds = self.time_to_live.as_secs(),
            max_capacity = self.max_capacity,
            "Cache configuration loaded"
        );
    }
}

/// Point-in-time counters for one cache
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStats {
    pub name: &'static str,
    pub hits: u64,
    pub misses: u64,
    pub entry_count: u64,
    pub hit_rate: f64,
}

/// Bounded TTL cache keyed by string
pub struct NamedCache<V> {
    name: &'static str,
    inner: Cache<String, V>,
    hits: AtomicU64,
    misses: AtomicU64,
    epoch: AtomicU64,
}

impl<V> NamedCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new(name: &'static str, settings: CacheSettings) -> Self {
        let inner = Cache::builder()
            .name(name)
            .max_capacity(settings.max_capacity)
            .time_to_live(settings.time_to_live)
            .build();

        Self {
            name,
            inner,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            epoch: AtomicU64::new(0),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Cached value, counting a hit or a miss
    pub async fn get(&self, key: &str) -> Option<V> {
        match self.inner.get(key).await {
            Some(value) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(cache = self.name, key, "Cache hit");
                Some(value)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(cache = self.name, key, "Cache miss");
                None
            }
        }
    }

    pub async fn insert(&self, key: impl Into<String>, value: V) {
        self.inner.insert(key.into(), value).await;
    }

    /// Cached value, or the loader's result stored under `key`
    ///
    /// Errors from the loader are returned as-is and nothing is stored.
    pub async fn get_or_try_load<E, F, Fut>(&self, key: &str, load: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(key).await {
            return Ok(value);
        }

        let epoch = self.epoch.load(Ordering::Acquire);
        let value = load().await?;

        if self.epoch.load(Ordering::Acquire) == epoch {
            self.inner.insert(key.to_string(), value.clone()).await;
            // An invalidation may have landed between the check and the insert
            if self.epoch.load(Ordering::Acquire) != epoch {
                self.inner.invalidate(key).await;
            }
        } else {
            tracing::debug!(cache = self.name, key, "Skipped storing value loaded before invalidation");
        }

        Ok(value)
    }

    pub async fn invalidate(&self, key: &str) {
        self.epoch.fetch_add(1, Ordering::AcqRel);
        self.inner.invalidate(key).await;
        tracing::debug!(cache = self.name, key, "Cache entry evicted");
    }

    pub fn invalidate_all(&self) {
        self.epoch.fetch_add(1, Ordering::AcqRel);
        self.inner.invalidate_all();
        tracing::debug!(cache = self.name, "Cache cleared");
    }

    /// Flush pending maintenance so counts are exact (tests, stats endpoint)
    pub async fn sync(&self) {
        self.inner.run_pending_tasks().await;
    }

    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        CacheStats {
            name: self.name,
            hits,
            misses,
            entry_count: self.inner.entry_count(),
            hit_rate: if total == 0 {
                0.0
            } else {
                hits as f64 / total as f64
            },
        }
    }
}

impl<V> std::fmt::Debug for NamedCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamedCache")
            .field("name", &self.name)
            .field("entry_count", &self.inner.entry_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn cache() -> NamedCache<String> {
        NamedCache::new("test", CacheSettings::default())
    }

    #[tokio::test]
    async fn test_get_or_try_load_caches_success() {
        let cache = cache();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let value: Result<String, ()> = cache
                .get_or_try_load("owner", || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok("Jane".to_string())
                })
                .await;
            assert_eq!(value.unwrap(), "Jane");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let stats = cache.stats();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let cache = cache();

        let first: Result<String, &str> = cache
            .get_or_try_load("1", || async { Err("not found") })
            .await;
        assert_eq!(first, Err("not found"));

        let second: Result<String, &str> = cache
            .get_or_try_load("1", || async { Ok("found".to_string()) })
            .await;
        assert_eq!(second.unwrap(), "found");
    }

    #[tokio::test]
    async fn test_invalidate_removes_single_key() {
        let cache = cache();
        cache.insert("a", "1".to_string()).await;
        cache.insert("b", "2".to_string()).await;

        cache.invalidate("a").await;

        assert_eq!(cache.get("a").await, None);
        assert_eq!(cache.get("b").await.as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn test_invalidate_all_clears_everything() {
        let cache = cache();
        cache.insert("a", "1".to_string()).await;
        cache.insert("b", "2".to_string()).await;

        cache.invalidate_all();
        cache.sync().await;

        assert_eq!(cache.get("a").await, None);
        assert_eq!(cache.get("b").await, None);
        assert_eq!(cache.stats().entry_count, 0);
    }

    #[tokio::test]
    async fn test_value_loaded_before_invalidation_is_not_stored() {
        let cache = cache();

        let loaded: Result<String, ()> = cache
            .get_or_try_load("owner", || async {
                // A write completes while this read is still loading
                cache.invalidate_all();
                Ok("stale".to_string())
            })
            .await;

        assert_eq!(loaded.unwrap(), "stale");
        assert_eq!(cache.get("owner").await, None);
    }

    #[tokio::test]
    async fn test_entries_expire_after_ttl() {
        let cache: NamedCache<String> =
            NamedCache::new("short", CacheSettings::with_ttl(Duration::from_millis(50)));
        cache.insert("k", "v".to_string()).await;
        assert!(cache.get("k").await.is_some());

        tokio::time::sleep(Duration::from_millis(120)).await;
        assert!(cache.get("k").await.is_none());
    }

    #[test]
    fn test_stats_hit_rate_without_traffic() {
        let stats = cache().stats();
        assert_eq!(stats.name, "test");
        assert_eq!(stats.hit_rate, 0.0);
    }
}
