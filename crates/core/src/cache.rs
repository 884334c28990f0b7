//! Single-process TTL cache for expensive read-only query results.
//!
//! Entries live until their age reaches the TTL; there is no size-based
//! eviction and writes to the underlying tables never invalidate anything.
//! Callers accept up to one TTL of staleness. Operators can drop entries
//! explicitly through [`TtlCache::invalidate`] and [`TtlCache::clear`].

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::RwLock;
use tokio::time::Instant;

/// Snapshot of cache occupancy returned by the operator endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub enabled: bool,
    pub ttl_secs: u64,
    pub total_entries: usize,
    pub keys: Vec<String>,
}

pub struct TtlCache<V> {
    ttl: Duration,
    enabled: bool,
    entries: RwLock<HashMap<String, (Instant, V)>>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            enabled: true,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// A cache that never stores anything; every lookup recomputes.
    pub fn disabled() -> Self {
        Self {
            ttl: Duration::ZERO,
            enabled: false,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Return the live value for `key`, if any.
    pub async fn get(&self, key: &str) -> Option<V> {
        if !self.enabled {
            return None;
        }
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|(stored_at, _)| stored_at.elapsed() < self.ttl)
            .map(|(_, value)| value.clone())
    }

    pub async fn insert(&self, key: impl Into<String>, value: V) {
        if !self.enabled {
            return;
        }
        self.entries
            .write()
            .await
            .insert(key.into(), (Instant::now(), value));
    }

    /// Return the cached value when fresh, otherwise run `compute`, store its
    /// result and return it. Errors from `compute` are passed through and
    /// nothing is stored.
    ///
    /// Two callers that miss at the same time will both compute; the later
    /// write wins.
    pub async fn get_or_try_insert_with<F, Fut, E>(&self, key: &str, compute: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(hit) = self.get(key).await {
            tracing::debug!(key, "Cache hit");
            return Ok(hit);
        }

        tracing::debug!(key, "Cache miss");
        let value = compute().await?;
        self.insert(key, value.clone()).await;
        Ok(value)
    }

    /// Remove a single entry. Returns whether it was present.
    pub async fn invalidate(&self, key: &str) -> bool {
        self.entries.write().await.remove(key).is_some()
    }

    /// Drop every entry. Returns how many were removed.
    pub async fn clear(&self) -> usize {
        let mut entries = self.entries.write().await;
        let removed = entries.len();
        entries.clear();
        removed
    }

    pub async fn stats(&self) -> CacheStats {
        let entries = self.entries.read().await;
        let mut keys: Vec<String> = entries.keys().cloned().collect();
        keys.sort();
        CacheStats {
            enabled: self.enabled,
            ttl_secs: self.ttl.as_secs(),
            total_entries: entries.len(),
            keys,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    const TTL: Duration = Duration::from_secs(300);

    async fn counted(calls: &AtomicU32, value: i64) -> Result<i64, String> {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(value)
    }

    // -----------------------------------------------------------------------
    // Freshness
    // -----------------------------------------------------------------------

    #[tokio::test(start_paused = true)]
    async fn returns_stale_value_within_ttl() {
        let cache = TtlCache::new(TTL);
        let calls = AtomicU32::new(0);

        let first = cache
            .get_or_try_insert_with("top_viewers_10", || counted(&calls, 1))
            .await
            .unwrap();
        tokio::time::advance(Duration::from_secs(299)).await;
        let second = cache
            .get_or_try_insert_with("top_viewers_10", || counted(&calls, 2))
            .await
            .unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn recomputes_after_expiry() {
        let cache = TtlCache::new(TTL);
        let calls = AtomicU32::new(0);

        cache
            .get_or_try_insert_with("k", || counted(&calls, 1))
            .await
            .unwrap();
        tokio::time::advance(TTL).await;
        let fresh = cache
            .get_or_try_insert_with("k", || counted(&calls, 2))
            .await
            .unwrap();

        assert_eq!(fresh, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.get("k").await, Some(2));
    }

    #[tokio::test]
    async fn compute_error_is_not_cached() {
        let cache: TtlCache<i64> = TtlCache::new(TTL);

        let err = cache
            .get_or_try_insert_with("k", || async { Err::<i64, _>("db down") })
            .await
            .unwrap_err();

        assert_eq!(err, "db down");
        assert!(cache.get("k").await.is_none());
        assert_eq!(cache.stats().await.total_entries, 0);
    }

    // -----------------------------------------------------------------------
    // Operator controls
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn invalidate_and_clear() {
        let cache = TtlCache::new(TTL);
        cache.insert("a", 1).await;
        cache.insert("b", 2).await;
        cache.insert("c", 3).await;

        assert!(cache.invalidate("a").await);
        assert!(!cache.invalidate("a").await);
        assert_eq!(cache.get("b").await, Some(2));

        assert_eq!(cache.clear().await, 2);
        assert!(cache.get("b").await.is_none());
    }

    #[tokio::test]
    async fn stats_lists_sorted_keys() {
        let cache = TtlCache::new(TTL);
        cache.insert("rating_distribution", 1).await;
        cache.insert("genre_stats", 2).await;

        let stats = cache.stats().await;
        assert!(stats.enabled);
        assert_eq!(stats.ttl_secs, 300);
        assert_eq!(stats.total_entries, 2);
        assert_eq!(stats.keys, vec!["genre_stats", "rating_distribution"]);
    }

    #[tokio::test]
    async fn disabled_cache_always_computes() {
        let cache = TtlCache::disabled();
        let calls = AtomicU32::new(0);

        for n in 0..3 {
            let v = cache
                .get_or_try_insert_with("k", || counted(&calls, n))
                .await
                .unwrap();
            assert_eq!(v, n);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(!cache.stats().await.enabled);
        assert_eq!(cache.stats().await.total_entries, 0);
    }
}
