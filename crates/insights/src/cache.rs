//! TTL cache for computed view models, keyed by query identity.

use std::time::Duration;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use emporia_core::{
    DashboardOverview, MonthlyPoint, TenantAnalytics, TenantHealth, TenantId, TenantSummary,
};

/// Default staleness window for cached views.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Identity of a cacheable dashboard query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "query", rename_all = "snake_case")]
pub enum QueryKey {
    TenantAnalytics,
    DashboardOverview,
    TenantDirectory,
    UsageByMonth,
    TenantHealth { tenant: TenantId },
}

/// A cached view model.
#[derive(Debug, Clone)]
pub enum CachedView {
    Analytics(TenantAnalytics),
    Overview(DashboardOverview),
    Directory(Vec<TenantSummary>),
    Usage(Vec<MonthlyPoint>),
    Health(TenantHealth),
}

#[derive(Debug, Clone)]
struct Entry {
    view: CachedView,
    expires_at: Instant,
}

impl Entry {
    /// Returns `true` if this entry has passed its TTL deadline.
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Concurrent TTL cache over computed view models.
///
/// Entries are lazily evicted on read when their TTL has elapsed.
/// Concurrent writes to the same key are last-writer-wins; there is no
/// locking beyond the map's own sharding.
#[derive(Debug)]
pub struct QueryCache {
    entries: DashMap<QueryKey, Entry>,
    ttl: Duration,
}

impl QueryCache {
    /// Create a cache with the given staleness window.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Fetch a live entry, lazily evicting it if expired.
    pub fn get(&self, key: &QueryKey) -> Option<CachedView> {
        match self.entries.get(key) {
            Some(entry) if !entry.is_expired() => Some(entry.view.clone()),
            Some(entry) => {
                drop(entry);
                // Re-check under the shard lock: a concurrent put may
                // have replaced the stale entry with a live one.
                self.entries.remove_if(key, |_, e| e.is_expired());
                None
            }
            None => None,
        }
    }

    /// Store a view under a key, replacing any previous entry.
    pub fn put(&self, key: QueryKey, view: CachedView) {
        self.entries.insert(
            key,
            Entry {
                view,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Drop a single entry. Returns `true` if a live entry existed.
    pub fn invalidate(&self, key: &QueryKey) -> bool {
        match self.entries.remove(key) {
            Some((_, entry)) => !entry.is_expired(),
            None => false,
        }
    }

    /// Drop every entry.
    pub fn invalidate_all(&self) {
        self.entries.clear();
    }

    /// Number of entries currently held, including not-yet-evicted
    /// expired ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use emporia_core::DashboardOverview;

    use super::{CachedView, QueryCache, QueryKey};

    fn overview_view() -> CachedView {
        CachedView::Overview(DashboardOverview::fallback())
    }

    #[tokio::test(start_paused = true)]
    async fn entry_expires_after_ttl() {
        let cache = QueryCache::new(Duration::from_secs(300));
        cache.put(QueryKey::DashboardOverview, overview_view());

        assert!(cache.get(&QueryKey::DashboardOverview).is_some());

        tokio::time::advance(Duration::from_secs(301)).await;

        // Lazy eviction: the read drops the stale entry.
        assert!(cache.get(&QueryKey::DashboardOverview).is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn eviction_spares_a_rewritten_entry() {
        let cache = QueryCache::new(Duration::from_secs(300));
        cache.put(QueryKey::DashboardOverview, overview_view());
        cache.put(QueryKey::TenantAnalytics, overview_view());

        tokio::time::advance(Duration::from_secs(301)).await;
        // One key is rewritten after expiry; reading the other stale key
        // must evict only entries that are still expired.
        cache.put(QueryKey::DashboardOverview, overview_view());

        assert!(cache.get(&QueryKey::TenantAnalytics).is_none());
        assert!(cache.get(&QueryKey::DashboardOverview).is_some());
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn put_resets_the_deadline() {
        let cache = QueryCache::new(Duration::from_secs(300));
        cache.put(QueryKey::DashboardOverview, overview_view());

        tokio::time::advance(Duration::from_secs(200)).await;
        cache.put(QueryKey::DashboardOverview, overview_view());

        tokio::time::advance(Duration::from_secs(200)).await;
        assert!(cache.get(&QueryKey::DashboardOverview).is_some());
    }

    #[tokio::test]
    async fn invalidate_by_key() {
        let cache = QueryCache::default();
        cache.put(QueryKey::DashboardOverview, overview_view());
        cache.put(QueryKey::TenantAnalytics, overview_view());

        assert!(cache.invalidate(&QueryKey::DashboardOverview));
        assert!(!cache.invalidate(&QueryKey::DashboardOverview));
        assert!(cache.get(&QueryKey::TenantAnalytics).is_some());
    }

    #[tokio::test]
    async fn invalidate_all_clears_everything() {
        let cache = QueryCache::default();
        cache.put(QueryKey::DashboardOverview, overview_view());
        cache.put(QueryKey::TenantDirectory, overview_view());

        cache.invalidate_all();
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn per_tenant_keys_are_distinct() {
        let cache = QueryCache::default();
        cache.put(
            QueryKey::TenantHealth {
                tenant: "t1".into(),
            },
            overview_view(),
        );

        assert!(cache
            .get(&QueryKey::TenantHealth {
                tenant: "t1".into()
            })
            .is_some());
        assert!(cache
            .get(&QueryKey::TenantHealth {
                tenant: "t2".into()
            })
            .is_none());
    }
}
