use async_trait::async_trait;
use dashmap::DashMap;

use emporia_core::{
    AnalyticsSnapshot, MarketplaceUser, Subscription, SystemMetric, Tenant, TenantActivity,
    TenantId, UsageMetric,
};
use emporia_store::error::StoreError;
use emporia_store::query::{ActivityQuery, MetricQuery};
use emporia_store::store::DashboardStore;

/// In-memory dashboard store using `DashMap`. Suitable for development
/// and testing.
///
/// Each table is a concurrent hash map keyed by row ID; reads collect,
/// filter, and sort on the fly. Seed rows through the `insert_*` helpers.
#[derive(Default)]
pub struct MemoryDashboardStore {
    tenants: DashMap<String, Tenant>,
    subscriptions: DashMap<String, Subscription>,
    snapshots: DashMap<String, AnalyticsSnapshot>,
    usage_metrics: DashMap<String, UsageMetric>,
    system_metrics: DashMap<String, SystemMetric>,
    activities: DashMap<String, TenantActivity>,
    users: DashMap<String, MarketplaceUser>,
}

impl MemoryDashboardStore {
    /// Create a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_tenant(&self, tenant: Tenant) {
        self.tenants.insert(tenant.id.to_string(), tenant);
    }

    pub fn insert_subscription(&self, subscription: Subscription) {
        self.subscriptions
            .insert(subscription.id.clone(), subscription);
    }

    pub fn insert_snapshot(&self, snapshot: AnalyticsSnapshot) {
        self.snapshots.insert(snapshot.id.clone(), snapshot);
    }

    pub fn insert_usage_metric(&self, metric: UsageMetric) {
        self.usage_metrics.insert(metric.id.clone(), metric);
    }

    pub fn insert_system_metric(&self, metric: SystemMetric) {
        self.system_metrics.insert(metric.id.clone(), metric);
    }

    pub fn insert_activity(&self, activity: TenantActivity) {
        self.activities.insert(activity.id.clone(), activity);
    }

    pub fn insert_user(&self, user: MarketplaceUser) {
        self.users.insert(user.id.to_string(), user);
    }
}

#[async_trait]
impl DashboardStore for MemoryDashboardStore {
    async fn tenants(&self) -> Result<Vec<Tenant>, StoreError> {
        let mut rows: Vec<Tenant> = self.tenants.iter().map(|e| e.value().clone()).collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn subscriptions(&self) -> Result<Vec<Subscription>, StoreError> {
        let mut rows: Vec<Subscription> = self
            .subscriptions
            .iter()
            .map(|e| e.value().clone())
            .collect();
        rows.sort_by(|a, b| a.start_date.cmp(&b.start_date));
        Ok(rows)
    }

    async fn analytics_snapshots(&self, limit: u32) -> Result<Vec<AnalyticsSnapshot>, StoreError> {
        let mut rows: Vec<AnalyticsSnapshot> =
            self.snapshots.iter().map(|e| e.value().clone()).collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn usage_metrics(&self, query: &MetricQuery) -> Result<Vec<UsageMetric>, StoreError> {
        let mut rows: Vec<UsageMetric> = self
            .usage_metrics
            .iter()
            .filter_map(|entry| {
                let m = entry.value();
                if let Some(kind) = query.kind {
                    if m.kind != kind {
                        return None;
                    }
                }
                if let Some(ref tenant) = query.tenant {
                    if m.tenant_id.as_ref() != Some(tenant) {
                        return None;
                    }
                }
                if let Some(ref from) = query.from {
                    if m.recorded_at < *from {
                        return None;
                    }
                }
                if let Some(ref to) = query.to {
                    if m.recorded_at > *to {
                        return None;
                    }
                }
                Some(m.clone())
            })
            .collect();
        rows.sort_by(|a, b| a.recorded_at.cmp(&b.recorded_at));
        rows.truncate(query.effective_limit() as usize);
        Ok(rows)
    }

    async fn system_metrics(&self, query: &MetricQuery) -> Result<Vec<SystemMetric>, StoreError> {
        let mut rows: Vec<SystemMetric> = self
            .system_metrics
            .iter()
            .filter_map(|entry| {
                let m = entry.value();
                if let Some(ref tenant) = query.tenant {
                    if m.tenant_id.as_ref() != Some(tenant) {
                        return None;
                    }
                }
                if let Some(ref from) = query.from {
                    if m.recorded_at < *from {
                        return None;
                    }
                }
                if let Some(ref to) = query.to {
                    if m.recorded_at > *to {
                        return None;
                    }
                }
                Some(m.clone())
            })
            .collect();
        rows.sort_by(|a, b| a.recorded_at.cmp(&b.recorded_at));
        rows.truncate(query.effective_limit() as usize);
        Ok(rows)
    }

    async fn latest_system_metric(
        &self,
        tenant: &TenantId,
    ) -> Result<Option<SystemMetric>, StoreError> {
        let mut best: Option<SystemMetric> = None;
        for entry in &self.system_metrics {
            let m = entry.value();
            if m.tenant_id.as_ref() != Some(tenant) {
                continue;
            }
            if best
                .as_ref()
                .is_none_or(|b| m.recorded_at > b.recorded_at)
            {
                best = Some(m.clone());
            }
        }
        Ok(best)
    }

    async fn tenant_activities(
        &self,
        query: &ActivityQuery,
    ) -> Result<Vec<TenantActivity>, StoreError> {
        let mut rows: Vec<TenantActivity> = self
            .activities
            .iter()
            .filter_map(|entry| {
                let a = entry.value();
                if let Some(ref from) = query.from {
                    if a.occurred_at < *from {
                        return None;
                    }
                }
                Some(a.clone())
            })
            .collect();
        rows.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
        rows.truncate(query.effective_limit() as usize);
        Ok(rows)
    }

    async fn marketplace_users(&self) -> Result<Vec<MarketplaceUser>, StoreError> {
        let mut rows: Vec<MarketplaceUser> =
            self.users.iter().map(|e| e.value().clone()).collect();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use emporia_core::{
        AnalyticsSnapshot, MetricKind, SystemMetric, Tenant, TenantActivity, TenantStatus,
        UsageMetric,
    };
    use emporia_store::query::{ActivityQuery, MetricQuery};
    use emporia_store::store::DashboardStore;

    use super::MemoryDashboardStore;

    fn make_tenant(id: &str, status: TenantStatus) -> Tenant {
        Tenant {
            id: id.into(),
            company_name: Some(format!("Tenant {id}")),
            industry: Some("health-tech".to_owned()),
            location: Some("USA".to_owned()),
            status,
            plan: "basic".to_owned(),
            subscription_start: None,
            subscription_end: None,
            created_at: Utc::now(),
            template_id: None,
        }
    }

    fn make_usage(id: &str, kind: MetricKind, value: f64) -> UsageMetric {
        UsageMetric {
            id: id.to_owned(),
            kind,
            value,
            tenant_id: None,
            recorded_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn tenants_newest_signup_first() {
        let store = MemoryDashboardStore::new();
        let mut older = make_tenant("t1", TenantStatus::Active);
        older.created_at = Utc::now() - Duration::days(30);
        store.insert_tenant(older);
        store.insert_tenant(make_tenant("t2", TenantStatus::Trial));

        let tenants = store.tenants().await.unwrap();
        assert_eq!(tenants.len(), 2);
        assert_eq!(tenants[0].id.as_str(), "t2");
        assert_eq!(tenants[1].id.as_str(), "t1");
    }

    #[tokio::test]
    async fn usage_metrics_filter_by_kind() {
        let store = MemoryDashboardStore::new();
        store.insert_usage_metric(make_usage("m1", MetricKind::User, 10.0));
        store.insert_usage_metric(make_usage("m2", MetricKind::Revenue, 99.0));

        let q = MetricQuery {
            kind: Some(MetricKind::User),
            ..Default::default()
        };
        let rows = store.usage_metrics(&q).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "m1");
    }

    #[tokio::test]
    async fn usage_metrics_time_range_and_limit() {
        let store = MemoryDashboardStore::new();
        let now = Utc::now();
        for i in 0..5 {
            let mut m = make_usage(&format!("m{i}"), MetricKind::Usage, 1.0);
            m.recorded_at = now - Duration::hours(i);
            store.insert_usage_metric(m);
        }

        let q = MetricQuery {
            from: Some(now - Duration::hours(2)),
            limit: Some(2),
            ..Default::default()
        };
        let rows = store.usage_metrics(&q).await.unwrap();
        assert_eq!(rows.len(), 2);
        // Ascending order: the oldest in-range row first.
        assert_eq!(rows[0].id, "m2");
    }

    #[tokio::test]
    async fn snapshots_most_recent_first_with_limit() {
        let store = MemoryDashboardStore::new();
        let now = Utc::now();
        for i in 0..4 {
            store.insert_snapshot(AnalyticsSnapshot {
                id: format!("snap{i}"),
                tenant_id: "t1".into(),
                date: now - Duration::days(i),
                total_users: 10 * i,
                total_providers: 0,
                total_buyers: 0,
                total_requests: 0,
                total_completed_requests: 0,
                total_revenue: 0.0,
            });
        }

        let rows = store.analytics_snapshots(2).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, "snap0");
        assert_eq!(rows[1].id, "snap1");
    }

    #[tokio::test]
    async fn latest_system_metric_picks_most_recent() {
        let store = MemoryDashboardStore::new();
        let now = Utc::now();
        store.insert_system_metric(SystemMetric {
            id: "s1".to_owned(),
            tenant_id: Some("t1".into()),
            error_rate: 2.0,
            uptime: 99.0,
            recorded_at: now - Duration::hours(1),
        });
        store.insert_system_metric(SystemMetric {
            id: "s2".to_owned(),
            tenant_id: Some("t1".into()),
            error_rate: 0.5,
            uptime: 99.9,
            recorded_at: now,
        });

        let latest = store.latest_system_metric(&"t1".into()).await.unwrap();
        assert_eq!(latest.unwrap().id, "s2");

        let missing = store.latest_system_metric(&"t2".into()).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn activities_most_recent_first() {
        let store = MemoryDashboardStore::new();
        let now = Utc::now();
        for i in 0..3 {
            store.insert_activity(TenantActivity {
                id: format!("a{i}"),
                activity_type: "service_request_created".to_owned(),
                user_id: "u1".into(),
                occurred_at: now - Duration::minutes(i),
            });
        }

        let rows = store
            .tenant_activities(&ActivityQuery::default())
            .await
            .unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].id, "a0");
        assert_eq!(rows[2].id, "a2");
    }
}
