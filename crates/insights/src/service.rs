//! Computes dashboard view models over a [`DashboardStore`], caching the
//! results in a [`QueryCache`].

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use emporia_core::{
    aggregate, format, DashboardOverview, MetricKind, MonthlyPoint, RevenuePoint, SystemMetric,
    TenantActivity, TenantAnalytics, TenantGrowthPoint, TenantHealth, TenantId, TenantSummary,
};
use emporia_store::error::StoreError;
use emporia_store::query::{ActivityQuery, MetricQuery};
use emporia_store::store::DashboardStore;

use crate::cache::{CachedView, QueryCache, QueryKey};

/// How many buckets the distribution charts keep.
const DISTRIBUTION_TOP_N: usize = 5;

/// How many analytics snapshots feed the overview chart series.
const SNAPSHOT_WINDOW: u32 = 7;

/// Revenue projection multiplier applied to each month's recorded revenue.
const REVENUE_PROJECTION_FACTOR: f64 = 1.2;

/// Share of monthly active users reported as estimated new signups.
const NEW_SIGNUP_SHARE: f64 = 0.15;

/// Computes and caches dashboard view models.
///
/// View models are constructed fresh on every cache miss; a data-source
/// failure propagates as [`StoreError`] and leaves any previously cached
/// value untouched.
pub struct InsightsService {
    store: Arc<dyn DashboardStore>,
    cache: Arc<QueryCache>,
}

impl InsightsService {
    /// Create a service over a store and an explicit query cache.
    pub fn new(store: Arc<dyn DashboardStore>, cache: Arc<QueryCache>) -> Self {
        Self { store, cache }
    }

    /// The cache backing this service.
    #[must_use]
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Cross-tenant distributions and headline counts.
    pub async fn tenant_analytics(&self) -> Result<TenantAnalytics, StoreError> {
        if let Some(CachedView::Analytics(view)) = self.cache.get(&QueryKey::TenantAnalytics) {
            return Ok(view);
        }
        let view = self.compute_tenant_analytics().await?;
        self.cache
            .put(QueryKey::TenantAnalytics, CachedView::Analytics(view.clone()));
        Ok(view)
    }

    /// Headline numbers and chart series for the operator dashboard.
    pub async fn dashboard_overview(&self) -> Result<DashboardOverview, StoreError> {
        if let Some(CachedView::Overview(view)) = self.cache.get(&QueryKey::DashboardOverview) {
            return Ok(view);
        }
        let view = self.compute_dashboard_overview().await?;
        self.cache
            .put(QueryKey::DashboardOverview, CachedView::Overview(view.clone()));
        Ok(view)
    }

    /// Display-formatted directory rows, one per tenant.
    pub async fn tenant_directory(&self) -> Result<Vec<TenantSummary>, StoreError> {
        if let Some(CachedView::Directory(rows)) = self.cache.get(&QueryKey::TenantDirectory) {
            return Ok(rows);
        }
        let rows = self.compute_tenant_directory().await?;
        self.cache
            .put(QueryKey::TenantDirectory, CachedView::Directory(rows.clone()));
        Ok(rows)
    }

    /// Health card for one tenant; `None` when the tenant does not exist.
    pub async fn tenant_health(&self, id: &TenantId) -> Result<Option<TenantHealth>, StoreError> {
        let key = QueryKey::TenantHealth { tenant: id.clone() };
        if let Some(CachedView::Health(view)) = self.cache.get(&key) {
            return Ok(Some(view));
        }
        let Some(view) = self.compute_tenant_health(id).await? else {
            return Ok(None);
        };
        self.cache.put(key, CachedView::Health(view.clone()));
        Ok(Some(view))
    }

    /// Monthly usage series over raw usage observations.
    pub async fn usage_by_month(&self) -> Result<Vec<MonthlyPoint>, StoreError> {
        if let Some(CachedView::Usage(points)) = self.cache.get(&QueryKey::UsageByMonth) {
            return Ok(points);
        }
        let query = MetricQuery {
            kind: Some(MetricKind::Usage),
            ..Default::default()
        };
        let metrics = self.store.usage_metrics(&query).await?;
        let points = aggregate::monthly_grouping(&metrics, |m| m.recorded_at, |m| m.value);
        self.cache
            .put(QueryKey::UsageByMonth, CachedView::Usage(points.clone()));
        Ok(points)
    }

    /// The most recent activity feed rows. Not cached; the feed changes
    /// too quickly for the staleness window to help.
    pub async fn recent_activities(
        &self,
        limit: Option<u32>,
    ) -> Result<Vec<TenantActivity>, StoreError> {
        let query = ActivityQuery {
            limit,
            ..Default::default()
        };
        self.store.tenant_activities(&query).await
    }

    /// Raw platform health observations, ascending by recorded time.
    /// Not cached; callers page through the window they need.
    pub async fn system_metric_history(
        &self,
        tenant: Option<TenantId>,
        limit: Option<u32>,
    ) -> Result<Vec<SystemMetric>, StoreError> {
        let query = MetricQuery {
            tenant,
            limit,
            ..Default::default()
        };
        self.store.system_metrics(&query).await
    }

    /// Recompute and re-cache the primary dashboard views, bypassing any
    /// live cache entries. Used by the background refresh task.
    pub async fn refresh_primary(&self) -> Result<(), StoreError> {
        let overview = self.compute_dashboard_overview().await?;
        self.cache
            .put(QueryKey::DashboardOverview, CachedView::Overview(overview));

        let analytics = self.compute_tenant_analytics().await?;
        self.cache
            .put(QueryKey::TenantAnalytics, CachedView::Analytics(analytics));

        debug!("primary dashboard views re-primed");
        Ok(())
    }

    async fn compute_tenant_analytics(&self) -> Result<TenantAnalytics, StoreError> {
        let tenants = self.store.tenants().await?;
        let total = tenants.len() as u64;
        let active_marketplaces = tenants.iter().filter(|t| t.has_marketplace()).count() as u64;

        let industry_distribution = aggregate::distribution(&tenants, |t| {
            t.industry.as_deref().map(format::title_case_slug)
        });
        let location_distribution = aggregate::distribution(&tenants, |t| t.location.clone());

        let top_industry = aggregate::top_entry(&industry_distribution, total);
        let top_location = aggregate::top_entry(&location_distribution, total);

        let mut industry_distribution = industry_distribution;
        industry_distribution.truncate(DISTRIBUTION_TOP_N);
        let mut location_distribution = location_distribution;
        location_distribution.truncate(DISTRIBUTION_TOP_N);

        Ok(TenantAnalytics {
            total_tenants: total,
            active_marketplaces,
            top_industry,
            top_location,
            industry_distribution,
            location_distribution,
        })
    }

    async fn compute_dashboard_overview(&self) -> Result<DashboardOverview, StoreError> {
        let tenants = self.store.tenants().await?;
        let subscriptions = self.store.subscriptions().await?;
        let mut snapshots = self.store.analytics_snapshots(SNAPSHOT_WINDOW).await?;
        // The store returns snapshots most recent first; charts read
        // left to right.
        snapshots.reverse();

        let total_tenants = tenants.len() as u64;
        let total_marketplaces = tenants.iter().filter(|t| t.has_marketplace()).count() as u64;
        let monthly_revenue: f64 = subscriptions.iter().map(|s| s.price).sum();
        let churn_rate = aggregate::churn_rate(&tenants);

        let revenue_series: Vec<RevenuePoint> = snapshots
            .iter()
            .map(|s| RevenuePoint {
                month: format::month_label(s.date).to_owned(),
                revenue: s.total_revenue,
                projected: s.total_revenue * REVENUE_PROJECTION_FACTOR,
            })
            .collect();

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
        let tenant_series: Vec<TenantGrowthPoint> = snapshots
            .iter()
            .map(|s| {
                let users = s.total_users.max(0);
                TenantGrowthPoint {
                    month: format::month_label(s.date).to_owned(),
                    active_users: users as u64,
                    new_signups: (users as f64 * NEW_SIGNUP_SHARE).round() as u64,
                }
            })
            .collect();

        // Untagged plans bucket under a literal label so the chart still
        // accounts for every subscription row.
        let subscription_breakdown = aggregate::distribution(&subscriptions, |s| {
            Some(s.plan.clone().unwrap_or_else(|| "Unknown".to_owned()))
        });

        Ok(DashboardOverview {
            total_tenants,
            total_marketplaces,
            monthly_revenue,
            churn_rate,
            revenue_series,
            tenant_series,
            subscription_breakdown,
        })
    }

    async fn compute_tenant_directory(&self) -> Result<Vec<TenantSummary>, StoreError> {
        let tenants = self.store.tenants().await?;
        let users = self.store.marketplace_users().await?;

        let mut user_counts: HashMap<&TenantId, u64> = HashMap::new();
        for user in &users {
            *user_counts.entry(&user.tenant_id).or_default() += 1;
        }

        Ok(tenants
            .iter()
            .map(|tenant| TenantSummary {
                id: tenant.id.clone(),
                name: tenant
                    .company_name
                    .clone()
                    .unwrap_or_else(|| "Unnamed Tenant".to_owned()),
                industry: tenant
                    .industry
                    .as_deref()
                    .map_or_else(|| "Unknown".to_owned(), format::title_case_slug),
                location: tenant
                    .location
                    .clone()
                    .unwrap_or_else(|| "Unknown".to_owned()),
                status: tenant.status,
                plan: format::plan_display(&tenant.plan),
                users: user_counts.get(&tenant.id).copied().unwrap_or(0),
                marketplaces: u64::from(tenant.has_marketplace()),
                active_since: format::format_date(tenant.created_at),
            })
            .collect())
    }

    async fn compute_tenant_health(
        &self,
        id: &TenantId,
    ) -> Result<Option<TenantHealth>, StoreError> {
        let tenants = self.store.tenants().await?;
        let Some(tenant) = tenants.iter().find(|t| &t.id == id) else {
            return Ok(None);
        };

        // No observation yet reads as a clean platform; only the tenant's
        // lifecycle status weighs on the score.
        let metric = match self.store.latest_system_metric(id).await? {
            Some(metric) => metric,
            None => SystemMetric {
                id: String::new(),
                tenant_id: Some(id.clone()),
                error_rate: 0.0,
                uptime: 100.0,
                recorded_at: tenant.created_at,
            },
        };

        Ok(Some(TenantHealth {
            tenant_id: tenant.id.clone(),
            name: tenant
                .company_name
                .clone()
                .unwrap_or_else(|| "Unnamed Tenant".to_owned()),
            score: aggregate::health_score(tenant, &metric),
            status: tenant.status,
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use chrono::{TimeZone, Utc};

    use emporia_core::{
        AnalyticsSnapshot, MarketplaceUser, MetricKind, Subscription, SubscriptionStatus,
        SystemMetric, Tenant, TenantStatus, UsageMetric,
    };
    use emporia_store_memory::MemoryDashboardStore;

    use crate::cache::{QueryCache, QueryKey};

    use super::InsightsService;

    fn make_tenant(id: &str, industry: Option<&str>, status: TenantStatus) -> Tenant {
        Tenant {
            id: id.into(),
            company_name: Some(format!("Company {id}")),
            industry: industry.map(str::to_owned),
            location: Some("USA".to_owned()),
            status,
            plan: "basic".to_owned(),
            subscription_start: None,
            subscription_end: None,
            created_at: Utc.with_ymd_and_hms(2026, 1, 15, 0, 0, 0).unwrap(),
            template_id: None,
        }
    }

    fn make_subscription(id: &str, tenant: &str, plan: Option<&str>, price: f64) -> Subscription {
        Subscription {
            id: id.to_owned(),
            tenant_id: tenant.into(),
            plan: plan.map(str::to_owned),
            price,
            start_date: Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap(),
            status: SubscriptionStatus::Active,
            payment_method: None,
        }
    }

    fn make_snapshot(id: &str, month: u32, users: i64, revenue: f64) -> AnalyticsSnapshot {
        AnalyticsSnapshot {
            id: id.to_owned(),
            tenant_id: "t1".into(),
            date: Utc.with_ymd_and_hms(2026, month, 1, 0, 0, 0).unwrap(),
            total_users: users,
            total_providers: 0,
            total_buyers: 0,
            total_requests: 0,
            total_completed_requests: 0,
            total_revenue: revenue,
        }
    }

    fn service_over(store: MemoryDashboardStore) -> InsightsService {
        InsightsService::new(
            Arc::new(store),
            Arc::new(QueryCache::new(Duration::from_secs(300))),
        )
    }

    #[tokio::test]
    async fn tenant_analytics_distributions_and_top_entries() {
        let store = MemoryDashboardStore::new();
        store.insert_tenant(make_tenant("t1", Some("health-tech"), TenantStatus::Active));
        store.insert_tenant(make_tenant("t2", Some("health-tech"), TenantStatus::Active));
        store.insert_tenant(make_tenant("t3", Some("fin-tech"), TenantStatus::Active));

        let service = service_over(store);
        let view = service.tenant_analytics().await.unwrap();

        assert_eq!(view.total_tenants, 3);
        assert_eq!(view.industry_distribution[0].name, "Health Tech");
        assert_eq!(view.industry_distribution[0].value, 2);
        assert_eq!(view.industry_distribution[1].name, "Fin Tech");
        assert_eq!(view.top_industry.name, "Health Tech");
        assert_eq!(view.top_industry.percentage, 67);
    }

    #[tokio::test]
    async fn tenant_analytics_empty_store_yields_placeholders() {
        let service = service_over(MemoryDashboardStore::new());
        let view = service.tenant_analytics().await.unwrap();

        assert_eq!(view.total_tenants, 0);
        assert_eq!(view.top_industry.name, "N/A");
        assert_eq!(view.top_industry.percentage, 0);
        assert!(view.industry_distribution.is_empty());
    }

    #[tokio::test]
    async fn overview_revenue_churn_and_breakdown() {
        let store = MemoryDashboardStore::new();
        store.insert_tenant(make_tenant("t1", None, TenantStatus::Active));
        store.insert_tenant(make_tenant("t2", None, TenantStatus::Inactive));
        let mut live = make_tenant("t3", None, TenantStatus::Active);
        live.template_id = Some("tmpl-1".to_owned());
        store.insert_tenant(live);

        store.insert_subscription(make_subscription("s1", "t1", Some("basic"), 50.0));
        store.insert_subscription(make_subscription("s2", "t3", Some("premium"), 100.0));
        store.insert_subscription(make_subscription("s3", "t2", None, 0.0));

        let service = service_over(store);
        let view = service.dashboard_overview().await.unwrap();

        assert_eq!(view.total_tenants, 3);
        assert_eq!(view.total_marketplaces, 1);
        assert_eq!(view.monthly_revenue, 150.0);
        assert_eq!(view.churn_rate, 33.3);

        let unknown = view
            .subscription_breakdown
            .iter()
            .find(|e| e.name == "Unknown")
            .expect("untagged plan should bucket as Unknown");
        assert_eq!(unknown.value, 1);

        // No snapshots seeded; the chart series are empty, not invented.
        assert!(view.revenue_series.is_empty());
        assert!(view.tenant_series.is_empty());
    }

    #[tokio::test]
    async fn overview_series_follow_snapshots_chronologically() {
        let store = MemoryDashboardStore::new();
        store.insert_snapshot(make_snapshot("snap-feb", 2, 200, 150.0));
        store.insert_snapshot(make_snapshot("snap-mar", 3, 260, 180.0));

        let service = service_over(store);
        let view = service.dashboard_overview().await.unwrap();

        // Snapshots come back newest first and are reversed for display.
        assert_eq!(view.revenue_series.len(), 2);
        assert_eq!(view.revenue_series[0].month, "Feb");
        assert_eq!(view.revenue_series[0].revenue, 150.0);
        assert_eq!(view.revenue_series[0].projected, 180.0);
        assert_eq!(view.revenue_series[1].month, "Mar");

        assert_eq!(view.tenant_series.len(), 2);
        assert_eq!(view.tenant_series[0].active_users, 200);
        assert_eq!(view.tenant_series[0].new_signups, 30);
        assert_eq!(view.tenant_series[1].active_users, 260);
        assert_eq!(view.tenant_series[1].new_signups, 39);
    }

    #[tokio::test]
    async fn system_metric_history_filters_by_tenant() {
        let store = MemoryDashboardStore::new();
        store.insert_system_metric(SystemMetric {
            id: "s1".to_owned(),
            tenant_id: Some("t1".into()),
            error_rate: 1.0,
            uptime: 99.0,
            recorded_at: Utc.with_ymd_and_hms(2026, 5, 1, 0, 0, 0).unwrap(),
        });
        store.insert_system_metric(SystemMetric {
            id: "s2".to_owned(),
            tenant_id: Some("t2".into()),
            error_rate: 4.0,
            uptime: 97.0,
            recorded_at: Utc.with_ymd_and_hms(2026, 5, 2, 0, 0, 0).unwrap(),
        });

        let service = service_over(store);
        let rows = service
            .system_metric_history(Some("t1".into()), None)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "s1");

        let all = service.system_metric_history(None, None).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn usage_by_month_only_counts_usage_observations() {
        let store = MemoryDashboardStore::new();
        store.insert_usage_metric(UsageMetric {
            id: "m1".to_owned(),
            kind: MetricKind::Usage,
            value: 40.0,
            tenant_id: None,
            recorded_at: Utc.with_ymd_and_hms(2026, 3, 5, 0, 0, 0).unwrap(),
        });
        store.insert_usage_metric(UsageMetric {
            id: "m2".to_owned(),
            kind: MetricKind::Revenue,
            value: 999.0,
            tenant_id: None,
            recorded_at: Utc.with_ymd_and_hms(2026, 3, 6, 0, 0, 0).unwrap(),
        });

        let service = service_over(store);
        let points = service.usage_by_month().await.unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].month, "Mar");
        assert_eq!(points[0].total, 40.0);
        assert_eq!(points[0].count, 1);
    }

    #[tokio::test]
    async fn directory_formats_and_falls_back() {
        let store = MemoryDashboardStore::new();
        let mut bare = make_tenant("t1", None, TenantStatus::Trial);
        bare.company_name = None;
        bare.location = None;
        bare.plan = "premium".to_owned();
        store.insert_tenant(bare);
        store.insert_user(MarketplaceUser {
            id: "u1".into(),
            tenant_id: "t1".into(),
            role: Some("buyer".to_owned()),
            created_at: Utc::now(),
        });
        store.insert_user(MarketplaceUser {
            id: "u2".into(),
            tenant_id: "t1".into(),
            role: None,
            created_at: Utc::now(),
        });

        let service = service_over(store);
        let rows = service.tenant_directory().await.unwrap();

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.name, "Unnamed Tenant");
        assert_eq!(row.industry, "Unknown");
        assert_eq!(row.location, "Unknown");
        assert_eq!(row.plan, "$100 Plan");
        assert_eq!(row.users, 2);
        assert_eq!(row.marketplaces, 0);
        assert_eq!(row.active_since, "Jan 15, 2026");
    }

    #[tokio::test]
    async fn tenant_health_uses_latest_metric() {
        let store = MemoryDashboardStore::new();
        store.insert_tenant(make_tenant("t1", None, TenantStatus::Active));
        store.insert_system_metric(SystemMetric {
            id: "s1".to_owned(),
            tenant_id: Some("t1".into()),
            error_rate: 1.0,
            uptime: 99.0,
            recorded_at: Utc::now(),
        });

        let service = service_over(store);
        let health = service.tenant_health(&"t1".into()).await.unwrap().unwrap();
        // 100 - 1.0*10 - (100-99)*2 = 88
        assert_eq!(health.score, 88);
        assert_eq!(health.status, TenantStatus::Active);
    }

    #[tokio::test]
    async fn tenant_health_unknown_tenant_is_none() {
        let service = service_over(MemoryDashboardStore::new());
        let health = service.tenant_health(&"missing".into()).await.unwrap();
        assert!(health.is_none());
    }

    #[tokio::test]
    async fn tenant_health_without_metric_scores_on_status_alone() {
        let store = MemoryDashboardStore::new();
        store.insert_tenant(make_tenant("t1", None, TenantStatus::Trial));

        let service = service_over(store);
        let health = service.tenant_health(&"t1".into()).await.unwrap().unwrap();
        assert_eq!(health.score, 70);
    }

    #[tokio::test]
    async fn cached_view_served_until_invalidated() {
        let store = Arc::new(MemoryDashboardStore::new());
        store.insert_tenant(make_tenant("t1", Some("health-tech"), TenantStatus::Active));

        let service = InsightsService::new(
            store.clone(),
            Arc::new(QueryCache::new(Duration::from_secs(300))),
        );
        let first = service.tenant_analytics().await.unwrap();
        assert_eq!(first.total_tenants, 1);

        // A row added after the first fetch stays invisible until the
        // cache entry goes away.
        store.insert_tenant(make_tenant("t2", Some("fin-tech"), TenantStatus::Active));
        let cached = service.tenant_analytics().await.unwrap();
        assert_eq!(cached.total_tenants, 1);

        service.cache().invalidate(&QueryKey::TenantAnalytics);
        let fresh = service.tenant_analytics().await.unwrap();
        assert_eq!(fresh.total_tenants, 2);
    }

    #[tokio::test]
    async fn refresh_primary_overwrites_cached_views() {
        let store = Arc::new(MemoryDashboardStore::new());
        store.insert_tenant(make_tenant("t1", Some("health-tech"), TenantStatus::Active));

        let service = InsightsService::new(
            store.clone(),
            Arc::new(QueryCache::new(Duration::from_secs(300))),
        );
        assert_eq!(service.tenant_analytics().await.unwrap().total_tenants, 1);

        store.insert_tenant(make_tenant("t2", Some("fin-tech"), TenantStatus::Active));
        service.refresh_primary().await.unwrap();

        // The stale entry was overwritten even though its TTL had not
        // elapsed.
        assert_eq!(service.tenant_analytics().await.unwrap().total_tenants, 2);
    }
}
