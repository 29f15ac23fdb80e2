use async_trait::async_trait;

use emporia_core::{
    AnalyticsSnapshot, MarketplaceUser, Subscription, SystemMetric, Tenant, TenantActivity,
    TenantId, UsageMetric,
};

use crate::error::StoreError;
use crate::query::{ActivityQuery, MetricQuery};

/// Trait for dashboard data backends.
///
/// Read-only: the schema is owned by the hosted database service, so
/// implementations never create or migrate tables. Implementations must
/// be `Send + Sync` to be shared across async tasks.
#[async_trait]
pub trait DashboardStore: Send + Sync {
    /// Fetch all tenant accounts, newest signup first.
    async fn tenants(&self) -> Result<Vec<Tenant>, StoreError>;

    /// Fetch all billing subscriptions.
    async fn subscriptions(&self) -> Result<Vec<Subscription>, StoreError>;

    /// Fetch per-tenant analytics rollups, most recent first.
    async fn analytics_snapshots(&self, limit: u32) -> Result<Vec<AnalyticsSnapshot>, StoreError>;

    /// Query usage metric observations, ascending by recorded time.
    async fn usage_metrics(&self, query: &MetricQuery) -> Result<Vec<UsageMetric>, StoreError>;

    /// Query platform health observations, ascending by recorded time.
    async fn system_metrics(&self, query: &MetricQuery) -> Result<Vec<SystemMetric>, StoreError>;

    /// The most recent health observation for a tenant, if any.
    async fn latest_system_metric(
        &self,
        tenant: &TenantId,
    ) -> Result<Option<SystemMetric>, StoreError>;

    /// Query the activity feed, most recent first.
    async fn tenant_activities(
        &self,
        query: &ActivityQuery,
    ) -> Result<Vec<TenantActivity>, StoreError>;

    /// Fetch all registered marketplace users.
    async fn marketplace_users(&self) -> Result<Vec<MarketplaceUser>, StoreError>;
}
