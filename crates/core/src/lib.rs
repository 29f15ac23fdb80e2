pub mod aggregate;
pub mod format;
pub mod insights;
pub mod metrics;
pub mod subscription;
pub mod tenant;
pub mod types;
pub mod user;

pub use aggregate::{churn_rate, distribution, health_score, monthly_grouping, top_entry};
pub use insights::{
    DashboardOverview, DistributionEntry, MonthlyPoint, RevenuePoint, TenantAnalytics,
    TenantGrowthPoint, TenantHealth, TenantSummary, TopEntry,
};
pub use metrics::{AnalyticsSnapshot, MetricKind, SystemMetric, TenantActivity, UsageMetric};
pub use subscription::{Subscription, SubscriptionStatus};
pub use tenant::{Tenant, TenantStatus};
pub use types::{TenantId, UserId};
pub use user::MarketplaceUser;
