//! Chart-ready and card-ready view models.
//!
//! Constructed fresh per fetch and never mutated in place. Every fallback
//! is an explicit all-zero/empty value rather than an absent field, so
//! consumers always receive a well-formed shape.

use serde::{Deserialize, Serialize};

use crate::tenant::TenantStatus;
use crate::types::TenantId;

/// One bucket of a categorical distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DistributionEntry {
    /// Bucket display name.
    pub name: String,
    /// Number of rows in the bucket.
    pub value: u64,
}

/// The dominant bucket of a distribution, as a share of the whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TopEntry {
    /// Bucket display name; `"N/A"` when there is no data.
    pub name: String,
    /// Rounded share of the total, 0-100.
    pub percentage: u8,
}

impl TopEntry {
    /// The empty-data placeholder.
    #[must_use]
    pub fn none() -> Self {
        Self {
            name: "N/A".to_owned(),
            percentage: 0,
        }
    }
}

/// One month of an aggregated usage series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MonthlyPoint {
    /// Short month label ("Jan".."Dec").
    pub month: String,
    /// Sum of the selected value over the month's rows.
    pub total: f64,
    /// Number of rows observed in the month.
    pub count: u64,
}

/// One month of the revenue chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RevenuePoint {
    /// Short month label.
    pub month: String,
    /// Recorded revenue for the month.
    pub revenue: f64,
    /// Projection at 1.2x recorded revenue.
    pub projected: f64,
}

/// One month of the tenant growth chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TenantGrowthPoint {
    /// Short month label.
    pub month: String,
    /// Active users observed during the month.
    pub active_users: u64,
    /// New-signup estimate at 15% of active users.
    pub new_signups: u64,
}

/// Cross-tenant directory analytics: distributions and headline counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TenantAnalytics {
    /// Total tenant accounts.
    pub total_tenants: u64,
    /// Tenants with a live marketplace (template applied).
    pub active_marketplaces: u64,
    /// Dominant industry bucket.
    pub top_industry: TopEntry,
    /// Dominant location bucket.
    pub top_location: TopEntry,
    /// Top 5 industry buckets, Title Case names.
    pub industry_distribution: Vec<DistributionEntry>,
    /// Top 5 location buckets.
    pub location_distribution: Vec<DistributionEntry>,
}

impl TenantAnalytics {
    /// The all-zero fallback served when the data source is unavailable.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            total_tenants: 0,
            active_marketplaces: 0,
            top_industry: TopEntry::none(),
            top_location: TopEntry::none(),
            industry_distribution: Vec::new(),
            location_distribution: Vec::new(),
        }
    }
}

/// Headline numbers and chart series for the operator dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DashboardOverview {
    /// Total tenant accounts.
    pub total_tenants: u64,
    /// Tenants with a live marketplace.
    pub total_marketplaces: u64,
    /// Sum of subscription prices.
    pub monthly_revenue: f64,
    /// Percentage of churned tenants, one decimal place.
    pub churn_rate: f64,
    /// Per-month revenue with projection.
    pub revenue_series: Vec<RevenuePoint>,
    /// Per-month active users with new-signup estimate.
    pub tenant_series: Vec<TenantGrowthPoint>,
    /// Subscription plan tag -> count; untagged rows bucket as "Unknown".
    pub subscription_breakdown: Vec<DistributionEntry>,
}

impl DashboardOverview {
    /// The all-zero fallback served when the data source is unavailable.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            total_tenants: 0,
            total_marketplaces: 0,
            monthly_revenue: 0.0,
            churn_rate: 0.0,
            revenue_series: Vec::new(),
            tenant_series: Vec::new(),
            subscription_breakdown: Vec::new(),
        }
    }
}

/// One row of the tenant directory, display-formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TenantSummary {
    /// Tenant identifier.
    pub id: TenantId,
    /// Company name; `"Unnamed Tenant"` when missing.
    pub name: String,
    /// Title-Case industry; `"Unknown"` when missing.
    pub industry: String,
    /// Location; `"Unknown"` when missing.
    pub location: String,
    /// Lifecycle status.
    pub status: TenantStatus,
    /// Plan display string (e.g. "$50 Plan").
    pub plan: String,
    /// Registered marketplace users.
    pub users: u64,
    /// Live marketplaces (0 or 1).
    pub marketplaces: u64,
    /// Signup date, "Mon D, YYYY".
    pub active_since: String,
}

/// Per-tenant health card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TenantHealth {
    /// Tenant identifier.
    pub tenant_id: TenantId,
    /// Company name; `"Unnamed Tenant"` when missing.
    pub name: String,
    /// Composite health score, 0-100.
    pub score: u8,
    /// Lifecycle status.
    pub status: TenantStatus,
}
