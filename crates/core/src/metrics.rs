use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{TenantId, UserId};

/// Category of a scalar metric observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    User,
    Service,
    Provider,
    Revenue,
    Usage,
    Alert,
}

impl MetricKind {
    /// The wire/database tag for this kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Service => "service",
            Self::Provider => "provider",
            Self::Revenue => "revenue",
            Self::Usage => "usage",
            Self::Alert => "alert",
        }
    }

    /// Parse a kind tag as stored by the hosted database.
    /// Unknown or missing tags normalize to `Usage`.
    #[must_use]
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        match raw.map(str::to_ascii_lowercase).as_deref() {
            Some("user") => Self::User,
            Some("service") => Self::Service,
            Some("provider") => Self::Provider,
            Some("revenue") => Self::Revenue,
            Some("alert") => Self::Alert,
            _ => Self::Usage,
        }
    }
}

/// A timestamped scalar usage observation, optionally scoped to a tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UsageMetric {
    /// Unique metric row identifier.
    pub id: String,
    /// Metric category.
    pub kind: MetricKind,
    /// Observed value. Missing values normalize to 0.
    pub value: f64,
    /// Tenant the observation belongs to, when scoped.
    pub tenant_id: Option<TenantId>,
    /// When the observation was recorded.
    pub recorded_at: DateTime<Utc>,
}

/// A platform health observation for a tenant's marketplace.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SystemMetric {
    /// Unique metric row identifier.
    pub id: String,
    /// Tenant the observation belongs to, when scoped.
    pub tenant_id: Option<TenantId>,
    /// Request error rate as a percentage (0-100).
    pub error_rate: f64,
    /// Service uptime as a percentage (0-100).
    pub uptime: f64,
    /// When the observation was recorded.
    pub recorded_at: DateTime<Utc>,
}

/// A record of a user action inside a tenant marketplace.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TenantActivity {
    /// Unique activity row identifier.
    pub id: String,
    /// The kind of activity performed (e.g. `service_request_created`).
    pub activity_type: String,
    /// User who performed the activity.
    pub user_id: UserId,
    /// When the activity occurred.
    pub occurred_at: DateTime<Utc>,
}

/// A dated per-tenant rollup row from the hosted `analytics` table.
///
/// These are pre-aggregated upstream; the dashboard only reshapes them
/// into chart series.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AnalyticsSnapshot {
    /// Unique snapshot row identifier.
    pub id: String,
    /// Tenant the snapshot covers.
    pub tenant_id: TenantId,
    /// Day the snapshot covers.
    pub date: DateTime<Utc>,
    /// Total registered users as of the snapshot date.
    pub total_users: i64,
    /// Total service providers.
    pub total_providers: i64,
    /// Total buyers.
    pub total_buyers: i64,
    /// Total service requests.
    pub total_requests: i64,
    /// Completed service requests.
    pub total_completed_requests: i64,
    /// Revenue accumulated for the period.
    pub total_revenue: f64,
}
