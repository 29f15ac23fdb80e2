use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Health check response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status indicator.
    #[schema(example = "ok")]
    pub status: String,
    /// Seconds since the server started.
    #[schema(example = 3600)]
    pub uptime_seconds: u64,
    /// Number of entries currently held in the query cache.
    #[schema(example = 4)]
    pub cache_entries: u64,
}

/// Query parameters for the activity feed.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ActivitiesParams {
    /// Maximum number of rows to return (default 500, max 1000).
    pub limit: Option<u32>,
}

/// Query parameters for the platform health observation feed.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct SystemMetricsParams {
    /// Restrict observations to one tenant.
    pub tenant: Option<String>,
    /// Maximum number of rows to return (default 500, max 1000).
    pub limit: Option<u32>,
}

/// Request body for explicit cache invalidation.
///
/// Omitting `query` drops every cached view.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct InvalidateRequest {
    /// Which cached query to drop: `dashboard_overview`,
    /// `tenant_analytics`, `tenant_directory`, `usage_by_month`, or
    /// `tenant_health`.
    #[schema(example = "dashboard_overview")]
    pub query: Option<String>,
    /// Tenant scope, required when `query` is `tenant_health`.
    pub tenant: Option<String>,
}

/// Response after a cache invalidation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InvalidateResponse {
    /// `true` if a live cache entry was dropped.
    #[schema(example = true)]
    pub invalidated: bool,
}

/// Generic error response returned on failures.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    #[schema(example = "not found: tenant-42")]
    pub error: String,
}
