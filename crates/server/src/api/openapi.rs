use emporia_core::{
    DashboardOverview, DistributionEntry, MonthlyPoint, RevenuePoint, SystemMetric,
    TenantActivity, TenantAnalytics, TenantGrowthPoint, TenantHealth, TenantStatus, TenantSummary,
    TopEntry,
};

use super::schemas::{ErrorResponse, HealthResponse, InvalidateRequest, InvalidateResponse};

#[derive(utoipa::OpenApi)]
#[openapi(
    info(
        title = "Emporia Dashboard API",
        version = "0.1.0",
        description = "Read-only HTTP API serving aggregated marketplace dashboard views: tenant distributions, revenue and growth series, health scores, and the activity feed.",
        license(name = "Apache-2.0")
    ),
    tags(
        (name = "Health", description = "Service health and cache statistics"),
        (name = "Dashboard", description = "Operator dashboard overview"),
        (name = "Tenants", description = "Tenant directory, analytics, and health"),
        (name = "Analytics", description = "Monthly usage series"),
        (name = "Activities", description = "Recent marketplace activity feed"),
        (name = "Cache", description = "Explicit view cache invalidation")
    ),
    paths(
        super::health::health,
        super::overview::overview,
        super::tenants::list_tenants,
        super::tenants::tenant_insights,
        super::tenants::tenant_health,
        super::analytics::usage_by_month,
        super::analytics::system_metrics,
        super::activities::recent_activities,
        super::cache::invalidate,
    ),
    components(schemas(
        DashboardOverview, TenantAnalytics, TenantSummary, TenantHealth,
        DistributionEntry, TopEntry, MonthlyPoint, RevenuePoint, TenantGrowthPoint,
        TenantActivity, TenantStatus, SystemMetric,
        HealthResponse, InvalidateRequest, InvalidateResponse, ErrorResponse,
    ))
)]
pub struct ApiDoc;
