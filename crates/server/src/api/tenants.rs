use axum::extract::{Path, State};
use axum::Json;
use tracing::warn;

use emporia_core::{TenantAnalytics, TenantHealth, TenantId, TenantSummary};

use super::AppState;
use crate::error::ServerError;

/// `GET /v1/tenants` -- display-formatted directory rows.
#[utoipa::path(
    get,
    path = "/v1/tenants",
    tag = "Tenants",
    summary = "Tenant directory",
    description = "One display-formatted row per tenant: name, industry, location, plan, user and marketplace counts.",
    responses(
        (status = 200, description = "Directory rows", body = [TenantSummary])
    )
)]
pub async fn list_tenants(State(state): State<AppState>) -> Json<Vec<TenantSummary>> {
    match state.insights.tenant_directory().await {
        Ok(rows) => Json(rows),
        Err(e) => {
            warn!(error = %e, "tenant directory fetch failed, serving empty directory");
            Json(Vec::new())
        }
    }
}

/// `GET /v1/tenants/insights` -- cross-tenant distributions.
#[utoipa::path(
    get,
    path = "/v1/tenants/insights",
    tag = "Tenants",
    summary = "Tenant analytics",
    description = "Industry and location distributions with top entries, plus headline counts.",
    responses(
        (status = 200, description = "The analytics view model", body = TenantAnalytics)
    )
)]
pub async fn tenant_insights(State(state): State<AppState>) -> Json<TenantAnalytics> {
    match state.insights.tenant_analytics().await {
        Ok(view) => Json(view),
        Err(e) => {
            warn!(error = %e, "tenant analytics fetch failed, serving fallback");
            Json(TenantAnalytics::fallback())
        }
    }
}

/// `GET /v1/tenants/{id}/health` -- per-tenant health card.
#[utoipa::path(
    get,
    path = "/v1/tenants/{id}/health",
    tag = "Tenants",
    summary = "Tenant health",
    description = "Composite 0-100 health score for one tenant's marketplace.",
    params(
        ("id" = String, Path, description = "Tenant identifier")
    ),
    responses(
        (status = 200, description = "The health card", body = TenantHealth),
        (status = 404, description = "Unknown tenant", body = super::schemas::ErrorResponse)
    )
)]
pub async fn tenant_health(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TenantHealth>, ServerError> {
    let tenant = TenantId::from(id);
    match state.insights.tenant_health(&tenant).await? {
        Some(view) => Ok(Json(view)),
        None => Err(ServerError::NotFound(tenant.to_string())),
    }
}
