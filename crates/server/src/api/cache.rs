use axum::extract::State;
use axum::Json;
use tracing::info;

use emporia_insights::QueryKey;

use super::schemas::{InvalidateRequest, InvalidateResponse};
use super::AppState;
use crate::error::ServerError;

/// `POST /v1/cache/invalidate` -- drop cached views by key, or all of them.
#[utoipa::path(
    post,
    path = "/v1/cache/invalidate",
    tag = "Cache",
    summary = "Invalidate cached views",
    description = "Drops one cached query by key, or every entry when no key is given.",
    request_body = InvalidateRequest,
    responses(
        (status = 200, description = "Invalidation applied", body = InvalidateResponse),
        (status = 400, description = "Unknown query key", body = super::schemas::ErrorResponse)
    )
)]
pub async fn invalidate(
    State(state): State<AppState>,
    Json(request): Json<InvalidateRequest>,
) -> Result<Json<InvalidateResponse>, ServerError> {
    let cache = state.insights.cache();

    let Some(ref query) = request.query else {
        cache.invalidate_all();
        info!("query cache cleared");
        return Ok(Json(InvalidateResponse { invalidated: true }));
    };

    let key = match query.as_str() {
        "dashboard_overview" => QueryKey::DashboardOverview,
        "tenant_analytics" => QueryKey::TenantAnalytics,
        "tenant_directory" => QueryKey::TenantDirectory,
        "usage_by_month" => QueryKey::UsageByMonth,
        "tenant_health" => {
            let tenant = request.tenant.clone().ok_or_else(|| {
                ServerError::Invalid("tenant is required for the tenant_health key".to_owned())
            })?;
            QueryKey::TenantHealth {
                tenant: tenant.into(),
            }
        }
        other => {
            return Err(ServerError::Invalid(format!("unknown query key: {other}")));
        }
    };

    let invalidated = cache.invalidate(&key);
    info!(query = %query, invalidated, "cache invalidation requested");
    Ok(Json(InvalidateResponse { invalidated }))
}
