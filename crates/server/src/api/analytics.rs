use axum::extract::{Query, State};
use axum::Json;
use tracing::warn;

use emporia_core::{MonthlyPoint, SystemMetric, TenantId};

use super::schemas::SystemMetricsParams;
use super::AppState;

/// `GET /v1/analytics/usage` -- monthly usage series.
#[utoipa::path(
    get,
    path = "/v1/analytics/usage",
    tag = "Analytics",
    summary = "Monthly usage",
    description = "Usage observations grouped by month, summed per group.",
    responses(
        (status = 200, description = "Monthly usage points", body = [MonthlyPoint])
    )
)]
pub async fn usage_by_month(State(state): State<AppState>) -> Json<Vec<MonthlyPoint>> {
    match state.insights.usage_by_month().await {
        Ok(points) => Json(points),
        Err(e) => {
            warn!(error = %e, "usage fetch failed, serving empty series");
            Json(Vec::new())
        }
    }
}

/// `GET /v1/analytics/system` -- raw platform health observations.
#[utoipa::path(
    get,
    path = "/v1/analytics/system",
    tag = "Analytics",
    summary = "Platform health observations",
    description = "Error-rate and uptime observations, ascending by recorded time, optionally scoped to one tenant.",
    params(SystemMetricsParams),
    responses(
        (status = 200, description = "Health observations", body = [SystemMetric])
    )
)]
pub async fn system_metrics(
    State(state): State<AppState>,
    Query(params): Query<SystemMetricsParams>,
) -> Json<Vec<SystemMetric>> {
    let tenant = params.tenant.map(TenantId::from);
    match state.insights.system_metric_history(tenant, params.limit).await {
        Ok(rows) => Json(rows),
        Err(e) => {
            warn!(error = %e, "system metric fetch failed, serving empty series");
            Json(Vec::new())
        }
    }
}
