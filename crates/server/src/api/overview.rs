use axum::extract::State;
use axum::Json;
use tracing::warn;

use emporia_core::DashboardOverview;

use super::AppState;

/// `GET /v1/overview` -- headline numbers and chart series.
///
/// A data-source outage never fails this view; the documented all-zero
/// fallback is served instead.
#[utoipa::path(
    get,
    path = "/v1/overview",
    tag = "Dashboard",
    summary = "Operator dashboard overview",
    description = "Tenant totals, monthly revenue, churn, revenue and growth series, and the subscription breakdown.",
    responses(
        (status = 200, description = "The overview view model", body = DashboardOverview)
    )
)]
pub async fn overview(State(state): State<AppState>) -> Json<DashboardOverview> {
    match state.insights.dashboard_overview().await {
        Ok(view) => Json(view),
        Err(e) => {
            warn!(error = %e, "overview fetch failed, serving fallback");
            Json(DashboardOverview::fallback())
        }
    }
}
