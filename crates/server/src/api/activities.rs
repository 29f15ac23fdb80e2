use axum::extract::{Query, State};
use axum::Json;
use tracing::warn;

use emporia_core::TenantActivity;

use super::schemas::ActivitiesParams;
use super::AppState;

/// `GET /v1/activities` -- the most recent activity feed rows.
#[utoipa::path(
    get,
    path = "/v1/activities",
    tag = "Activities",
    summary = "Recent activity feed",
    description = "Most recent marketplace activities, newest first.",
    params(ActivitiesParams),
    responses(
        (status = 200, description = "Activity rows", body = [TenantActivity])
    )
)]
pub async fn recent_activities(
    State(state): State<AppState>,
    Query(params): Query<ActivitiesParams>,
) -> Json<Vec<TenantActivity>> {
    match state.insights.recent_activities(params.limit).await {
        Ok(rows) => Json(rows),
        Err(e) => {
            warn!(error = %e, "activity fetch failed, serving empty feed");
            Json(Vec::new())
        }
    }
}
