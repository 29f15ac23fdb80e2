pub mod activities;
pub mod analytics;
pub mod cache;
pub mod health;
pub mod openapi;
pub mod overview;
pub mod schemas;
pub mod tenants;

use std::sync::Arc;
use std::time::Instant;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use emporia_insights::InsightsService;

use self::openapi::ApiDoc;

/// Shared state for all API handlers.
#[derive(Clone)]
pub struct AppState {
    /// The view-model service.
    pub insights: Arc<InsightsService>,
    /// When the server started, for uptime reporting.
    pub started_at: Instant,
}

impl AppState {
    /// Create the app state around an insights service.
    #[must_use]
    pub fn new(insights: Arc<InsightsService>) -> Self {
        Self {
            insights,
            started_at: Instant::now(),
        }
    }
}

/// Build the Axum router with all API routes, middleware, and Swagger UI.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/health", get(health::health))
        // Dashboard views
        .route("/v1/overview", get(overview::overview))
        .route("/v1/tenants", get(tenants::list_tenants))
        .route("/v1/tenants/insights", get(tenants::tenant_insights))
        .route("/v1/tenants/{id}/health", get(tenants::tenant_health))
        .route("/v1/analytics/usage", get(analytics::usage_by_month))
        .route("/v1/analytics/system", get(analytics::system_metrics))
        .route("/v1/activities", get(activities::recent_activities))
        // Cache management
        .route("/v1/cache/invalidate", post(cache::invalidate))
        .with_state(state)
        // Swagger UI
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
