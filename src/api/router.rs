//! Dashboard API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Read views and operator actions are nested under `/api/`; `/` answers
//! with the backend banner. CORS is permissive: the renderer may be served
//! from any origin.

use std::sync::Arc;

use axum::http::Uri;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::dashboard::SurgeDashboard;

/// Build the dashboard API router.
pub fn dashboard_api_router(dashboard: Arc<SurgeDashboard>) -> Router {
    build_router(ApiContext::new(dashboard))
}

fn build_router(ctx: ApiContext) -> Router {
    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/overview", get(endpoints::overview::snapshot))
        .route("/predictions", get(endpoints::predictions::forecast))
        .route("/beds", get(endpoints::beds::occupancy))
        .route("/recommendations", get(endpoints::recommendations::list))
        .route("/refresh", post(endpoints::control::refresh))
        .route("/staff/notify", post(endpoints::control::notify_staff))
        .with_state(ctx);

    Router::new()
        .route("/", get(endpoints::health::root))
        .nest("/api", api)
        .fallback(unknown_route)
        .layer(CorsLayer::permissive())
}

async fn unknown_route(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}
