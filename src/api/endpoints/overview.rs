//! Full dashboard snapshot endpoint.

use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::dashboard::DashboardSnapshot;

/// `GET /api/overview`: everything the overview tab renders.
pub async fn snapshot(State(ctx): State<ApiContext>) -> Result<Json<DashboardSnapshot>, ApiError> {
    let snapshot = ctx.with_dashboard(|dashboard| dashboard.snapshot()).await?;
    Ok(Json(snapshot))
}
