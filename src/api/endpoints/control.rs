//! Operator actions: refresh and staff alerts.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::dashboard::{DashboardSnapshot, NotificationOutcome};

/// `POST /api/refresh`: invalidate every cached fetch and rebuild.
pub async fn refresh(State(ctx): State<ApiContext>) -> Result<Json<DashboardSnapshot>, ApiError> {
    let snapshot = ctx.with_dashboard(|dashboard| dashboard.refresh()).await?;
    Ok(Json(snapshot))
}

/// `POST /api/staff/notify`: dispatch staff alerts once.
///
/// A failed dispatch is still a well-formed answer for the operator, so it
/// maps to 502 with the outcome body rather than to an `ApiError`.
pub async fn notify_staff(
    State(ctx): State<ApiContext>,
) -> Result<(StatusCode, Json<NotificationOutcome>), ApiError> {
    let outcome = ctx.with_dashboard(|dashboard| dashboard.notify_staff()).await?;
    let status = if outcome.delivered {
        StatusCode::OK
    } else {
        StatusCode::BAD_GATEWAY
    };
    Ok((status, Json(outcome)))
}
