//! Liveness endpoints.

use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;

pub const ROOT_MESSAGE: &str = "SurgeSentinel backend is running 🎯";

#[derive(Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// `GET /`: backend running banner.
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: ROOT_MESSAGE,
    })
}

/// `GET /api/health`: connection check for the renderer.
pub async fn check() -> Result<Json<HealthResponse>, ApiError> {
    Ok(Json(HealthResponse {
        status: "ok",
        service: crate::config::APP_NAME,
        version: crate::config::APP_VERSION,
    }))
}
