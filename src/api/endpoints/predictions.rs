//! Surge prediction endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::classify::{self, SurgeAlert};
use crate::models::SurgePrediction;
use crate::normalize::Sourced;

#[derive(Serialize)]
pub struct PredictionResponse {
    pub prediction: Sourced<SurgePrediction>,
    pub reasoning: String,
    pub alert: SurgeAlert,
}

/// `GET /api/predictions`: forecast, reasoning and alert tier.
pub async fn forecast(State(ctx): State<ApiContext>) -> Result<Json<PredictionResponse>, ApiError> {
    let prediction = ctx.with_dashboard(|dashboard| dashboard.surge_prediction()).await?;

    Ok(Json(PredictionResponse {
        reasoning: prediction.value.reasoning_or_placeholder().to_string(),
        alert: classify::assess(&prediction.value),
        prediction,
    }))
}
