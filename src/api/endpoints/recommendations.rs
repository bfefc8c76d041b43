//! Recommended actions endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::normalize::Provenance;
use crate::rank::{self, RankedRecommendations};

#[derive(Serialize)]
pub struct RecommendationsResponse {
    pub provenance: Provenance,
    pub recommendations: RankedRecommendations,
}

/// `GET /api/recommendations`: actions in forecaster order with display tiers.
pub async fn list(
    State(ctx): State<ApiContext>,
) -> Result<Json<RecommendationsResponse>, ApiError> {
    let prediction = ctx.with_dashboard(|dashboard| dashboard.surge_prediction()).await?;

    Ok(Json(RecommendationsResponse {
        recommendations: rank::rank(&prediction.value.recommendations),
        provenance: prediction.provenance,
    }))
}
