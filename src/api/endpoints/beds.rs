//! Bed management endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::aggregate::{self, CapacityTotals, DepartmentView};
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::normalize::Provenance;

#[derive(Serialize)]
pub struct BedsResponse {
    pub provenance: Provenance,
    pub capacity: CapacityTotals,
    pub departments: Vec<DepartmentView>,
}

/// `GET /api/beds`: per-department occupancy with hospital totals.
pub async fn occupancy(State(ctx): State<ApiContext>) -> Result<Json<BedsResponse>, ApiError> {
    let beds = ctx.with_dashboard(|dashboard| dashboard.bed_occupancy()).await?;

    Ok(Json(BedsResponse {
        capacity: aggregate::aggregate(&beds.value),
        departments: aggregate::department_views(&beds.value),
        provenance: beds.provenance,
    }))
}
