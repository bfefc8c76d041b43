use serde::{Deserialize, Serialize};

/// Hospital-wide headline figures for today.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub today_admissions: u32,
    pub occupancy_rate: f64,
    pub total_patients: u32,
    pub available_beds: u32,
}
