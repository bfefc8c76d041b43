//! Built-in demonstration dataset.
//!
//! Substituted whenever the hospital data service is unreachable or answers
//! with something that cannot be normalized. Every call returns the same
//! values, so a degraded dashboard is stable across refreshes.

use crate::models::{DashboardSummary, DepartmentOccupancy, Priority, RecommendedAction, SurgePrediction};

/// Headline figures shown in demo mode.
pub fn dashboard_summary() -> DashboardSummary {
    DashboardSummary {
        today_admissions: 145,
        occupancy_rate: 78.0,
        total_patients: 320,
        available_beds: 85,
    }
}

/// Forecast shown in demo mode.
pub fn surge_prediction() -> SurgePrediction {
    SurgePrediction {
        predicted_patients: 67,
        confidence: 0.82,
        reasoning: "Increased patient inflow expected due to upcoming festival and current \
                    pollution levels (AQI: 156). Historical data shows 25% increase during \
                    similar conditions."
            .to_string(),
        recommendations: vec![
            RecommendedAction::new("Increase emergency department staff by 30%")
                .with_priority(Priority::High)
                .with_category("staffing")
                .with_department("Emergency")
                .with_timeline("Next 24 hours"),
            RecommendedAction::new("Prepare 15 additional beds in ICU")
                .with_priority(Priority::Medium)
                .with_category("bed_management")
                .with_department("ICU")
                .with_timeline("Next 12 hours"),
            RecommendedAction::new("Stock additional respiratory medications")
                .with_priority(Priority::Medium)
                .with_category("supplies")
                .with_department("Pharmacy")
                .with_timeline("Next 6 hours"),
        ],
    }
}

/// Department occupancy shown in demo mode. Never empty.
pub fn bed_occupancy() -> Vec<DepartmentOccupancy> {
    vec![
        DepartmentOccupancy::new("Emergency", 50, 42),
        DepartmentOccupancy::new("ICU", 30, 28),
        DepartmentOccupancy::new("General Ward", 150, 110),
        DepartmentOccupancy::new("Pediatrics", 40, 25),
        DepartmentOccupancy::new("Surgery", 60, 45),
    ]
}
