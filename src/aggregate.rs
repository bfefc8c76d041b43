//! Hospital-wide capacity metrics derived from per-department occupancy.
//!
//! Totals are plain sums over the input; the overall percentage is computed
//! from those sums and is defined as 0 when there are no beds at all.

use serde::Serialize;

use crate::models::{percentage, DepartmentOccupancy, OccupancyLevel};

/// Occupancy rate above which a department is critical.
pub const CRITICAL_OCCUPANCY_PCT: f64 = 90.0;
/// Occupancy rate above which a department is elevated.
pub const ELEVATED_OCCUPANCY_PCT: f64 = 75.0;

/// Capacity totals across every department in a snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CapacityTotals {
    pub total_beds: u64,
    pub occupied_beds: u64,
    pub available_beds: u64,
    pub overall_occupancy_pct: f64,
}

/// A department annotated with its occupancy band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentView {
    #[serde(flatten)]
    pub occupancy: DepartmentOccupancy,
    pub level: OccupancyLevel,
}

/// Sum bed counts across departments.
pub fn aggregate(departments: &[DepartmentOccupancy]) -> CapacityTotals {
    let (total_beds, occupied_beds, available_beds) = departments.iter().fold(
        (0u64, 0u64, 0u64),
        |(total, occupied, available), d| {
            (
                total + u64::from(d.total_beds),
                occupied + u64::from(d.occupied_beds),
                available + u64::from(d.available_beds),
            )
        },
    );

    CapacityTotals {
        total_beds,
        occupied_beds,
        available_beds,
        overall_occupancy_pct: percentage(occupied_beds, total_beds),
    }
}

impl OccupancyLevel {
    /// Band for an occupancy percentage; both thresholds are exclusive.
    pub fn from_rate(rate: f64) -> Self {
        if rate > CRITICAL_OCCUPANCY_PCT {
            Self::Critical
        } else if rate > ELEVATED_OCCUPANCY_PCT {
            Self::Elevated
        } else {
            Self::Normal
        }
    }
}

/// Annotate each department with its occupancy band, keeping input order.
pub fn department_views(departments: &[DepartmentOccupancy]) -> Vec<DepartmentView> {
    departments
        .iter()
        .map(|d| DepartmentView {
            occupancy: d.clone(),
            level: OccupancyLevel::from_rate(d.occupancy_rate),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback;

    #[test]
    fn emergency_and_icu_totals() {
        let departments = vec![
            DepartmentOccupancy::new("Emergency", 50, 42),
            DepartmentOccupancy::new("ICU", 30, 28),
        ];
        let totals = aggregate(&departments);
        assert_eq!(totals.total_beds, 80);
        assert_eq!(totals.occupied_beds, 70);
        assert_eq!(totals.available_beds, 10);
        assert_eq!(totals.overall_occupancy_pct, 87.5);
    }

    #[test]
    fn empty_input_is_all_zero() {
        let totals = aggregate(&[]);
        assert_eq!(totals, CapacityTotals::default());
        assert_eq!(totals.overall_occupancy_pct, 0.0);
    }

    #[test]
    fn zero_capacity_everywhere_does_not_divide_by_zero() {
        let departments = vec![
            DepartmentOccupancy::new("Closed A", 0, 0),
            DepartmentOccupancy::new("Closed B", 0, 0),
        ];
        let totals = aggregate(&departments);
        assert_eq!(totals.total_beds, 0);
        assert_eq!(totals.overall_occupancy_pct, 0.0);
    }

    #[test]
    fn fallback_dataset_totals() {
        let totals = aggregate(&fallback::bed_occupancy());
        assert_eq!(totals.total_beds, 330);
        assert_eq!(totals.occupied_beds, 250);
        assert_eq!(totals.available_beds, 80);
    }

    #[test]
    fn totals_stay_within_bounds_for_generated_inputs() {
        for size in 1..=12u32 {
            let departments: Vec<_> = (0..size)
                .map(|i| {
                    let total = (i * 37 + size * 11) % 120;
                    let occupied = if total == 0 { 0 } else { (i * 53 + 7) % (total + 1) };
                    DepartmentOccupancy::new(format!("Dept {i}"), total, occupied)
                })
                .collect();
            let totals = aggregate(&departments);
            assert!(totals.occupied_beds <= totals.total_beds);
            assert_eq!(totals.available_beds, totals.total_beds - totals.occupied_beds);
            assert!((0.0..=100.0).contains(&totals.overall_occupancy_pct));
        }
    }

    #[test]
    fn occupancy_level_thresholds_are_exclusive() {
        assert_eq!(OccupancyLevel::from_rate(90.0), OccupancyLevel::Elevated);
        assert_eq!(OccupancyLevel::from_rate(90.1), OccupancyLevel::Critical);
        assert_eq!(OccupancyLevel::from_rate(75.0), OccupancyLevel::Normal);
        assert_eq!(OccupancyLevel::from_rate(75.5), OccupancyLevel::Elevated);
        assert_eq!(OccupancyLevel::from_rate(0.0), OccupancyLevel::Normal);
    }

    #[test]
    fn department_views_keep_order_and_band() {
        let views = department_views(&fallback::bed_occupancy());
        let names: Vec<_> = views.iter().map(|v| v.occupancy.department.as_str()).collect();
        assert_eq!(names, ["Emergency", "ICU", "General Ward", "Pediatrics", "Surgery"]);
        assert_eq!(views[0].level, OccupancyLevel::Elevated);
        assert_eq!(views[1].level, OccupancyLevel::Critical);
        assert_eq!(views[3].level, OccupancyLevel::Normal);
    }

    #[test]
    fn department_view_serializes_flat() {
        let views = department_views(&[DepartmentOccupancy::new("ICU", 30, 28)]);
        let json = serde_json::to_value(&views[0]).unwrap();
        assert_eq!(json["department"], "ICU");
        assert_eq!(json["available_beds"], 2);
        assert_eq!(json["level"], "critical");
    }
}
