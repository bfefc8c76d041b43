use serde::{Deserialize, Serialize};

use super::percentage;

/// Bed occupancy for one hospital department.
///
/// `available_beds` and `occupancy_rate` are always derived from the two
/// counts, so a value built through [`DepartmentOccupancy::new`] can never
/// carry inconsistent figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentOccupancy {
    pub department: String,
    pub total_beds: u32,
    pub occupied_beds: u32,
    pub available_beds: u32,
    pub occupancy_rate: f64,
}

impl DepartmentOccupancy {
    /// Build a department record, deriving availability and rate.
    ///
    /// `occupied_beds` is capped at `total_beds`.
    pub fn new(department: impl Into<String>, total_beds: u32, occupied_beds: u32) -> Self {
        let occupied_beds = occupied_beds.min(total_beds);
        Self {
            department: department.into(),
            total_beds,
            occupied_beds,
            available_beds: total_beds - occupied_beds,
            occupancy_rate: percentage(u64::from(occupied_beds), u64::from(total_beds)),
        }
    }
}
