//! Domain records exchanged between the gateway, the core computations and
//! the API. All of them are immutable snapshots rebuilt on every fetch.

pub mod department;
pub mod enums;
pub mod metrics;
pub mod prediction;
pub mod summary;

pub use department::DepartmentOccupancy;
pub use enums::{OccupancyLevel, Priority, SurgeTier, UnknownVariant};
pub use metrics::percentage;
pub use prediction::{RecommendedAction, SurgePrediction};
pub use summary::DashboardSummary;
