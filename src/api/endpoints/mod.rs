//! API endpoint handlers.
//!
//! One module per dashboard view. Handlers only shape JSON; all decisions
//! are made by `SurgeDashboard` and the core modules it calls.

pub mod beds;
pub mod control;
pub mod health;
pub mod overview;
pub mod predictions;
pub mod recommendations;
