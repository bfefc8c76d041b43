//! Dashboard HTTP API.
//!
//! Exposes the dashboard views as JSON endpoints for the renderer.
//! Read views are nested under `/api/`; operator actions (refresh,
//! staff notification) are POST routes alongside them.
//!
//! The router is composable: `dashboard_api_router()` returns a `Router`
//! that can be mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use router::dashboard_api_router;
pub use server::{start_api_server, ApiServer, ApiSession, ServerError};
pub use types::ApiContext;
