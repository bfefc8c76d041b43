//! Shared types for the API layer.

use std::sync::Arc;

use crate::api::error::ApiError;
use crate::dashboard::SurgeDashboard;

/// Shared context for all API routes.
#[derive(Clone)]
pub struct ApiContext {
    pub dashboard: Arc<SurgeDashboard>,
}

impl ApiContext {
    pub fn new(dashboard: Arc<SurgeDashboard>) -> Self {
        Self { dashboard }
    }

    /// Run blocking dashboard work (gateway I/O) off the async runtime.
    pub async fn with_dashboard<F, T>(&self, work: F) -> Result<T, ApiError>
    where
        F: FnOnce(&SurgeDashboard) -> T + Send + 'static,
        T: Send + 'static,
    {
        let dashboard = Arc::clone(&self.dashboard);
        let result = tokio::task::spawn_blocking(move || work(&dashboard)).await?;
        Ok(result)
    }
}
