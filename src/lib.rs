pub mod aggregate;
pub mod api;
pub mod cache;
pub mod classify;
pub mod config;
pub mod dashboard;
pub mod fallback;
pub mod gateway;
pub mod models;
pub mod normalize;
pub mod rank;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::dashboard::SurgeDashboard;
use crate::gateway::{HttpGateway, MockGateway, SurgeGateway};

pub fn run() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = AppConfig::from_env();
    tracing::info!(
        api_base_url = %config.api_base_url,
        cache_ttl_secs = config.cache_ttl.as_secs(),
        bind_addr = %config.bind_addr,
        "configuration resolved"
    );

    // The blocking HTTP client must be created and dropped outside the
    // async runtime, so the dashboard is owned here for the whole run.
    let gateway: Arc<dyn SurgeGateway> = match HttpGateway::from_config(&config) {
        Ok(gateway) => Arc::new(gateway),
        Err(e) => {
            tracing::error!("HTTP gateway unavailable, serving fallback data only: {e}");
            Arc::new(MockGateway::offline())
        }
    };
    let dashboard = Arc::new(SurgeDashboard::new(gateway, config.cache_ttl));

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("Failed to start async runtime: {e}");
            return;
        }
    };

    runtime.block_on(serve(Arc::clone(&dashboard), config));
    drop(runtime);

    tracing::info!("{} stopped", config::APP_NAME);
}

async fn serve(dashboard: Arc<SurgeDashboard>, config: AppConfig) {
    let server = match api::start_api_server(dashboard, config.bind_addr).await {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("{e}");
            return;
        }
    };

    tracing::info!(
        session_id = %server.session.session_id,
        "Dashboard API listening on http://{}",
        server.session.server_addr
    );

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }

    server.stop().await;
}
