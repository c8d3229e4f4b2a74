// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;

use crate::application::dashboard_service::DashboardService;
use crate::infrastructure::clock::LocalClock;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::random_source::RandomSampleSource;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Load configuration
    let config = load_app_config()?;

    // Create sample source and service
    let source = RandomSampleSource::new(config.dashboard.rng_seed);
    let dashboard_service =
        DashboardService::new(&config.dashboard, Box::new(source), Arc::new(LocalClock))?;

    let state = Arc::new(AppState { dashboard_service });
    let router = build_router(state);

    // Start server
    let addr = config.server.resolve_addr().await?;
    tracing::info!(%addr, "Starting radar-dashboard service");

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
