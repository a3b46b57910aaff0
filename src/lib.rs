//! E-commerce Admin API
//!
//! REST service over a product catalog, inventory levels and sales, with a
//! small analytics engine that summarizes sales per day, week, month and year
//! and compares arbitrary periods.

pub mod analytics;
pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod services;
pub mod state;

use api::ApiServer;
use config::ServerConfig;
use error::Result;
use state::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ecommerce_admin=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Serve the API until Ctrl-C
pub async fn run(config: ServerConfig) -> Result<()> {
    tracing::info!("Starting E-commerce Admin API...");

    let state = AppState::new(config.clone())?;
    tracing::info!("Application state initialized");

    let mut server = ApiServer::new(state);
    server.start(&config).await?;

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown requested");
    server.shutdown().await;

    Ok(())
}
