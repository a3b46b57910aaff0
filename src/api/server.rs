//! HTTP server for the admin REST API

use super::handlers;
use crate::config::ServerConfig;
use crate::error::{AppError, Result};
use crate::state::AppState;
use axum::{
    routing::{get, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Build the full router over `state`
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // ================================================================
        // Service
        // ================================================================
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        // ================================================================
        // Catalog
        // ================================================================
        .route(
            "/categories",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route(
            "/products",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/products/:product_id",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .route(
            "/products/category/:category_id",
            get(handlers::products_by_category),
        )
        // ================================================================
        // Inventory
        // ================================================================
        .route("/inventory", get(handlers::list_inventory))
        .route("/inventory/low-stock", get(handlers::low_stock))
        .route("/inventory/:product_id", put(handlers::update_inventory))
        .route(
            "/inventory/history/:product_id",
            get(handlers::inventory_history),
        )
        // ================================================================
        // Sales and analytics
        // ================================================================
        .route(
            "/sales",
            get(handlers::list_sales).post(handlers::create_sale),
        )
        .route("/sales/daily", get(handlers::daily_sales))
        .route("/sales/weekly", get(handlers::weekly_sales))
        .route("/sales/monthly", get(handlers::monthly_sales))
        .route("/sales/annual", get(handlers::annual_sales))
        .route("/sales/comparison", get(handlers::compare_sales))
        .route("/sales/filter", get(handlers::filter_sales))
        .with_state(Arc::new(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// API server manager
pub struct ApiServer {
    state: AppState,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl ApiServer {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            shutdown_tx: None,
            task: None,
        }
    }

    /// Bind and start serving in the background. Returns the bound address.
    pub async fn start(&mut self, config: &ServerConfig) -> Result<SocketAddr> {
        let addr: SocketAddr = config
            .bind_address()
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid address: {}", e)))?;

        let listener = tokio::net::TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;
        let app = build_router(self.state.clone());

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        self.shutdown_tx = Some(shutdown_tx);

        info!("Starting E-commerce Admin API server on {}", local_addr);

        self.task = Some(tokio::spawn(async move {
            let server = axum::serve(listener, app).with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                info!("API server shutting down");
            });

            if let Err(e) = server.await {
                error!("API server error: {}", e);
            }
        }));

        info!("");
        info!("=== Endpoints ===");
        info!("  GET  http://{}/health", local_addr);
        info!("  GET  http://{}/products | /categories | /inventory | /sales", local_addr);
        info!("  GET  http://{}/sales/daily?days=7", local_addr);
        info!("  GET  http://{}/sales/weekly?weeks=4", local_addr);
        info!("  GET  http://{}/sales/monthly?months=6", local_addr);
        info!("  GET  http://{}/sales/annual?years=3", local_addr);
        info!("  GET  http://{}/sales/comparison?period1_start=..", local_addr);
        info!("  GET  http://{}/sales/filter?start_date=..", local_addr);

        Ok(local_addr)
    }

    /// Signal the server to stop accepting connections
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            info!("API server stop signal sent");
        }
    }

    /// Stop and wait for in-flight requests to finish
    pub async fn shutdown(&mut self) {
        self.stop();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                error!("API server task failed: {}", e);
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.shutdown_tx.is_some()
    }
}

impl Drop for ApiServer {
    fn drop(&mut self) {
        self.stop();
    }
}
