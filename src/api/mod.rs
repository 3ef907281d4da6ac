//! REST API server for Meetric.
//!
//! Provides HTTP endpoints for:
//! - Running an analysis (JSON rows or raw CSV body)
//! - Browsing stored analyses
//! - Applying bundle actions (toggles, suggestion promotion)

pub mod error;
pub mod routes;

use crate::config::Config;
use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tracing::info;

pub use routes::analyses::AnalysesState;

pub struct ApiServer {
    port: u16,
    state: AnalysesState,
}

impl ApiServer {
    pub fn new(config: &Config) -> Self {
        Self {
            port: config.server.port,
            state: AnalysesState {
                history_limit: config.storage.history_limit,
            },
        }
    }

    /// Override the configured port (CLI --port).
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub async fn start(self) -> Result<()> {
        let app = Router::new()
            // Root and version endpoints
            .route("/", get(status))
            .route("/version", get(version))
            // Analysis routes
            .merge(routes::analyses::router(self.state))
            .layer(ServiceBuilder::new());

        let listener = tokio::net::TcpListener::bind(&format!("127.0.0.1:{}", self.port)).await?;

        info!("API server listening on http://127.0.0.1:{}", self.port);
        info!("Endpoints:");
        info!("  GET    /                     - Service info");
        info!("  GET    /version              - Version info");
        info!("  POST   /analyze              - Analyze transcript rows");
        info!("  POST   /analyze/csv          - Analyze a raw CSV body");
        info!("  GET    /analyses             - List stored analyses");
        info!("  GET    /analyses/:id         - Get a stored analysis");
        info!("  POST   /analyses/:id/actions - Apply a bundle action");
        info!("  DELETE /analyses/:id         - Delete a stored analysis");

        axum::serve(listener, app).await?;

        Ok(())
    }
}

async fn status() -> Json<Value> {
    Json(json!({
        "service": "meetric",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

async fn version() -> Json<Value> {
    Json(json!({
        "version": env!("CARGO_PKG_VERSION"),
        "name": "meetric"
    }))
}
