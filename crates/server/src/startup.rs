use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use service::{file::FlatFileStore, runtime};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Assemble the router over the configured record file.
pub fn build_app(cfg: &AppConfig) -> Router {
    let store = FlatFileStore::new(cfg.storage.data_file.clone());
    routes::build_router(ServerState::new(store), build_cors())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C; running until killed");
        std::future::pending::<()>().await;
    }
    info!(event = "shutdown_signal", "received Ctrl+C, shutting down");
}

/// Public entry: build the app and run the HTTP server until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    runtime::ensure_data_dir(&cfg.storage.data_file).await?;

    let app = build_app(&cfg);
    let listener = tokio::net::TcpListener::bind(cfg.bind_addr()).await?;
    let addr: SocketAddr = listener.local_addr()?;
    info!(%addr, data_file = %cfg.storage.data_file.display(), "starting employee registry");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
