use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::{mint::MintService, storage::file_store::FileRecordStore};

use crate::errors::StartupError;
use crate::routes;

fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    // The service is called from a browser UI in the reference deployment
    CorsLayer::very_permissive()
}

/// Load bind address and storage root from config.toml / env vars.
fn load_config() -> Result<(SocketAddr, String), StartupError> {
    let cfg = configs::AppConfig::load_and_validate()
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad bind address: {e}")))?;
    Ok((addr, cfg.storage.data_dir))
}

/// Public entry: build the app and run the HTTP server.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let (addr, data_dir) = load_config()?;

    common::env::ensure_env(&data_dir).await?;

    let store = FileRecordStore::new(&data_dir).await?;
    let svc = MintService::new(store);

    let app: Router = routes::build_router(svc, build_cors());

    info!(%addr, %data_dir, "starting mint service");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
