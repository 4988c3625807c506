use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::mint::{MintRequest, MintService};

use crate::errors::JsonApiError;

pub const SERVICE_NAME: &str = "kuber-nft-mint";

/// Static liveness payload; no dependencies checked.
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok", service: SERVICE_NAME })
}

/// `POST /mint`: validate, issue, persist, return the minted record.
pub async fn mint(
    State(svc): State<Arc<MintService>>,
    Json(input): Json<MintRequest>,
) -> Result<Json<serde_json::Value>, JsonApiError> {
    let record = svc.issue(input).await?;
    Ok(Json(serde_json::json!({"success": true, "token": record})))
}

/// Build the application router: mint + health, CORS, per-request trace spans.
pub fn build_router(svc: Arc<MintService>, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/mint", post(mint))
        .with_state(svc)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
