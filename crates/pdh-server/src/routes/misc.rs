use axum::routing::get;
use axum::{Json, Router};
use pdh_core::responses::{HealthResponse, MessageResponse};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health))
        .route("/api/cors-test", get(cors_test).options(cors_test))
}

async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new("Welcome to the Product Discovery Hub API"))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

async fn cors_test() -> Json<MessageResponse> {
    Json(MessageResponse::new("CORS is working!"))
}
