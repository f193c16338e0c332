//! Route table. Each framework owns a sub-router; [`app`] merges them and
//! applies the shared layers.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;

use crate::middleware::{cors, request_tracing};
use crate::state::AppState;

mod ai;
mod auth;
mod canvas;
mod csd;
mod links;
mod misc;
mod okr;
mod personas;
mod projects;
mod report;
mod rice;
mod roadmap;
mod upload;

/// Multipart framing on top of the photo itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Every route without state or layers.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(misc::router())
        .merge(auth::router())
        .merge(projects::router())
        .merge(csd::router())
        .merge(personas::router())
        .merge(canvas::router())
        .merge(rice::router())
        .merge(roadmap::router())
        .merge(okr::router())
        .merge(links::router())
        .merge(upload::router())
        .merge(report::router())
        .merge(ai::router())
}

/// The complete application: routes, CORS, request tracing, and the body limit.
pub fn app(state: AppState) -> Router {
    let body_limit = state.server.max_upload_bytes + MULTIPART_OVERHEAD;
    router()
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(from_fn_with_state(state.clone(), cors))
        .layer(from_fn_with_state(state.clone(), request_tracing))
        .with_state(state)
}
