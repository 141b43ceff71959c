//! HTTP route handlers of the listing service.
//!
//! - `files`: listing pages, content streaming, open and delete
//! - `health`: banner, health, metrics and version endpoints

pub mod files;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Builds the full router. The browsing client may be served from any origin,
/// so CORS is permissive.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::home))
        .route("/healthz", get(health::healthz))
        .route("/metrics", get(health::metrics))
        .route("/metrics/prometheus", get(health::metrics_prometheus))
        .route("/version", get(health::version))
        .route("/scan", get(files::scan))
        .route("/read", get(files::read_file))
        .route("/open", post(files::open_file))
        .route("/delete", post(files::delete_file))
        .with_state(state)
        // Action bodies only carry a path
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
