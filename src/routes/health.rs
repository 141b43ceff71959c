use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

// Banner, kept for clients that check the service root
pub async fn home() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "Fileglass listing service online" }))
}

// Health check endpoint - lightweight
pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

// Metrics endpoint: returns JSON snapshot
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.metrics.get_snapshot())
}

// Prometheus-compatible text exposition format
pub async fn metrics_prometheus(State(state): State<AppState>) -> impl IntoResponse {
    let m = state.metrics.get_snapshot();
    let body = format!(
        "# HELP fileglass_pages_served Listing pages served\n# TYPE fileglass_pages_served counter\nfileglass_pages_served {}\n\
# HELP fileglass_records_served Records returned in listing pages\n# TYPE fileglass_records_served counter\nfileglass_records_served {}\n\
# HELP fileglass_folder_scans Folder scans performed\n# TYPE fileglass_folder_scans counter\nfileglass_folder_scans {}\n\
# HELP fileglass_scan_cache_hits Pages served from a cached scan\n# TYPE fileglass_scan_cache_hits counter\nfileglass_scan_cache_hits {}\n\
# HELP fileglass_files_read Files streamed by /read\n# TYPE fileglass_files_read counter\nfileglass_files_read {}\n\
# HELP fileglass_files_opened Files opened on the host\n# TYPE fileglass_files_opened counter\nfileglass_files_opened {}\n\
# HELP fileglass_files_trashed Files moved to trash\n# TYPE fileglass_files_trashed counter\nfileglass_files_trashed {}\n\
# HELP fileglass_action_failures Failed open/delete actions\n# TYPE fileglass_action_failures counter\nfileglass_action_failures {}\n\
# HELP fileglass_uptime_seconds Uptime seconds\n# TYPE fileglass_uptime_seconds gauge\nfileglass_uptime_seconds {}\n",
        m.pages_served,
        m.records_served,
        m.folder_scans,
        m.scan_cache_hits,
        m.files_read,
        m.files_opened,
        m.files_trashed,
        m.action_failures,
        m.uptime_seconds,
    );
    ([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body)
}

// Version/Build info endpoint (JSON)
pub async fn version() -> impl IntoResponse {
    let body = serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "package": {
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "authors": env!("CARGO_PKG_AUTHORS"),
            "license": env!("CARGO_PKG_LICENSE"),
        },
        "build": {
            "profile": if cfg!(debug_assertions) { "debug" } else { "release" },
            "os": std::env::consts::OS,
            "arch": std::env::consts::ARCH,
        }
    });
    (StatusCode::OK, Json(body))
}
