#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::config::AppConfig;
    use crate::routes;
    use crate::state::AppState;
    use crate::tests::RecordingHost;

    fn setup_test_app() -> (Router, AppState) {
        let state = AppState::with_host(AppConfig::default(), Arc::new(RecordingHost::default()));
        (routes::router(state.clone()), state)
    }

    async fn get_body(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap()).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_home_banner() {
        let (app, _) = setup_test_app();
        let (status, body) = get_body(app, "/").await;
        assert_eq!(status, StatusCode::OK);
        let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(v["status"], "Fileglass listing service online");
    }

    #[tokio::test]
    async fn test_healthz_endpoint() {
        let (app, _) = setup_test_app();
        let (status, body) = get_body(app, "/healthz").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(&body[..], b"ok");
    }

    #[tokio::test]
    async fn test_version_endpoint() {
        let (app, _) = setup_test_app();
        let (status, body) = get_body(app, "/version").await;
        assert_eq!(status, StatusCode::OK);
        let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(v["name"], "fileglass");
        assert!(!v["version"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let (app, state) = setup_test_app();
        state.metrics.record_page(7, false);
        state.metrics.record_page(3, true);

        let (status, body) = get_body(app, "/metrics").await;
        assert_eq!(status, StatusCode::OK);
        let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(v["pages_served"], 2);
        assert_eq!(v["records_served"], 10);
        assert_eq!(v["folder_scans"], 1);
        assert_eq!(v["scan_cache_hits"], 1);
        assert_eq!(v["files_trashed"], 0);
    }

    #[tokio::test]
    async fn test_metrics_prometheus_endpoint() {
        let (app, state) = setup_test_app();
        state.metrics.inc_files_opened();

        let (status, body) = get_body(app, "/metrics/prometheus").await;
        assert_eq!(status, StatusCode::OK);
        let body_str = String::from_utf8(body).unwrap();
        assert!(body_str.contains("fileglass_pages_served 0"));
        assert!(body_str.contains("fileglass_files_opened 1"));
        assert!(body_str.contains("# TYPE fileglass_uptime_seconds gauge"));
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let (app, _) = setup_test_app();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/healthz")
                    .header("origin", "http://localhost:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers().get("access-control-allow-origin").unwrap(), "*");
    }
}
