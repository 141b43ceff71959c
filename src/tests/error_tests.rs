#[cfg(test)]
mod tests {
    use crate::error::{validation, AppError, ClientError};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use http_body_util::BodyExt;
    use std::io;

    async fn body_json(error: AppError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[test]
    fn test_app_error_display() {
        let error = AppError::BadRequest("Invalid input".to_string());
        assert_eq!(format!("{}", error), "Bad request: Invalid input");

        let error = AppError::NotFound("File not found".to_string());
        assert_eq!(format!("{}", error), "Not found: File not found");

        let error = AppError::Forbidden("outside".to_string());
        assert_eq!(format!("{}", error), "Forbidden: outside");

        let error = AppError::ValidationError { field: "limit".to_string(), message: "too big".to_string() };
        assert_eq!(format!("{}", error), "Validation error on field 'limit': too big");
    }

    #[test]
    fn test_app_error_into_response() {
        let cases = [
            (AppError::BadRequest("x".to_string()), StatusCode::BAD_REQUEST),
            (AppError::NotFound("x".to_string()), StatusCode::NOT_FOUND),
            (AppError::Forbidden("x".to_string()), StatusCode::FORBIDDEN),
            (AppError::IoError("x".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::Internal(anyhow::anyhow!("boom")), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let (status, json) = body_json(AppError::NotFound("File not found".to_string())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "NOT_FOUND");
        assert_eq!(json["error"]["message"], "File not found");
        assert_eq!(json["status"], 404);
        assert!(json["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let (_, json) = body_json(AppError::Internal(anyhow::anyhow!("secret db path"))).await;
        assert_eq!(json["error"]["message"], "An internal server error occurred");
        assert!(json["error"]["details"]["error_id"].is_string());
        assert!(!json.to_string().contains("secret db path"));
    }

    #[test]
    fn test_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let app_error: AppError = io_error.into();
        match app_error {
            AppError::IoError(msg) => assert!(msg.contains("denied")),
            other => panic!("Expected IoError, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_path() {
        assert!(validation::validate_path("/home/u/Downloads/a.txt").is_ok());
        assert!(validation::validate_path("").is_err());
        assert!(validation::validate_path("   ").is_err());
        assert!(validation::validate_path("a\0b").is_err());
    }

    #[test]
    fn test_validate_page_limit() {
        assert!(validation::validate_page_limit(1, 500).is_ok());
        assert!(validation::validate_page_limit(500, 500).is_ok());
        assert!(validation::validate_page_limit(0, 500).is_err());
        match validation::validate_page_limit(501, 500) {
            Err(AppError::ValidationError { field, message }) => {
                assert_eq!(field, "limit");
                assert!(message.contains("between 1 and 500"));
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_client_error_display() {
        assert_eq!(ClientError::NetworkFailure("refused".to_string()).to_string(), "network failure: refused");
        assert_eq!(
            ClientError::ServiceError { status: 404, message: "File not found".to_string() }.to_string(),
            "service error (404): File not found"
        );
        assert!(ClientError::DecodeFailure("eof".to_string()).to_string().starts_with("unexpected response body"));
    }

    #[test]
    fn test_client_error_from_json() {
        let err = serde_json::from_str::<Vec<u32>>("{").unwrap_err();
        assert!(matches!(ClientError::from(err), ClientError::DecodeFailure(_)));
    }
}
