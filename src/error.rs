use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::error::Error;
use std::fmt;

/// Errors raised by the listing service handlers.
#[derive(Debug)]
pub enum AppError {
    /// For internal server errors that are not expected to be handled by the client.
    Internal(anyhow::Error),
    /// For client errors due to invalid requests.
    BadRequest(String),
    /// For when a requested file does not exist.
    NotFound(String),
    /// For paths outside the browsable folders.
    Forbidden(String),
    /// For when a specific field in a request fails validation.
    ValidationError {
        /// The name of the field that failed validation.
        field: String,
        /// A message describing the validation error.
        message: String,
    },
    /// For errors related to I/O operations, including host actions.
    IoError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Internal(e) => write!(f, "Internal error: {}", e),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::ValidationError { field, message } => {
                write!(f, "Validation error on field '{}': {}", field, message)
            }
            AppError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AppError::Internal(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, error_message, details) = match self {
            AppError::Internal(e) => {
                let error_id = uuid::Uuid::new_v4();
                tracing::error!(%error_id, "Internal error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                    Some(json!({ "error_id": error_id.to_string() })),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg, None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg, None),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg, None),
            AppError::ValidationError { field, message } => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                format!("Validation failed for field '{}'", field),
                Some(json!({ "field": field, "message": message })),
            ),
            AppError::IoError(msg) => {
                tracing::error!("I/O error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "IO_ERROR",
                    "An I/O error occurred".to_string(),
                    Some(json!({ "details": msg })),
                )
            }
        };

        let mut body = json!({
            "error": {
                "code": error_code,
                "message": error_message,
            },
            "status": status.as_u16(),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        });

        if let Some(details) = details {
            body["error"]["details"] = details;
        }

        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(format!("{}: {}", err.kind(), err))
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(anyhow::anyhow!("blocking task failed: {}", err))
    }
}

/// A type alias for `Result<T, AppError>`, used by every handler.
pub type AppResult<T> = Result<T, AppError>;

/// Failures of a call to the remote listing service, as seen by the browsing client.
///
/// None of these are fatal: the browser converts each one into a local outcome
/// (previous listing kept, "content unavailable", or a user-visible notice).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// The request could not complete (connection refused, reset, ...).
    #[error("network failure: {0}")]
    NetworkFailure(String),
    /// The service answered with a non-success status.
    #[error("service error ({status}): {message}")]
    ServiceError { status: u16, message: String },
    /// The response body was not in the expected shape.
    #[error("unexpected response body: {0}")]
    DecodeFailure(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::DecodeFailure(err.to_string())
        } else if let Some(status) = err.status() {
            ClientError::ServiceError { status: status.as_u16(), message: err.to_string() }
        } else {
            ClientError::NetworkFailure(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::DecodeFailure(err.to_string())
    }
}

/// Request validation helpers shared by the handlers.
pub mod validation {
    use super::*;

    /// Rejects empty paths and paths with NUL bytes.
    pub fn validate_path(path: &str) -> AppResult<()> {
        if path.trim().is_empty() {
            return Err(AppError::ValidationError {
                field: "path".to_string(),
                message: "Path cannot be empty".to_string(),
            });
        }

        if path.contains('\0') {
            return Err(AppError::ValidationError {
                field: "path".to_string(),
                message: "Path contains null characters".to_string(),
            });
        }

        Ok(())
    }

    /// Checks that a page size lies within `1..=max`.
    pub fn validate_page_limit(limit: usize, max: usize) -> AppResult<()> {
        if limit == 0 || limit > max {
            return Err(AppError::ValidationError {
                field: "limit".to_string(),
                message: format!("Value must be between 1 and {}, got {}", max, limit),
            });
        }
        Ok(())
    }
}
