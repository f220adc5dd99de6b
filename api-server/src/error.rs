//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use phishguard_core::DetectError;
use serde_json::json;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Request errors
    #[error("{0}")]
    ValidationError(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    // Engine errors
    #[error("Model not available: {0}")]
    ModelUnavailable(String),

    #[error("Feature mismatch: {0}")]
    FeatureMismatch(String),

    #[error("Classification failed: {0}")]
    ClassificationError(String),

    // Generic errors
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            AppError::ModelUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::FeatureMismatch(_)
            | AppError::ClassificationError(_)
            | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (error_message, message) = match &self {
            AppError::ValidationError(msg) => ("Invalid request", msg.clone()),
            AppError::InvalidUrl(_) => ("Invalid URL", self.to_string()),
            AppError::ModelUnavailable(msg) => {
                tracing::error!("Model unavailable: {}", msg);
                ("Model not available", "Model or scaler not loaded".to_string())
            }
            AppError::FeatureMismatch(msg) => {
                tracing::error!("Feature mismatch: {}", msg);
                ("Feature mismatch", msg.clone())
            }
            AppError::ClassificationError(msg) => {
                tracing::error!("Classification error: {}", msg);
                ("Classification failed", msg.clone())
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                ("Internal server error", "Internal server error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
            "message": message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<DetectError> for AppError {
    fn from(err: DetectError) -> Self {
        match err {
            DetectError::InvalidUrl(url) => AppError::InvalidUrl(url),
            DetectError::ModelUnavailable(msg) => AppError::ModelUnavailable(msg),
            DetectError::FeatureMismatch(msg) => AppError::FeatureMismatch(msg),
            DetectError::Classification(msg) => AppError::ClassificationError(msg),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_error_status_mapping() {
        let cases = [
            (DetectError::InvalidUrl("x".into()), StatusCode::BAD_REQUEST),
            (DetectError::ModelUnavailable("x".into()), StatusCode::SERVICE_UNAVAILABLE),
            (DetectError::FeatureMismatch("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (DetectError::Classification("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).status_code(), status);
        }
    }

    #[test]
    fn test_response_status() {
        let response = AppError::ValidationError("URL is required".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = AppError::ModelUnavailable("no bundle".into()).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
