//! Prediction handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{AppError, AppResult, AppState};

#[derive(Debug, Deserialize, Validate)]
pub struct PredictRequest {
    #[validate(
        required(message = "URL is required"),
        length(min = 1, message = "URL is required")
    )]
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    /// "Phishing" or "Legitimate"
    pub result: String,
    pub confidence: f64,
    pub url: String,
}

/// Classify one URL
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> AppResult<Json<PredictResponse>> {
    let Json(req) = payload.map_err(|e| AppError::ValidationError(e.body_text()))?;
    req.validate()?;
    let url = req.url.unwrap_or_default();

    // core log lines emitted inside this span carry the request id
    let span = tracing::info_span!("predict", request_id = %Uuid::new_v4());
    let _guard = span.enter();

    let verdict = state.detector.analyze(&url).map_err(|e| {
        if e.is_client_error() {
            tracing::warn!(kind = e.kind(), "Rejected request: {}", e);
        }
        AppError::from(e)
    })?;

    Ok(Json(PredictResponse {
        result: verdict.label.to_string(),
        confidence: verdict.confidence,
        url: verdict.url,
    }))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        Router,
    };
    use tower::ServiceExt;

    use crate::test_support::{body_json, router_with_intercept, router_without_model};

    fn post_json(body: &str) -> Request<Body> {
        Request::post("/predict")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: Router, body: &str) -> (StatusCode, serde_json::Value) {
        let response = app.oneshot(post_json(body)).await.unwrap();
        let status = response.status();
        (status, body_json(response).await)
    }

    #[tokio::test]
    async fn test_confident_legitimate_prediction() {
        let (status, body) = send(router_with_intercept(3.0), r#"{"url":"https://example.org/welcome"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"], "Legitimate");
        assert_eq!(body["url"], "https://example.org/welcome");
        assert!(body["confidence"].as_f64().unwrap() > 0.9);
    }

    #[tokio::test]
    async fn test_low_confidence_is_phishing() {
        let (status, body) = send(router_with_intercept(0.2), r#"{"url":"https://example.org"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"], "Phishing");
        assert!(body["confidence"].as_f64().unwrap() < 0.7);
    }

    #[tokio::test]
    async fn test_known_domain_override() {
        let (status, body) = send(router_with_intercept(-3.0), r#"{"url":"https://www.nike.com/anything"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"], "Legitimate");
        assert!(body["confidence"].as_f64().unwrap() >= 0.95);
    }

    #[tokio::test]
    async fn test_missing_or_empty_url_is_bad_request() {
        for payload in [r#"{}"#, r#"{"url":null}"#, r#"{"url":""}"#] {
            let (status, body) = send(router_with_intercept(1.0), payload).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", payload);
            assert_eq!(body["status"], 400);
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let (status, _) = send(router_with_intercept(1.0), "not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_url_without_netloc_is_bad_request() {
        let (status, body) = send(router_with_intercept(1.0), r#"{"url":"bit.ly/abc"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid URL");
    }

    #[tokio::test]
    async fn test_model_unavailable_is_service_unavailable() {
        let (status, body) = send(router_without_model(), r#"{"url":"https://github.com"}"#).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "Model not available");
    }

    #[tokio::test]
    async fn test_invalid_url_takes_precedence_over_missing_model() {
        let (status, _) = send(router_without_model(), r#"{"url":"nope"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
