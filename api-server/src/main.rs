//! PhishGuard API Server
//!
//! Thin HTTP wrapper around the detection core.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       PHISHGUARD API                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐    ┌────────────────────────────────────┐   │
//! │  │  HTTP     │───▶│  PhishingDetector (Arc, immutable) │   │
//! │  │  (Axum)   │    │  features → bundle → policy        │   │
//! │  └───────────┘    └────────────────────────────────────┘   │
//! │                                   ▲                         │
//! │                           model_bundle.json                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod handlers;
mod error;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    http::{header, Method},
    routing::{get, post},
};
use phishguard_core::{ClassifierBundle, PhishingDetector};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    let json_logs = config::json_logs();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "phishguard_api=debug,phishguard_core=info,tower_http=debug".into()))
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(|| tracing_subscriber::fmt::layer()))
        .init();

    // Load configuration
    let config = config::Config::from_env();

    tracing::info!("PhishGuard API starting ({})...", config.environment);

    let detector = build_detector(&config);

    // Build application state
    let state = AppState {
        detector: Arc::new(detector),
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

/// Load the bundle; the service still starts without one and answers 503
fn build_detector(config: &config::Config) -> PhishingDetector {
    match ClassifierBundle::load_first(&config.model_paths, &config.load_options()) {
        Ok(bundle) => {
            tracing::info!(
                "Model and scaler loaded successfully from {}",
                bundle.metadata().source
            );
            if bundle.schema_compatible() == Some(false) {
                tracing::warn!("Bundle was trained against a different feature layout");
            }
            PhishingDetector::new(config.detector.clone(), Some(Arc::new(bundle)))
        }
        Err(e) => {
            tracing::error!("Error loading model or scaler: {}", e);
            if config.is_production() {
                tracing::warn!("Running in production without a model, /predict will return 503");
            }
            PhishingDetector::without_model(config.detector.clone())
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub detector: Arc<PhishingDetector>,
    pub config: Arc<config::Config>,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::status::index))
        .route("/health", get(handlers::health::check))
        .route("/predict", post(handlers::predict::predict))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE])
        )
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use phishguard_core::{DetectorConfig, LogisticRegression, StandardScaler, FEATURE_COUNT};

    pub fn config() -> config::Config {
        config::Config {
            port: 0,
            model_paths: vec![],
            model_sha256: None,
            require_schema_match: false,
            environment: "test".to_string(),
            detector: DetectorConfig::default(),
        }
    }

    /// Router over a zero-weight logistic model; `intercept` sets the confidence
    pub fn router_with_intercept(intercept: f64) -> Router {
        let bundle = ClassifierBundle::new(
            Arc::new(StandardScaler::new(vec![0.0; FEATURE_COUNT], vec![1.0; FEATURE_COUNT]).unwrap()),
            Arc::new(LogisticRegression::new(vec![0.0; FEATURE_COUNT], intercept).unwrap()),
        );
        router(PhishingDetector::new(DetectorConfig::default(), Some(Arc::new(bundle))))
    }

    pub fn router_without_model() -> Router {
        router(PhishingDetector::without_model(DetectorConfig::default()))
    }

    fn router(detector: PhishingDetector) -> Router {
        create_router(AppState {
            detector: Arc::new(detector),
            config: Arc::new(config()),
        })
    }

    pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }
}
