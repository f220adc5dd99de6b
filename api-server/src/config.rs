//! Configuration module

use std::env;
use std::path::PathBuf;

use phishguard_core::{DetectorConfig, LoadOptions};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Bundle locations, tried in order
    pub model_paths: Vec<PathBuf>,

    /// Expected hex SHA-256 of the bundle file
    pub model_sha256: Option<String>,

    /// Refuse bundles trained against another feature layout
    pub require_schema_match: bool,

    /// Environment (development, production)
    pub environment: String,

    /// Thresholds and marker lists for the detector
    pub detector: DetectorConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),

            model_paths: env::var("MODEL_PATH")
                .ok()
                .map(|raw| parse_paths(&raw))
                .filter(|paths| !paths.is_empty())
                .unwrap_or_else(default_model_paths),

            model_sha256: env::var("MODEL_SHA256")
                .ok()
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty()),

            require_schema_match: env::var("REQUIRE_SCHEMA_MATCH")
                .ok()
                .map(|v| parse_flag(&v))
                .unwrap_or(false),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),

            detector: DetectorConfig::from_env(),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            expected_sha256: self.model_sha256.clone(),
            require_schema_match: self.require_schema_match,
        }
    }
}

/// `LOG_FORMAT=json` switches the subscriber to JSON lines
pub fn json_logs() -> bool {
    env::var("LOG_FORMAT")
        .map(|v| is_json_format(&v))
        .unwrap_or(false)
}

fn is_json_format(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("json")
}

fn default_model_paths() -> Vec<PathBuf> {
    vec![PathBuf::from("model_bundle.json"), PathBuf::from("../model_bundle.json")]
}

fn parse_paths(raw: &str) -> Vec<PathBuf> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
