//! Classifier Bundle - scaler + model pair
//!
//! Loaded once at startup and shared behind an `Arc`. Nothing in here
//! mutates after construction, so concurrent classification needs no
//! locking.
//!
//! ## File format
//! ```json
//! {
//!   "schema": { "version": 1, "hash": 123, "feature_count": 15, "feature_names": [...] },
//!   "scaler": { "kind": "standard", "mean": [...], "scale": [...] },
//!   "model":  { "kind": "logistic_regression", "coef": [...], "intercept": 0.0 }
//! }
//! ```
//! `schema` is optional; without it drift is only caught by the scaler.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::linear::{LinearSvc, LogisticRegression, Model};
use super::scaler::{MinMaxScaler, Scaler, StandardScaler};
use crate::logic::features::{LayoutInfo, LayoutMismatchError, FEATURE_COUNT};

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum BundleError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid bundle JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("checksum mismatch: expected {expected}, got {actual}")]
    Checksum { expected: String, actual: String },

    #[error(transparent)]
    Schema(#[from] LayoutMismatchError),

    #[error("bundle declares no feature schema")]
    MissingSchema,

    #[error("invalid bundle shape: {0}")]
    Shape(String),

    #[error("no bundle found (tried: {})", .0.join(", "))]
    NotFound(Vec<String>),
}

// ============================================================================
// FILE SPEC
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalerSpec {
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    MinMax { min: Vec<f64>, max: Vec<f64> },
}

impl ScalerSpec {
    fn dimension(&self) -> usize {
        match self {
            ScalerSpec::Standard { mean, .. } => mean.len(),
            ScalerSpec::MinMax { min, .. } => min.len(),
        }
    }

    fn build(self) -> Result<Arc<dyn Scaler>, BundleError> {
        Ok(match self {
            ScalerSpec::Standard { mean, scale } => Arc::new(StandardScaler::new(mean, scale)?),
            ScalerSpec::MinMax { min, max } => Arc::new(MinMaxScaler::new(min, max)?),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelSpec {
    LogisticRegression { coef: Vec<f64>, intercept: f64 },
    LinearSvc { coef: Vec<f64>, intercept: f64 },
}

impl ModelSpec {
    fn dimension(&self) -> usize {
        match self {
            ModelSpec::LogisticRegression { coef, .. } | ModelSpec::LinearSvc { coef, .. } => coef.len(),
        }
    }

    fn build(self) -> Result<Arc<dyn Model>, BundleError> {
        Ok(match self {
            ModelSpec::LogisticRegression { coef, intercept } => Arc::new(LogisticRegression::new(coef, intercept)?),
            ModelSpec::LinearSvc { coef, intercept } => Arc::new(LinearSvc::new(coef, intercept)?),
        })
    }
}

/// On-disk bundle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleFile {
    #[serde(default)]
    pub schema: Option<LayoutInfo>,
    pub scaler: ScalerSpec,
    pub model: ModelSpec,
}

// ============================================================================
// LOAD OPTIONS / METADATA
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Hex SHA-256 the bundle file must hash to
    pub expected_sha256: Option<String>,
    /// Refuse bundles whose schema differs from the extractor's
    pub require_schema_match: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleMetadata {
    pub source: String,
    pub sha256: Option<String>,
    pub loaded_at: DateTime<Utc>,
}

// ============================================================================
// BUNDLE
// ============================================================================

#[derive(Debug, Clone)]
pub struct ClassifierBundle {
    scaler: Arc<dyn Scaler>,
    model: Arc<dyn Model>,
    supports_probability: bool,
    schema: Option<LayoutInfo>,
    metadata: BundleMetadata,
}

impl ClassifierBundle {
    /// Pair an already-fitted scaler and model
    pub fn new(scaler: Arc<dyn Scaler>, model: Arc<dyn Model>) -> Self {
        let supports_probability = model.supports_probability();
        Self {
            scaler,
            model,
            supports_probability,
            schema: None,
            metadata: BundleMetadata {
                source: "<memory>".to_string(),
                sha256: None,
                loaded_at: Utc::now(),
            },
        }
    }

    /// Build from a parsed file, checking the schema against the extractor
    pub fn from_file(file: BundleFile, options: &LoadOptions) -> Result<Self, BundleError> {
        match &file.schema {
            Some(schema) => {
                if let Err(e) = schema.check() {
                    if options.require_schema_match {
                        return Err(e.into());
                    }
                    log::warn!("Bundle was trained on a different feature layout: {}", e);
                }
            }
            None if options.require_schema_match => return Err(BundleError::MissingSchema),
            None => log::debug!("Bundle declares no feature schema"),
        }

        let scaler_dim = file.scaler.dimension();
        let model_dim = file.model.dimension();
        if scaler_dim != model_dim {
            return Err(BundleError::Shape(format!(
                "scaler expects {} features but model expects {}",
                scaler_dim, model_dim
            )));
        }
        if scaler_dim != FEATURE_COUNT {
            log::warn!(
                "Bundle expects {} features, extractor produces {} - vectors will be reconciled",
                scaler_dim, FEATURE_COUNT
            );
        }

        let mut bundle = Self::new(file.scaler.build()?, file.model.build()?);
        bundle.schema = file.schema;
        Ok(bundle)
    }

    pub fn from_json_str(json: &str, options: &LoadOptions) -> Result<Self, BundleError> {
        let file: BundleFile = serde_json::from_str(json)?;
        Self::from_file(file, options)
    }

    /// Load a bundle file, verifying its checksum when one is configured
    pub fn load(path: &Path, options: &LoadOptions) -> Result<Self, BundleError> {
        log::info!("Loading classifier bundle from: {}", path.display());

        let bytes = std::fs::read(path).map_err(|source| BundleError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let digest = hex::encode(Sha256::digest(&bytes));
        if let Some(expected) = &options.expected_sha256 {
            if !expected.trim().eq_ignore_ascii_case(&digest) {
                return Err(BundleError::Checksum {
                    expected: expected.trim().to_lowercase(),
                    actual: digest,
                });
            }
        }

        let file: BundleFile = serde_json::from_slice(&bytes)?;
        let mut bundle = Self::from_file(file, options)?;
        bundle.metadata = BundleMetadata {
            source: path.display().to_string(),
            sha256: Some(digest),
            loaded_at: Utc::now(),
        };

        log::info!(
            "Classifier bundle loaded: {} + {} (probabilities: {})",
            bundle.scaler.name(),
            bundle.model.name(),
            bundle.supports_probability
        );
        Ok(bundle)
    }

    /// Try each candidate path in order; the first existing file wins
    pub fn load_first(candidates: &[PathBuf], options: &LoadOptions) -> Result<Self, BundleError> {
        for path in candidates {
            if path.exists() {
                return Self::load(path, options);
            }
            log::debug!("No bundle at {}", path.display());
        }
        Err(BundleError::NotFound(
            candidates.iter().map(|p| p.display().to_string()).collect(),
        ))
    }

    pub fn scaler(&self) -> &dyn Scaler {
        self.scaler.as_ref()
    }

    pub fn model(&self) -> &dyn Model {
        self.model.as_ref()
    }

    /// Resolved once at construction
    pub fn supports_probability(&self) -> bool {
        self.supports_probability
    }

    pub fn schema(&self) -> Option<&LayoutInfo> {
        self.schema.as_ref()
    }

    /// `None` when the bundle declares no schema
    pub fn schema_compatible(&self) -> Option<bool> {
        self.schema.as_ref().map(LayoutInfo::is_current)
    }

    pub fn metadata(&self) -> &BundleMetadata {
        &self.metadata
    }
}
