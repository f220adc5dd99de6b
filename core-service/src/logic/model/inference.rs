//! Classifier Adapter
//!
//! Scale → predict → confidence, over an immutable bundle.
//! On a width mismatch the vector is reconciled once and rescaled; there
//! is no second attempt.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use super::bundle::ClassifierBundle;
use super::reconcile::{reconcile, Reconciliation};
use super::types::{ConfidenceSource, EngineStatus, Prediction, RawLabel};
use crate::constants::{DEFAULT_CONFIDENCE, MAX_RECONCILE_WIDTH};
use crate::error::{DetectError, DetectResult};

// ============================================================================
// STATS
// ============================================================================

/// Lock-free counters; ordering between them is not meaningful
#[derive(Debug, Default)]
struct InferenceStats {
    latency_sum_us: AtomicU64,
    inference_count: AtomicU64,
    reconciliation_count: AtomicU64,
    failure_count: AtomicU64,
}

// ============================================================================
// ADAPTER
// ============================================================================

#[derive(Debug)]
pub struct ClassifierAdapter {
    bundle: Arc<ClassifierBundle>,
    default_confidence: f64,
    stats: InferenceStats,
}

impl ClassifierAdapter {
    pub fn new(bundle: Arc<ClassifierBundle>) -> Self {
        Self::with_default_confidence(bundle, DEFAULT_CONFIDENCE)
    }

    pub fn with_default_confidence(bundle: Arc<ClassifierBundle>, default_confidence: f64) -> Self {
        Self {
            bundle,
            default_confidence: default_confidence.clamp(0.0, 1.0),
            stats: InferenceStats::default(),
        }
    }

    pub fn bundle(&self) -> &ClassifierBundle {
        &self.bundle
    }

    /// Classify a (possibly drifted) feature vector
    pub fn classify(&self, features: &[f64]) -> DetectResult<Prediction> {
        let result = self.run(features);
        if result.is_err() {
            self.stats.failure_count.fetch_add(1, Ordering::Relaxed);
        }
        result
    }

    fn run(&self, features: &[f64]) -> DetectResult<Prediction> {
        let start = Instant::now();

        let (scaled, reconciliation) = self.scale(features)?;

        let raw = self
            .bundle
            .model()
            .predict(&scaled)
            .map_err(|e| DetectError::Classification(e.to_string()))?;
        let label = RawLabel::try_from(raw).map_err(|e| DetectError::Classification(e.to_string()))?;

        let (confidence, confidence_source) = self.confidence(&scaled, label);

        let inference_time_us = start.elapsed().as_micros() as u64;
        self.stats.latency_sum_us.fetch_add(inference_time_us, Ordering::Relaxed);
        self.stats.inference_count.fetch_add(1, Ordering::Relaxed);

        Ok(Prediction {
            label,
            confidence,
            confidence_source,
            reconciliation,
            inference_time_us,
        })
    }

    /// Scale, reconciling once if the scaler reports a width mismatch
    fn scale(&self, features: &[f64]) -> DetectResult<(Vec<f64>, Reconciliation)> {
        let scaler = self.bundle.scaler();

        let err = match scaler.transform(features) {
            Ok(scaled) => return Ok((scaled, Reconciliation::Unchanged)),
            Err(e) if e.is_dimension_mismatch() => e,
            Err(e) => return Err(DetectError::Classification(e.to_string())),
        };

        log::error!("Feature mismatch error: {}", err);
        let expected = err
            .expected_dimension()
            .ok_or_else(|| DetectError::FeatureMismatch(err.to_string()))?;
        if expected == 0 || expected > MAX_RECONCILE_WIDTH {
            return Err(DetectError::FeatureMismatch(format!(
                "scaler expects {} features, outside 1..={}",
                expected, MAX_RECONCILE_WIDTH
            )));
        }

        log::warn!("Adjusting features from {} to {}", features.len(), expected);
        let reconciled = reconcile(features, expected);
        self.stats.reconciliation_count.fetch_add(1, Ordering::Relaxed);

        match scaler.transform(&reconciled.values) {
            Ok(scaled) => Ok((scaled, reconciled.action)),
            Err(e) if e.is_dimension_mismatch() => Err(DetectError::FeatureMismatch(e.to_string())),
            Err(e) => Err(DetectError::Classification(e.to_string())),
        }
    }

    /// Probability of the predicted class, or the configured default
    fn confidence(&self, scaled: &[f64], label: RawLabel) -> (f64, ConfidenceSource) {
        if !self.bundle.supports_probability() {
            return (self.default_confidence, ConfidenceSource::Default);
        }

        match self.bundle.model().predict_proba(scaled) {
            Ok(proba) => match proba.get(label.as_index()) {
                Some(p) if p.is_finite() => (p.clamp(0.0, 1.0), ConfidenceSource::Probability),
                _ => {
                    log::warn!("Could not get prediction probability: malformed output {:?}", proba);
                    (self.default_confidence, ConfidenceSource::Default)
                }
            },
            Err(e) => {
                log::warn!("Could not get prediction probability: {}", e);
                (self.default_confidence, ConfidenceSource::Default)
            }
        }
    }

    pub fn status(&self) -> EngineStatus {
        let sum = self.stats.latency_sum_us.load(Ordering::Relaxed);
        let count = self.stats.inference_count.load(Ordering::Relaxed);
        let avg = if count > 0 { (sum as f64 / count as f64) / 1000.0 } else { 0.0 };

        EngineStatus {
            model_loaded: true,
            scaler_name: self.bundle.scaler().name().to_string(),
            model_name: self.bundle.model().name().to_string(),
            supports_probability: self.bundle.supports_probability(),
            schema_compatible: self.bundle.schema_compatible(),
            avg_latency_ms: avg,
            inference_count: count,
            reconciliation_count: self.stats.reconciliation_count.load(Ordering::Relaxed),
            failure_count: self.stats.failure_count.load(Ordering::Relaxed),
        }
    }
}
