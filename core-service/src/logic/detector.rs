//! Phishing Detector - end-to-end pipeline
//!
//! URL → features → (reconcile) → classifier → decision policy → verdict.
//! Holds only immutable state; share it behind an `Arc` across workers.

use std::sync::Arc;

use super::config::DetectorConfig;
use super::features::{split_netloc, FeatureVector, UrlFeatureExtractor};
use super::model::{ClassifierAdapter, ClassifierBundle, EngineStatus};
use super::verdict::{DecisionPolicy, Verdict};
use crate::error::{DetectError, DetectResult};

#[derive(Debug)]
pub struct PhishingDetector {
    extractor: UrlFeatureExtractor,
    classifier: Option<ClassifierAdapter>,
    policy: DecisionPolicy,
}

impl PhishingDetector {
    pub fn new(config: DetectorConfig, bundle: Option<Arc<ClassifierBundle>>) -> Self {
        let config = config.sanitized();
        Self {
            extractor: UrlFeatureExtractor::new(config.markers.clone()),
            classifier: bundle
                .map(|b| ClassifierAdapter::with_default_confidence(b, config.default_confidence)),
            policy: DecisionPolicy::new(&config.policy),
        }
    }

    /// Detector that answers every request with `ModelUnavailable`
    pub fn without_model(config: DetectorConfig) -> Self {
        Self::new(config, None)
    }

    pub fn is_model_loaded(&self) -> bool {
        self.classifier.is_some()
    }

    pub fn bundle(&self) -> Option<&ClassifierBundle> {
        self.classifier.as_ref().map(ClassifierAdapter::bundle)
    }

    pub fn status(&self) -> EngineStatus {
        self.classifier
            .as_ref()
            .map(ClassifierAdapter::status)
            .unwrap_or_else(EngineStatus::unloaded)
    }

    /// Feature vector for a URL (never fails)
    pub fn features(&self, url: &str) -> FeatureVector {
        self.extractor.extract(url, None)
    }

    /// Classify one URL
    pub fn analyze(&self, url: &str) -> DetectResult<Verdict> {
        log::debug!("Received URL for analysis: {}", url);

        let domain = split_netloc(url).map_err(|e| DetectError::InvalidUrl(e.to_string()))?;
        if domain.is_empty() {
            log::warn!("Invalid URL: {}", url);
            return Err(DetectError::InvalidUrl(url.to_string()));
        }

        let classifier = self.classifier.as_ref().ok_or_else(|| {
            log::error!("Model or scaler not loaded. Cannot make prediction.");
            DetectError::ModelUnavailable("classifier bundle is not loaded".to_string())
        })?;

        let features = self.extractor.extract(url, Some(&domain));
        let prediction = classifier.classify(features.as_slice())?;
        let verdict = self.policy.decide(prediction.label, prediction.confidence, url);

        log::info!(
            "Prediction for {}: {} with confidence {:.2}",
            url, verdict.label, verdict.confidence
        );
        Ok(verdict)
    }
}
