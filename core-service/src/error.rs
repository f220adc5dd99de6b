//! Error handling
//!
//! Caller-facing failures of the detection pipeline. The feature
//! extractor has no variant here: it never fails outward.

use crate::logic::model::BundleError;

pub type DetectResult<T> = Result<T, DetectError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DetectError {
    /// URL has no network location; fix the input
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// No classifier bundle; needs operator intervention
    #[error("Model not available: {0}")]
    ModelUnavailable(String),

    /// Vector width could not be reconciled with the scaler
    #[error("Feature mismatch: {0}")]
    FeatureMismatch(String),

    /// Any other scaling or prediction failure
    #[error("Classification failed: {0}")]
    Classification(String),
}

impl DetectError {
    /// Caused by the request rather than the service
    pub fn is_client_error(&self) -> bool {
        matches!(self, DetectError::InvalidUrl(_))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            DetectError::InvalidUrl(_) => "invalid_url",
            DetectError::ModelUnavailable(_) => "model_unavailable",
            DetectError::FeatureMismatch(_) => "feature_mismatch",
            DetectError::Classification(_) => "classification_error",
        }
    }
}

impl From<BundleError> for DetectError {
    fn from(err: BundleError) -> Self {
        DetectError::ModelUnavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors() {
        assert!(DetectError::InvalidUrl("x".into()).is_client_error());
        assert!(!DetectError::ModelUnavailable("x".into()).is_client_error());
        assert!(!DetectError::FeatureMismatch("x".into()).is_client_error());
    }

    #[test]
    fn test_bundle_error_is_model_unavailable() {
        let err: DetectError = BundleError::NotFound(vec!["model_bundle.json".into()]).into();
        assert_eq!(err.kind(), "model_unavailable");
        assert!(err.to_string().contains("model_bundle.json"));
    }
}
