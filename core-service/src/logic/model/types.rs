//! Model output types
//!
//! Data only. The decision policy consumes `Prediction`.

use serde::{Deserialize, Serialize};

use super::linear::ModelError;
use super::reconcile::Reconciliation;

/// Raw classifier label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawLabel {
    /// 0
    Phishing,
    /// 1
    Legitimate,
}

impl RawLabel {
    pub fn as_index(&self) -> usize {
        match self {
            RawLabel::Phishing => 0,
            RawLabel::Legitimate => 1,
        }
    }
}

impl TryFrom<u8> for RawLabel {
    type Error = ModelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(RawLabel::Phishing),
            1 => Ok(RawLabel::Legitimate),
            other => Err(ModelError::UnknownLabel(other)),
        }
    }
}

/// Where the confidence value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceSource {
    /// Probability of the predicted class
    Probability,
    /// Model has no probability support, or the call failed
    Default,
}

/// Classifier Adapter output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: RawLabel,
    /// Always within [0, 1]
    pub confidence: f64,
    pub confidence_source: ConfidenceSource,
    pub reconciliation: Reconciliation,
    pub inference_time_us: u64,
}

/// Engine status for the service status endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub model_loaded: bool,
    pub scaler_name: String,
    pub model_name: String,
    pub supports_probability: bool,
    pub schema_compatible: Option<bool>,
    pub avg_latency_ms: f64,
    pub inference_count: u64,
    pub reconciliation_count: u64,
    pub failure_count: u64,
}

impl EngineStatus {
    /// Status reported when no bundle is loaded
    pub fn unloaded() -> Self {
        Self {
            model_loaded: false,
            scaler_name: "None".to_string(),
            model_name: "None".to_string(),
            supports_probability: false,
            schema_compatible: None,
            avg_latency_ms: 0.0,
            inference_count: 0,
            reconciliation_count: 0,
            failure_count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_label_conversion() {
        assert_eq!(RawLabel::try_from(0).unwrap(), RawLabel::Phishing);
        assert_eq!(RawLabel::try_from(1).unwrap(), RawLabel::Legitimate);
        assert_eq!(RawLabel::try_from(2), Err(ModelError::UnknownLabel(2)));
        assert_eq!(RawLabel::Legitimate.as_index(), 1);
    }
}
