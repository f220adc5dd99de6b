//! Detector configuration
//!
//! Built once at startup and shared read-only. The marker lists are
//! injected into the extractor and the decision policy; nothing mutates
//! them afterwards.

use serde::{Deserialize, Serialize};

use crate::constants::{
    env_list_or, env_or, DEFAULT_CONFIDENCE, DEFAULT_CONFIDENCE_THRESHOLD,
    DEFAULT_OVERRIDE_CONFIDENCE, KNOWN_LEGITIMATE_DOMAINS, SHORTENER_MARKERS, SUSPICIOUS_TLDS,
};

/// Substring lists used by the lexical extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexicalMarkers {
    pub shorteners: Vec<String>,
    pub suspicious_tlds: Vec<String>,
}

impl Default for LexicalMarkers {
    fn default() -> Self {
        Self {
            shorteners: SHORTENER_MARKERS.iter().map(|s| s.to_string()).collect(),
            suspicious_tlds: SUSPICIOUS_TLDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Thresholds and allowlist for the decision policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Predictions below this confidence become "Phishing"
    pub confidence_threshold: f64,
    /// Minimum confidence after a known-domain override
    pub override_confidence: f64,
    /// Exact domains; subdomains match too
    pub known_legitimate_domains: Vec<String>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            override_confidence: DEFAULT_OVERRIDE_CONFIDENCE,
            known_legitimate_domains: KNOWN_LEGITIMATE_DOMAINS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Complete detector configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    pub markers: LexicalMarkers,
    pub policy: PolicyConfig,
    /// Confidence used when the model has no probability estimates
    #[serde(default = "default_confidence")]
    pub default_confidence: f64,
}

fn default_confidence() -> f64 {
    DEFAULT_CONFIDENCE
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            markers: LexicalMarkers::default(),
            policy: PolicyConfig::default(),
            default_confidence: DEFAULT_CONFIDENCE,
        }
    }
}

impl DetectorConfig {
    /// Load configuration from `PHISHGUARD_*` environment variables
    pub fn from_env() -> Self {
        Self {
            markers: LexicalMarkers {
                shorteners: env_list_or("PHISHGUARD_SHORTENERS", SHORTENER_MARKERS),
                suspicious_tlds: env_list_or("PHISHGUARD_SUSPICIOUS_TLDS", SUSPICIOUS_TLDS),
            },
            policy: PolicyConfig {
                confidence_threshold: env_or(
                    "PHISHGUARD_CONFIDENCE_THRESHOLD",
                    DEFAULT_CONFIDENCE_THRESHOLD,
                ),
                override_confidence: env_or(
                    "PHISHGUARD_OVERRIDE_CONFIDENCE",
                    DEFAULT_OVERRIDE_CONFIDENCE,
                ),
                known_legitimate_domains: env_list_or(
                    "PHISHGUARD_KNOWN_DOMAINS",
                    KNOWN_LEGITIMATE_DOMAINS,
                ),
            },
            default_confidence: env_or("PHISHGUARD_DEFAULT_CONFIDENCE", DEFAULT_CONFIDENCE),
        }
    }

    /// Clamp all confidence values into [0, 1]
    pub fn sanitized(mut self) -> Self {
        self.policy.confidence_threshold = clamp_unit(self.policy.confidence_threshold);
        self.policy.override_confidence = clamp_unit(self.policy.override_confidence);
        self.default_confidence = clamp_unit(self.default_confidence);
        self
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = DetectorConfig::default();
        assert_eq!(config.policy.confidence_threshold, 0.7);
        assert_eq!(config.policy.override_confidence, 0.95);
        assert_eq!(config.default_confidence, 0.95);
        assert!(config.policy.known_legitimate_domains.iter().any(|d| d == "nike.com"));
        assert_eq!(config.markers.shorteners.len(), 4);
        assert_eq!(config.markers.suspicious_tlds.len(), 5);
    }

    #[test]
    fn test_sanitized_clamps() {
        let mut config = DetectorConfig::default();
        config.policy.confidence_threshold = 1.4;
        config.default_confidence = f64::NAN;
        let config = config.sanitized();
        assert_eq!(config.policy.confidence_threshold, 1.0);
        assert_eq!(config.default_confidence, 0.0);
    }

    #[test]
    fn test_deserialize_without_default_confidence() {
        let json = serde_json::json!({
            "markers": { "shorteners": ["bit.ly"], "suspicious_tlds": [".xyz"] },
            "policy": {
                "confidence_threshold": 0.6,
                "override_confidence": 0.9,
                "known_legitimate_domains": ["example.com"]
            }
        });
        let config: DetectorConfig = serde_json::from_value(json).unwrap();
        assert_eq!(config.default_confidence, 0.95);
        assert_eq!(config.policy.confidence_threshold, 0.6);
    }
}
