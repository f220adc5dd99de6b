//! Verdict Types
//!
//! Data only - no decision logic.

use serde::{Deserialize, Serialize};

use crate::logic::model::RawLabel;

/// Final classification label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerdictLabel {
    Legitimate,
    Phishing,
}

impl VerdictLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictLabel::Legitimate => "Legitimate",
            VerdictLabel::Phishing => "Phishing",
        }
    }

    pub fn is_phishing(&self) -> bool {
        matches!(self, VerdictLabel::Phishing)
    }
}

impl From<RawLabel> for VerdictLabel {
    fn from(raw: RawLabel) -> Self {
        match raw {
            RawLabel::Legitimate => VerdictLabel::Legitimate,
            RawLabel::Phishing => VerdictLabel::Phishing,
        }
    }
}

impl std::fmt::Display for VerdictLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of the decision policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub label: VerdictLabel,
    /// Within [0, 1]
    pub confidence: f64,
    /// Input URL, unchanged
    pub url: String,
    /// Which policy steps fired
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reasons: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_mapping() {
        assert_eq!(VerdictLabel::from(RawLabel::Legitimate), VerdictLabel::Legitimate);
        assert_eq!(VerdictLabel::from(RawLabel::Phishing), VerdictLabel::Phishing);
        assert_eq!(VerdictLabel::Phishing.to_string(), "Phishing");
        assert!(VerdictLabel::Phishing.is_phishing());
    }

    #[test]
    fn test_verdict_serialization() {
        let verdict = Verdict {
            label: VerdictLabel::Legitimate,
            confidence: 0.95,
            url: "https://github.com".to_string(),
            reasons: vec![],
        };
        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(json["label"], "Legitimate");
        assert_eq!(json["confidence"], 0.95);
        assert!(json.get("reasons").is_none());
    }
}
