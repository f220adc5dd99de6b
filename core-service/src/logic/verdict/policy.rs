//! Decision Policy
//!
//! CHỈ chứa logic quyết định - pure function of its inputs plus the static
//! allowlist. Order matters:
//! 1. map raw label
//! 2. confidence gate (low confidence → Phishing, never the other way)
//! 3. known-domain override (Phishing → Legitimate, confidence floor)

use super::rules::KnownDomains;
use super::types::{Verdict, VerdictLabel};
use crate::logic::config::PolicyConfig;
use crate::logic::features::registrable_domain;
use crate::logic::model::RawLabel;

#[derive(Debug, Clone)]
pub struct DecisionPolicy {
    confidence_threshold: f64,
    override_confidence: f64,
    known_domains: KnownDomains,
}

impl DecisionPolicy {
    pub fn new(config: &PolicyConfig) -> Self {
        let known_domains = KnownDomains::new(config.known_legitimate_domains.iter().cloned());
        if known_domains.is_empty() {
            log::warn!("Known-domain allowlist is empty, override disabled");
        } else {
            log::debug!(
                "Decision policy: threshold {:.2}, {} known domains",
                config.confidence_threshold,
                known_domains.len()
            );
        }

        Self {
            confidence_threshold: config.confidence_threshold,
            override_confidence: config.override_confidence,
            known_domains,
        }
    }

    /// Produce the final verdict for one prediction
    pub fn decide(&self, raw: RawLabel, confidence: f64, url: &str) -> Verdict {
        let mut reasons = Vec::new();
        let mut confidence = if confidence.is_finite() { confidence.clamp(0.0, 1.0) } else { 0.0 };

        // 1. Provisional label
        let mut label = VerdictLabel::from(raw);

        // 2. Confidence gate
        if confidence < self.confidence_threshold {
            if label == VerdictLabel::Legitimate {
                log::info!(
                    "Confidence below {:.2}, flagging as Phishing: {}",
                    self.confidence_threshold, url
                );
            }
            label = VerdictLabel::Phishing;
            reasons.push(format!(
                "Confidence {:.2} < {:.2}, treated as Phishing",
                confidence, self.confidence_threshold
            ));
        }

        // 3. Known-domain override
        if label.is_phishing() && self.is_known_legitimate(url) {
            label = VerdictLabel::Legitimate;
            confidence = confidence.max(self.override_confidence);
            log::info!("Overriding prediction for known legitimate domain: {}", url);
            reasons.push("Known legitimate domain".to_string());
        }

        Verdict {
            label,
            confidence,
            url: url.to_string(),
            reasons,
        }
    }

    /// Netloc without "www." is on the allowlist
    pub fn is_known_legitimate(&self, url: &str) -> bool {
        match registrable_domain(url) {
            Ok(domain) => self.known_domains.contains(&domain),
            Err(e) => {
                log::debug!("No registrable domain for {}: {}", url, e);
                false
            }
        }
    }
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        Self::new(&PolicyConfig::default())
    }
}

// ============================================================================
// TESTS
// ============================================================================
