//! Central Configuration Constants
//!
//! Single source of truth for all detector defaults.
//! `DetectorConfig::default()` is built from these values.

/// Below this confidence a "Legitimate" prediction is not trusted
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.7;

/// Confidence reported when the model cannot estimate probabilities
pub const DEFAULT_CONFIDENCE: f64 = 0.95;

/// Confidence floor applied by the known-domain override
pub const DEFAULT_OVERRIDE_CONFIDENCE: f64 = 0.95;

/// Widest vector the reconciler will pad to; wider claims are rejected
pub const MAX_RECONCILE_WIDTH: usize = 4096;

/// Domains (and their subdomains) never reported as phishing
pub const KNOWN_LEGITIMATE_DOMAINS: &[&str] = &[
    "google.com",
    "scholar.google.com",
    "nike.com",
    "www.nike.com",
    "microsoft.com",
    "github.com",
    "amazon.com",
    "apple.com",
    "facebook.com",
    "twitter.com",
    "linkedin.com",
    "youtube.com",
];

/// Substrings identifying URL shortening services
pub const SHORTENER_MARKERS: &[&str] = &["bit.ly", "goo.gl", "t.co", "tinyurl"];

/// Top-level-domain substrings commonly abused by phishing kits
pub const SUSPICIOUS_TLDS: &[&str] = &[".xyz", ".top", ".club", ".online", ".site"];

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "PhishGuard";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Parse an env var, falling back to `default` when unset or malformed
pub fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

/// Comma-separated env list, falling back to `default` when unset or empty
pub fn env_list_or(key: &str, default: &[&str]) -> Vec<String> {
    let parsed: Vec<String> = std::env::var(key)
        .map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    if parsed.is_empty() {
        default.iter().map(|s| s.to_string()).collect()
    } else {
        parsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_fallback() {
        assert_eq!(env_or("PHISHGUARD_TEST_UNSET_NUMBER", 0.7), 0.7);
    }

    #[test]
    fn test_env_list_parsing() {
        std::env::set_var("PHISHGUARD_TEST_LIST", " a.com, ,b.org ");
        assert_eq!(env_list_or("PHISHGUARD_TEST_LIST", &["x"]), vec!["a.com", "b.org"]);
        std::env::remove_var("PHISHGUARD_TEST_LIST");
        assert_eq!(env_list_or("PHISHGUARD_TEST_LIST", &["x"]), vec!["x"]);
    }
}
