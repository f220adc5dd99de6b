//! Known-domain allowlist
//!
//! Exact matches plus any subdomain (dot-suffix). Built once from config,
//! read-only afterwards.

use serde::{Deserialize, Serialize};

use crate::constants::KNOWN_LEGITIMATE_DOMAINS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownDomains {
    domains: Vec<String>,
}

impl KnownDomains {
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            domains: domains.into_iter().map(Into::into).collect(),
        }
    }

    /// `domain` equals an entry or ends with `.` + entry
    pub fn contains(&self, domain: &str) -> bool {
        if domain.is_empty() {
            return false;
        }
        self.domains.iter().any(|known| {
            domain == known
                || domain
                    .strip_suffix(known.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

impl Default for KnownDomains {
    fn default() -> Self {
        Self::new(KNOWN_LEGITIMATE_DOMAINS.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_and_subdomain_match() {
        let known = KnownDomains::default();
        assert!(known.contains("github.com"));
        assert!(known.contains("gist.github.com"));
        assert!(known.contains("a.b.google.com"));
    }

    #[test]
    fn test_lookalikes_do_not_match() {
        let known = KnownDomains::default();
        assert!(!known.contains("evilgithub.com"));
        assert!(!known.contains("github.com.evil.xyz"));
        assert!(!known.contains("github.co"));
        assert!(!known.contains(""));
    }

    #[test]
    fn test_match_is_case_and_port_sensitive() {
        let known = KnownDomains::default();
        assert!(!known.contains("GitHub.com"));
        assert!(!known.contains("github.com:443"));
    }

    #[test]
    fn test_custom_list() {
        let known = KnownDomains::new(["example.org"]);
        assert_eq!(known.len(), 1);
        assert!(known.contains("docs.example.org"));
        assert!(!known.contains("github.com"));
    }
}
