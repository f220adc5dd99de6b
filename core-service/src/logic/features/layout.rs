//! Feature Layout - the schema shared by the extractor and trained bundles
//!
//! **CRITICAL: bundles trained against one layout silently misread another**
//!
//! ## Rules (NEVER break these):
//! 1. Add, remove or reorder a feature → increment FEATURE_VERSION
//! 2. Retrain and re-export every bundle after a bump
//!
//! A bundle embeds the `LayoutInfo` it was trained against. `LayoutInfo::check`
//! compares it with the running extractor and names the columns that moved.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Current feature layout version
pub const FEATURE_VERSION: u8 = 1;

/// Feature names in exact order they appear in the vector
pub const FEATURE_LAYOUT: &[&str] = &[
    // === Whole URL (0-4) ===
    "url_length",             // 0: Character length of the URL
    "num_dots",               // 1: Count of '.' in the URL
    "contains_https",         // 2: "https" substring anywhere in the URL
    "num_special_chars",      // 3: Chars that are neither alphanumeric nor '.'
    "num_digits",             // 4: Digit characters in the URL

    // === Domain (5-7) ===
    "has_ip_in_domain",       // 5: Domain contains any digit
    "domain_length",          // 6: Character length of the domain
    "num_subdomains",         // 7: Count of '.' in the domain

    // === Markers / ratios (8-14) ===
    "has_shortening_service", // 8: URL contains a shortener marker
    "obfuscation_ratio",      // 9: num_special_chars / url_length
    "num_hyphens",            // 10: Count of '-' in the domain
    "longest_word",           // 11: Longest alphabetic run in first domain label
    "has_at_symbol",          // 12: '@' present in the URL
    "has_double_slash",       // 13: Disguised '//' redirection pattern
    "has_suspicious_tld",     // 14: Domain contains a suspicious TLD marker
];

/// Must match FEATURE_LAYOUT.len()
pub const FEATURE_COUNT: usize = 15;

/// CRC32 over version + NUL-separated names, computed once
static LAYOUT_HASH: Lazy<u32> = Lazy::new(|| {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(&[FEATURE_VERSION]);
    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]);
    }
    hasher.finalize()
});

pub fn layout_hash() -> u32 {
    *LAYOUT_HASH
}

/// Position of a named feature in the vector
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

// ============================================================================
// BUNDLE SCHEMA
// ============================================================================

/// Layout a bundle was trained against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

/// Bundle schema disagrees with the running extractor
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "Feature layout mismatch: extractor v{expected_version} ({expected_hash:08x}), \
     bundle v{actual_version} ({actual_hash:08x}); {} column(s) differ",
    .moved.len()
)]
pub struct LayoutMismatchError {
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
    /// Positions where the bundle names a different feature, as `index:bundle_name`
    pub moved: Vec<String>,
}

impl LayoutInfo {
    /// Layout the extractor produces
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Compare against the extractor's layout
    pub fn check(&self) -> Result<(), LayoutMismatchError> {
        if self.version == FEATURE_VERSION && self.hash == layout_hash() {
            return Ok(());
        }

        let width = self.feature_names.len().max(FEATURE_COUNT);
        let moved = (0..width)
            .filter_map(|i| {
                let ours = FEATURE_LAYOUT.get(i).copied();
                let theirs = self.feature_names.get(i).map(String::as_str);
                (ours != theirs).then(|| format!("{}:{}", i, theirs.unwrap_or("<none>")))
            })
            .collect();

        Err(LayoutMismatchError {
            expected_version: FEATURE_VERSION,
            expected_hash: layout_hash(),
            actual_version: self.version,
            actual_hash: self.hash,
            moved,
        })
    }

    pub fn is_current(&self) -> bool {
        self.check().is_ok()
    }
}

impl Default for LayoutInfo {
    fn default() -> Self {
        Self::current()
    }
}

// ============================================================================
// TESTS
// ============================================================================
