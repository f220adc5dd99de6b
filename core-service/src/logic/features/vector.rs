//! Feature Vector - Core data structure for classifier input
//!
//! Values are stored in `FEATURE_LAYOUT` order and stamped with the layout
//! version + hash, so a logged vector can be matched to the schema it used.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use super::layout::{feature_index, layout_hash, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};

// ============================================================================
// VERSIONED FEATURE VECTOR
// ============================================================================

/// Versioned Feature Vector with layout metadata
///
/// Always exactly `FEATURE_COUNT` values; use the reconciler when a
/// classifier needs a different width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout
    pub layout_hash: u32,
    /// Feature values in order defined by FEATURE_LAYOUT
    pub values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    /// Create a new zeroed feature vector with current version
    pub fn new() -> Self {
        Self::from_values([0.0; FEATURE_COUNT])
    }

    /// Create from raw values with current version
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values,
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All components zero (the extractor's fail-safe output)
    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|v| *v == 0.0)
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        feature_index(name).and_then(|i| self.get(i))
    }

    /// Set feature by name; false if the name is not in the layout
    pub fn set_by_name(&mut self, name: &str, value: f64) -> bool {
        match feature_index(name) {
            Some(index) => {
                self.values[index] = value;
                true
            }
            None => false,
        }
    }

    /// Index of the first NaN/infinite component, if any
    pub fn first_non_finite(&self) -> Option<usize> {
        self.values.iter().position(|v| !v.is_finite())
    }

    /// Convert to JSON-serializable format for logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "feature_version": self.version,
            "layout_hash": self.layout_hash,
            "values": self.values,
            "named_values": FEATURE_LAYOUT.iter()
                .zip(self.values.iter())
                .map(|(name, value)| (name.to_string(), *value))
                .collect::<BTreeMap<_, _>>(),
        })
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::new()
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self::from_values(values)
    }
}

// ============================================================================
// BUILDER PATTERN
// ============================================================================

/// Builder for creating FeatureVector with named setters
pub struct FeatureVectorBuilder {
    vector: FeatureVector,
}

impl FeatureVectorBuilder {
    pub fn new() -> Self {
        Self { vector: FeatureVector::new() }
    }

    pub fn url_length(self, value: usize) -> Self {
        self.set("url_length", value as f64)
    }

    pub fn num_dots(self, value: usize) -> Self {
        self.set("num_dots", value as f64)
    }

    pub fn contains_https(self, flag: bool) -> Self {
        self.flag("contains_https", flag)
    }

    pub fn num_special_chars(self, value: usize) -> Self {
        self.set("num_special_chars", value as f64)
    }

    pub fn num_digits(self, value: usize) -> Self {
        self.set("num_digits", value as f64)
    }

    pub fn has_ip_in_domain(self, flag: bool) -> Self {
        self.flag("has_ip_in_domain", flag)
    }

    pub fn domain_length(self, value: usize) -> Self {
        self.set("domain_length", value as f64)
    }

    pub fn num_subdomains(self, value: usize) -> Self {
        self.set("num_subdomains", value as f64)
    }

    pub fn has_shortening_service(self, flag: bool) -> Self {
        self.flag("has_shortening_service", flag)
    }

    pub fn obfuscation_ratio(self, value: f64) -> Self {
        self.set("obfuscation_ratio", value)
    }

    pub fn num_hyphens(self, value: usize) -> Self {
        self.set("num_hyphens", value as f64)
    }

    pub fn longest_word(self, value: usize) -> Self {
        self.set("longest_word", value as f64)
    }

    pub fn has_at_symbol(self, flag: bool) -> Self {
        self.flag("has_at_symbol", flag)
    }

    pub fn has_double_slash(self, flag: bool) -> Self {
        self.flag("has_double_slash", flag)
    }

    pub fn has_suspicious_tld(self, flag: bool) -> Self {
        self.flag("has_suspicious_tld", flag)
    }

    fn set(mut self, name: &str, value: f64) -> Self {
        self.vector.set_by_name(name, value);
        self
    }

    fn flag(self, name: &str, flag: bool) -> Self {
        self.set(name, if flag { 1.0 } else { 0.0 })
    }

    pub fn build(self) -> FeatureVector {
        self.vector
    }
}

impl Default for FeatureVectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
