//! Feature Reconciler
//!
//! Adapts a feature vector to the width a scaler was fitted on, so that a
//! bundle trained on a drifted schema still produces a verdict:
//! - longer than expected → keep the first `expected` entries
//! - shorter than expected → right-pad with zeros
//!
//! Lossy by design. Only invoked after a detected mismatch.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Matches e.g. "X has 15 features, but StandardScaler is expecting 20 features as input"
static MISMATCH_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"X has (\d+) features?, but (\w+) is expecting (\d+) features?")
        .expect("mismatch pattern is a valid regex")
});

/// Dimensions recovered from a mismatch message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionReport {
    pub got: usize,
    pub expected: usize,
    pub scaler: String,
}

/// Recover (got, expected) from a scaler's mismatch message
pub fn parse_dimension_mismatch(message: &str) -> Option<DimensionReport> {
    let caps = MISMATCH_PATTERN.captures(message)?;
    Some(DimensionReport {
        got: caps[1].parse().ok()?,
        scaler: caps[2].to_string(),
        expected: caps[3].parse().ok()?,
    })
}

/// What reconciliation did to the vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Reconciliation {
    Unchanged,
    Truncated { from: usize, to: usize },
    Padded { from: usize, to: usize },
}

impl Reconciliation {
    pub fn plan(from: usize, to: usize) -> Self {
        match from.cmp(&to) {
            std::cmp::Ordering::Greater => Reconciliation::Truncated { from, to },
            std::cmp::Ordering::Less => Reconciliation::Padded { from, to },
            std::cmp::Ordering::Equal => Reconciliation::Unchanged,
        }
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, Reconciliation::Unchanged)
    }
}

/// Reconciled vector plus the action taken
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled {
    pub values: Vec<f64>,
    pub action: Reconciliation,
}

/// Truncate or zero-pad `features` to exactly `expected` entries
pub fn reconcile(features: &[f64], expected: usize) -> Reconciled {
    let action = Reconciliation::plan(features.len(), expected);

    let mut values: Vec<f64> = features.iter().copied().take(expected).collect();
    values.resize(expected, 0.0);

    Reconciled { values, action }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        let out = reconcile(&[1.0, 2.0, 3.0, 4.0], 2);
        assert_eq!(out.values, vec![1.0, 2.0]);
        assert_eq!(out.action, Reconciliation::Truncated { from: 4, to: 2 });
    }

    #[test]
    fn test_pad() {
        let out = reconcile(&[1.0, 2.0], 4);
        assert_eq!(out.values, vec![1.0, 2.0, 0.0, 0.0]);
        assert_eq!(out.action, Reconciliation::Padded { from: 2, to: 4 });
    }

    #[test]
    fn test_equal_is_noop() {
        let input = [0.5; 15];
        let out = reconcile(&input, 15);
        assert_eq!(out.values, input.to_vec());
        assert!(out.action.is_unchanged());
    }

    #[test]
    fn test_output_length_always_matches_expected() {
        let input: Vec<f64> = (0..15).map(|i| i as f64).collect();
        for expected in [0, 1, 7, 14, 15, 16, 30] {
            let once = reconcile(&input, expected);
            assert_eq!(once.values.len(), expected);

            // back again: shape holds, content may be lost
            let twice = reconcile(&once.values, input.len());
            assert_eq!(twice.values.len(), input.len());
        }
    }

    #[test]
    fn test_parse_dimension_mismatch() {
        let report = parse_dimension_mismatch(
            "X has 15 features, but StandardScaler is expecting 20 features as input.",
        )
        .unwrap();
        assert_eq!(report.got, 15);
        assert_eq!(report.expected, 20);
        assert_eq!(report.scaler, "StandardScaler");

        let report = parse_dimension_mismatch("X has 1 feature, but MinMaxScaler is expecting 3 features").unwrap();
        assert_eq!(report.expected, 3);

        assert_eq!(parse_dimension_mismatch("could not broadcast"), None);
    }
}
