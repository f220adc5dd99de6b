//! Scaling Transforms
//!
//! Fitted normalisation applied before the model. A scaler knows its own
//! input width; callers only learn it from a `TransformError` on mismatch.

use std::fmt;

use ndarray::Array1;

use super::bundle::BundleError;
use super::reconcile::parse_dimension_mismatch;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransformError {
    /// Structured width mismatch
    #[error("X has {got} features, but {scaler} is expecting {expected} features as input")]
    Dimension { got: usize, expected: usize, scaler: String },

    /// Width complaint only available as text (foreign scalers)
    #[error("{0}")]
    Shape(String),

    /// Anything else (NaN input, internal failure)
    #[error("{0}")]
    Numeric(String),
}

impl TransformError {
    pub fn is_dimension_mismatch(&self) -> bool {
        matches!(self, TransformError::Dimension { .. } | TransformError::Shape(_))
    }

    /// Width the scaler expects, if it can be recovered
    pub fn expected_dimension(&self) -> Option<usize> {
        match self {
            TransformError::Dimension { expected, .. } => Some(*expected),
            TransformError::Shape(message) => parse_dimension_mismatch(message).map(|r| r.expected),
            TransformError::Numeric(_) => None,
        }
    }
}

// ============================================================================
// SCALER TRAIT
// ============================================================================

/// Fitted scaling transform; must be safe for concurrent reads
pub trait Scaler: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, TransformError>;
}

fn check_input(name: &str, expected: usize, features: &[f64]) -> Result<Array1<f64>, TransformError> {
    if features.len() != expected {
        return Err(TransformError::Dimension {
            got: features.len(),
            expected,
            scaler: name.to_string(),
        });
    }
    if features.iter().any(|v| !v.is_finite()) {
        return Err(TransformError::Numeric("Input X contains NaN or infinity".to_string()));
    }
    Ok(Array1::from(features.to_vec()))
}

// ============================================================================
// STANDARD SCALER
// ============================================================================

/// z = (x - mean) / scale
#[derive(Debug, Clone)]
pub struct StandardScaler {
    mean: Array1<f64>,
    scale: Array1<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, BundleError> {
        if mean.len() != scale.len() {
            return Err(BundleError::Shape(format!(
                "StandardScaler mean has {} entries but scale has {}",
                mean.len(),
                scale.len()
            )));
        }
        // Constant features were fitted with zero variance
        let scale = scale.into_iter().map(|s| if s == 0.0 { 1.0 } else { s }).collect::<Vec<_>>();
        Ok(Self {
            mean: Array1::from(mean),
            scale: Array1::from(scale),
        })
    }

    pub fn dimension(&self) -> usize {
        self.mean.len()
    }
}

impl Scaler for StandardScaler {
    fn name(&self) -> &str {
        "StandardScaler"
    }

    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, TransformError> {
        let x = check_input(self.name(), self.dimension(), features)?;
        Ok(((x - &self.mean) / &self.scale).to_vec())
    }
}

// ============================================================================
// MIN-MAX SCALER
// ============================================================================

/// (x - min) / (max - min), clamped to [0, 1]
#[derive(Debug, Clone)]
pub struct MinMaxScaler {
    min_vals: Array1<f64>,
    max_vals: Array1<f64>,
}

impl MinMaxScaler {
    pub fn new(min_vals: Vec<f64>, max_vals: Vec<f64>) -> Result<Self, BundleError> {
        if min_vals.len() != max_vals.len() {
            return Err(BundleError::Shape(format!(
                "MinMaxScaler min has {} entries but max has {}",
                min_vals.len(),
                max_vals.len()
            )));
        }
        Ok(Self {
            min_vals: Array1::from(min_vals),
            max_vals: Array1::from(max_vals),
        })
    }

    pub fn dimension(&self) -> usize {
        self.min_vals.len()
    }
}

impl Scaler for MinMaxScaler {
    fn name(&self) -> &str {
        "MinMaxScaler"
    }

    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, TransformError> {
        let x = check_input(self.name(), self.dimension(), features)?;
        let range = (&self.max_vals - &self.min_vals).mapv(|r| r.max(1e-8));
        Ok(((x - &self.min_vals) / range).mapv(|v| v.clamp(0.0, 1.0)).to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_scaler_transform() {
        let scaler = StandardScaler::new(vec![1.0, 2.0, 3.0], vec![2.0, 0.0, 1.0]).unwrap();
        let out = scaler.transform(&[3.0, 5.0, 3.0]).unwrap();
        assert_eq!(out, vec![1.0, 3.0, 0.0]);
    }

    #[test]
    fn test_standard_scaler_dimension_error() {
        let scaler = StandardScaler::new(vec![0.0; 20], vec![1.0; 20]).unwrap();
        let err = scaler.transform(&[0.0; 15]).unwrap_err();

        assert!(err.is_dimension_mismatch());
        assert_eq!(err.expected_dimension(), Some(20));
        assert_eq!(
            err.to_string(),
            "X has 15 features, but StandardScaler is expecting 20 features as input"
        );
    }

    #[test]
    fn test_non_finite_input_is_numeric_error() {
        let scaler = StandardScaler::new(vec![0.0; 2], vec![1.0; 2]).unwrap();
        let err = scaler.transform(&[f64::NAN, 0.0]).unwrap_err();
        assert!(!err.is_dimension_mismatch());
        assert_eq!(err.expected_dimension(), None);
    }

    #[test]
    fn test_mismatched_parameters_rejected() {
        assert!(StandardScaler::new(vec![0.0; 3], vec![1.0; 2]).is_err());
        assert!(MinMaxScaler::new(vec![0.0; 3], vec![1.0; 4]).is_err());
    }

    #[test]
    fn test_min_max_scaler_clamps() {
        let scaler = MinMaxScaler::new(vec![0.0, 10.0], vec![10.0, 10.0]).unwrap();
        let out = scaler.transform(&[20.0, 5.0]).unwrap();
        assert_eq!(out, vec![1.0, 0.0]);

        let out = scaler.transform(&[5.0, 10.0]).unwrap();
        assert_eq!(out, vec![0.5, 0.0]);
    }

    #[test]
    fn test_shape_message_is_parsed() {
        let err = TransformError::Shape(
            "X has 15 features, but RobustScaler is expecting 12 features as input".to_string(),
        );
        assert_eq!(err.expected_dimension(), Some(12));

        let err = TransformError::Shape("shapes do not align".to_string());
        assert!(err.is_dimension_mismatch());
        assert_eq!(err.expected_dimension(), None);
    }
}
