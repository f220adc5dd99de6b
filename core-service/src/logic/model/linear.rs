//! Linear Models
//!
//! Binary classifiers over a scaled vector. Label 1 = legitimate,
//! label 0 = phishing, matching the training convention.

use std::fmt;

use ndarray::Array1;

use super::bundle::BundleError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("model expects {expected} features, got {got}")]
    Dimension { got: usize, expected: usize },

    #[error("{0} does not support probability estimates")]
    Unsupported(String),

    #[error("model produced unknown label {0}")]
    UnknownLabel(u8),

    #[error("{0}")]
    Numeric(String),
}

// ============================================================================
// MODEL TRAIT
// ============================================================================

/// Fitted predictive model; must be safe for concurrent reads
pub trait Model: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Whether `predict_proba` is implemented; read once at bundle load
    fn supports_probability(&self) -> bool {
        false
    }

    fn predict(&self, scaled: &[f64]) -> Result<u8, ModelError>;

    /// Per-class probabilities, indexed by label
    fn predict_proba(&self, _scaled: &[f64]) -> Result<Vec<f64>, ModelError> {
        Err(ModelError::Unsupported(self.name().to_string()))
    }
}

// ============================================================================
// SHARED LINEAR DECISION FUNCTION
// ============================================================================

#[derive(Debug, Clone)]
struct LinearDecision {
    coef: Array1<f64>,
    intercept: f64,
}

impl LinearDecision {
    fn new(coef: Vec<f64>, intercept: f64) -> Result<Self, BundleError> {
        if coef.is_empty() {
            return Err(BundleError::Shape("model has no coefficients".to_string()));
        }
        if !intercept.is_finite() || coef.iter().any(|c| !c.is_finite()) {
            return Err(BundleError::Shape("model parameters must be finite".to_string()));
        }
        Ok(Self { coef: Array1::from(coef), intercept })
    }

    fn score(&self, scaled: &[f64]) -> Result<f64, ModelError> {
        if scaled.len() != self.coef.len() {
            return Err(ModelError::Dimension {
                got: scaled.len(),
                expected: self.coef.len(),
            });
        }
        let score = self.coef.dot(&Array1::from(scaled.to_vec())) + self.intercept;
        if score.is_finite() {
            Ok(score)
        } else {
            Err(ModelError::Numeric(format!("decision score is {}", score)))
        }
    }

    fn label(&self, scaled: &[f64]) -> Result<u8, ModelError> {
        Ok(if self.score(scaled)? > 0.0 { 1 } else { 0 })
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

// ============================================================================
// LOGISTIC REGRESSION
// ============================================================================

/// Logistic regression; supports probability estimates
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    decision: LinearDecision,
}

impl LogisticRegression {
    pub fn new(coef: Vec<f64>, intercept: f64) -> Result<Self, BundleError> {
        Ok(Self { decision: LinearDecision::new(coef, intercept)? })
    }

    pub fn dimension(&self) -> usize {
        self.decision.coef.len()
    }
}

impl Model for LogisticRegression {
    fn name(&self) -> &str {
        "LogisticRegression"
    }

    fn supports_probability(&self) -> bool {
        true
    }

    fn predict(&self, scaled: &[f64]) -> Result<u8, ModelError> {
        self.decision.label(scaled)
    }

    fn predict_proba(&self, scaled: &[f64]) -> Result<Vec<f64>, ModelError> {
        let p1 = sigmoid(self.decision.score(scaled)?);
        Ok(vec![1.0 - p1, p1])
    }
}

// ============================================================================
// LINEAR SVC
// ============================================================================

/// Linear support vector classifier; no probability estimates
#[derive(Debug, Clone)]
pub struct LinearSvc {
    decision: LinearDecision,
}

impl LinearSvc {
    pub fn new(coef: Vec<f64>, intercept: f64) -> Result<Self, BundleError> {
        Ok(Self { decision: LinearDecision::new(coef, intercept)? })
    }

    pub fn dimension(&self) -> usize {
        self.decision.coef.len()
    }
}

impl Model for LinearSvc {
    fn name(&self) -> &str {
        "LinearSVC"
    }

    fn predict(&self, scaled: &[f64]) -> Result<u8, ModelError> {
        self.decision.label(scaled)
    }
}
