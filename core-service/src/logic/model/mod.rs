//! Model Module - Classifier Inference Engine
//!
//! Scaling transforms, linear models, the bundle that pairs them, and the
//! adapter that runs them. Swapping the model never touches the extractor
//! or the decision policy.

pub mod scaler;
pub mod linear;
pub mod bundle;
pub mod reconcile;
pub mod types;
pub mod inference;

// Re-export common types
pub use scaler::{MinMaxScaler, Scaler, StandardScaler, TransformError};
pub use linear::{LinearSvc, LogisticRegression, Model, ModelError};
pub use bundle::{BundleError, BundleFile, BundleMetadata, ClassifierBundle, LoadOptions, ModelSpec, ScalerSpec};
pub use reconcile::{parse_dimension_mismatch, reconcile, DimensionReport, Reconciled, Reconciliation};
pub use types::{ConfidenceSource, EngineStatus, Prediction, RawLabel};
pub use inference::ClassifierAdapter;
