//! PhishGuard Core - URL phishing classification engine
//!
//! Lexical features from a raw URL, a pre-trained scaler + linear model,
//! and a deterministic post-processing policy.
//!
//! ```ignore
//! use std::sync::Arc;
//! use phishguard_core::{ClassifierBundle, DetectorConfig, LoadOptions, PhishingDetector};
//!
//! let bundle = ClassifierBundle::load("model_bundle.json".as_ref(), &LoadOptions::default())?;
//! let detector = PhishingDetector::new(DetectorConfig::from_env(), Some(Arc::new(bundle)));
//! let verdict = detector.analyze("https://bit.ly/abc")?;
//! ```

pub mod constants;
pub mod error;
pub mod logic;

pub use error::{DetectError, DetectResult};
pub use logic::config::{DetectorConfig, LexicalMarkers, PolicyConfig};
pub use logic::detector::PhishingDetector;
pub use logic::features::{FeatureVector, LayoutInfo, UrlFeatureExtractor, FEATURE_COUNT, FEATURE_LAYOUT};
pub use logic::model::{
    BundleError, BundleMetadata, ClassifierAdapter, ClassifierBundle, EngineStatus, LinearSvc, LoadOptions,
    LogisticRegression, MinMaxScaler, Prediction, RawLabel, StandardScaler,
};
pub use logic::verdict::{DecisionPolicy, Verdict, VerdictLabel};
