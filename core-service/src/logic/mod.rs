//! Logic Module - Detection Engines
//!
//! - `features/` - URL feature extraction (versioned layout)
//! - `model/` - Scaling, linear models, bundle loading, inference
//! - `verdict/` - Confidence gate + known-domain override
//! - `detector` - End-to-end pipeline

pub mod config;
pub mod features;
pub mod model;
pub mod verdict;
pub mod detector;

pub use config::{DetectorConfig, LexicalMarkers, PolicyConfig};
pub use detector::PhishingDetector;
