//! Features Module - URL Feature Extraction Engine
//!
//! Turns a raw URL into the fixed-order vector the classifier was trained on.
//! The layout lives in one place (`layout.rs`) and is versioned.

pub mod layout;
pub mod vector;
pub mod url;
pub mod lexical;


// Re-export common types
pub use layout::{LayoutInfo, LayoutMismatchError, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};
pub use vector::{FeatureVector, FeatureVectorBuilder};
pub use url::{registrable_domain, split_netloc, UrlError};
pub use lexical::{ExtractError, UrlFeatureExtractor};
