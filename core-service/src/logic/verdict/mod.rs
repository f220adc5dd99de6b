//! Verdict Module
//!
//! Turns a raw classifier prediction into the final Legitimate/Phishing
//! verdict. Deterministic: same inputs, same verdict.
//!
//! ## Structure
//! - `types`: Verdict and its label
//! - `rules`: Known-domain allowlist matching
//! - `policy`: Confidence gate + known-domain override
//!
//! ## Usage
//! ```ignore
//! use phishguard_core::logic::verdict::DecisionPolicy;
//!
//! let policy = DecisionPolicy::default();
//! let verdict = policy.decide(RawLabel::Phishing, 0.9, "https://www.nike.com/");
//! assert_eq!(verdict.label, VerdictLabel::Legitimate);
//! ```

pub mod types;
pub mod rules;
pub mod policy;

pub use types::{Verdict, VerdictLabel};
pub use rules::KnownDomains;
pub use policy::DecisionPolicy;
