//! Lexical URL Feature Extraction
//!
//! Computes the 15 features of `FEATURE_LAYOUT` from the raw URL text and
//! its network location. Every measurement is over the unnormalised string.
//!
//! `extract` never fails: any internal fault (a non-finite value, an
//! unsplittable URL, a panic) degrades to an all-zero vector and is logged
//! at error level. A zero vector still gets classified, so these log lines
//! are the only trace that a verdict was made on no information.

use std::panic::{self, AssertUnwindSafe};

use unicode_general_category::{get_general_category, GeneralCategory};

use super::layout::FEATURE_COUNT;
use super::url::{split_netloc, UrlError};
use super::vector::{FeatureVector, FeatureVectorBuilder};
use crate::logic::config::LexicalMarkers;

/// Internal extraction failure (never surfaced by `extract`)
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error(transparent)]
    Url(#[from] UrlError),
    #[error("feature {index} is not finite")]
    NonFinite { index: usize },
    #[error("extractor panicked: {0}")]
    Panicked(String),
}

/// URL feature extractor with injected marker lists
#[derive(Debug, Clone, Default)]
pub struct UrlFeatureExtractor {
    markers: LexicalMarkers,
}

impl UrlFeatureExtractor {
    pub fn new(markers: LexicalMarkers) -> Self {
        Self { markers }
    }

    /// Extract features; falls back to a zero vector on any internal error
    pub fn extract(&self, url: &str, domain: Option<&str>) -> FeatureVector {
        fail_safe(url, || self.try_extract(url, domain))
    }

    /// Fallible extraction, for callers that want to see the failure
    pub fn try_extract(&self, url: &str, domain: Option<&str>) -> Result<FeatureVector, ExtractError> {
        let domain = match domain {
            Some(d) => d.to_string(),
            None => split_netloc(url)?,
        };
        let domain = domain.as_str();

        let url_length = url.chars().count();
        let special_chars = count_special_chars(url);
        let obfuscation_ratio = if url_length > 0 {
            special_chars as f64 / url_length as f64
        } else {
            0.0
        };

        let vector = FeatureVectorBuilder::new()
            .url_length(url_length)
            .num_dots(url.matches('.').count())
            .contains_https(url.contains("https"))
            .num_special_chars(special_chars)
            .num_digits(count_digits(url))
            .has_ip_in_domain(domain.chars().any(is_digit))
            .domain_length(domain.chars().count())
            .num_subdomains(domain.matches('.').count())
            .has_shortening_service(contains_any(url, &self.markers.shorteners))
            .obfuscation_ratio(obfuscation_ratio)
            .num_hyphens(domain.matches('-').count())
            .longest_word(longest_alpha_run(domain))
            .has_at_symbol(url.contains('@'))
            .has_double_slash(has_disguised_double_slash(url))
            .has_suspicious_tld(contains_any(domain, &self.markers.suspicious_tlds))
            .build();

        if let Some(index) = vector.first_non_finite() {
            return Err(ExtractError::NonFinite { index });
        }

        Ok(vector)
    }
}

// ============================================================================
// MEASUREMENTS
// ============================================================================

/// Characters that are neither alphanumeric nor '.'
fn count_special_chars(url: &str) -> usize {
    url.chars().filter(|c| !c.is_alphanumeric() && *c != '.').count()
}

/// Other-number (No) code points whose numeric type is Digit
const DIGIT_VALUED_OTHER_NUMBERS: &[(char, char)] = &[
    ('\u{00B2}', '\u{00B3}'),
    ('\u{00B9}', '\u{00B9}'),
    ('\u{1369}', '\u{1371}'),
    ('\u{19DA}', '\u{19DA}'),
    ('\u{2070}', '\u{2070}'),
    ('\u{2074}', '\u{2079}'),
    ('\u{2080}', '\u{2089}'),
    ('\u{2460}', '\u{2468}'),
    ('\u{2474}', '\u{247C}'),
    ('\u{2488}', '\u{2490}'),
    ('\u{24EA}', '\u{24EA}'),
    ('\u{24F5}', '\u{24FD}'),
    ('\u{24FF}', '\u{24FF}'),
    ('\u{2776}', '\u{277E}'),
    ('\u{2780}', '\u{2788}'),
    ('\u{278A}', '\u{2792}'),
    ('\u{10A40}', '\u{10A43}'),
    ('\u{10E60}', '\u{10E68}'),
    ('\u{11052}', '\u{1105A}'),
    ('\u{1E8C7}', '\u{1E8CF}'),
    ('\u{1F100}', '\u{1F10A}'),
];

/// Decimal digits in any script plus digit-valued symbols (superscripts,
/// circled digits); fractions, roman numerals and CJK numbers do not count
fn is_digit(c: char) -> bool {
    if c.is_ascii_digit() {
        return true;
    }
    match get_general_category(c) {
        GeneralCategory::DecimalNumber => true,
        GeneralCategory::OtherNumber => DIGIT_VALUED_OTHER_NUMBERS
            .iter()
            .any(|&(lo, hi)| (lo..=hi).contains(&c)),
        _ => false,
    }
}

fn count_digits(text: &str) -> usize {
    text.chars().filter(|&c| is_digit(c)).count()
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|n| haystack.contains(n.as_str()))
}

/// Longest ASCII-alphabetic run in the first dot-separated label
fn longest_alpha_run(domain: &str) -> usize {
    domain
        .split('.')
        .next()
        .unwrap_or("")
        .split(|c: char| !c.is_ascii_alphabetic())
        .map(|word| word.len())
        .max()
        .unwrap_or(0)
}

/// `//` found past position 7, or found with no "http" before it
///
/// Positions are character offsets. Intentionally permissive: a bare
/// `//host` with no scheme also counts.
fn has_disguised_double_slash(url: &str) -> bool {
    let Some(byte_pos) = url.find("//") else {
        return false;
    };
    let prefix = &url[..byte_pos];
    prefix.chars().count() > 7 || !prefix.contains("http")
}

/// Run an extraction, turning any error or panic into the zero vector
fn fail_safe<F>(url: &str, extraction: F) -> FeatureVector
where
    F: FnOnce() -> Result<FeatureVector, ExtractError>,
{
    let outcome = panic::catch_unwind(AssertUnwindSafe(extraction))
        .unwrap_or_else(|payload| Err(ExtractError::Panicked(panic_message(payload.as_ref()))));

    match outcome {
        Ok(vector) => {
            log::debug!("Extracted features: {}", vector.to_log_entry());
            vector
        }
        Err(e) => {
            log::error!(
                "Feature extraction failed for {:?}: {} - using zero vector ({} features)",
                url, e, FEATURE_COUNT
            );
            FeatureVector::new()
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> UrlFeatureExtractor {
        UrlFeatureExtractor::default()
    }

    #[test]
    fn test_shortener_scenario() {
        let v = extractor().extract("https://bit.ly/abc", Some("bit.ly"));
        assert_eq!(v.get_by_name("has_shortening_service"), Some(1.0));
        assert_eq!(v.get_by_name("url_length"), Some(18.0));
        assert_eq!(v.get_by_name("num_dots"), Some(1.0));
        assert_eq!(v.get_by_name("contains_https"), Some(1.0));
        // ':' '/' '/' '/'
        assert_eq!(v.get_by_name("num_special_chars"), Some(4.0));
        assert_eq!(v.get_by_name("domain_length"), Some(6.0));
        assert_eq!(v.get_by_name("longest_word"), Some(3.0));
        assert_eq!(v.get_by_name("has_double_slash"), Some(0.0));
    }

    #[test]
    fn test_domain_derived_when_omitted() {
        let with = extractor().extract("http://evil-site.xyz/login", Some("evil-site.xyz"));
        let without = extractor().extract("http://evil-site.xyz/login", None);
        assert_eq!(with, without);
        assert_eq!(without.get_by_name("num_hyphens"), Some(1.0));
        assert_eq!(without.get_by_name("has_suspicious_tld"), Some(1.0));
        assert_eq!(without.get_by_name("longest_word"), Some(4.0));
    }

    #[test]
    fn test_empty_url_has_no_division_error() {
        let v = extractor().extract("", None);
        assert_eq!(v.len(), FEATURE_COUNT);
        assert_eq!(v.get_by_name("obfuscation_ratio"), Some(0.0));
        assert!(v.is_zero());
    }

    #[test]
    fn test_https_is_a_substring_check() {
        let v = extractor().extract("http://example.com/https-guide", None);
        assert_eq!(v.get_by_name("contains_https"), Some(1.0));
    }

    #[test]
    fn test_digits_and_ip_heuristic() {
        let v = extractor().extract("http://192.168.0.1/a1", None);
        assert_eq!(v.get_by_name("num_digits"), Some(9.0));
        assert_eq!(v.get_by_name("has_ip_in_domain"), Some(1.0));
        assert_eq!(v.get_by_name("num_subdomains"), Some(3.0));
        assert_eq!(v.get_by_name("longest_word"), Some(0.0));
    }

    #[test]
    fn test_non_ascii_digits_count() {
        // ARABIC-INDIC DIGIT THREE / FOUR / FIVE
        let v = extractor().extract("http://shop\u{0663}.com/\u{0664}\u{0665}", None);
        assert_eq!(v.get_by_name("num_digits"), Some(3.0));
        assert_eq!(v.get_by_name("has_ip_in_domain"), Some(1.0));

        let v = extractor().extract("http://ex\u{0966}ample.in/", None);
        assert_eq!(v.get_by_name("has_ip_in_domain"), Some(1.0));
    }

    #[test]
    fn test_digit_classification() {
        for c in ['7', '\u{0663}', '\u{FF15}', '\u{00B2}', '\u{2460}', '\u{2081}', '\u{1D7D8}'] {
            assert!(is_digit(c), "{:?} should be a digit", c);
        }
        // VULGAR FRACTION ONE HALF, ROMAN NUMERAL TWELVE, CIRCLED NUMBER TEN, CJK ONE
        for c in ['a', '\u{00BD}', '\u{216B}', '\u{2469}', '\u{4E00}', '.'] {
            assert!(!is_digit(c), "{:?} should not be a digit", c);
        }
        assert_eq!(count_digits("a1\u{00B2}\u{00BD}\u{0663}"), 3);
    }

    #[test]
    fn test_at_symbol_and_obfuscation_ratio() {
        let v = extractor().extract("http://a@b.com", None);
        assert_eq!(v.get_by_name("has_at_symbol"), Some(1.0));
        // ':' '/' '/' '@' over 14 chars
        assert_eq!(v.get_by_name("obfuscation_ratio"), Some(4.0 / 14.0));
    }

    #[test]
    fn test_double_slash_heuristic() {
        assert!(!has_disguised_double_slash("https://example.com"));
        assert!(!has_disguised_double_slash("example.com/path"));
        // only the first '//' is considered
        assert!(!has_disguised_double_slash("https://example.com//evil.com"));
        assert!(has_disguised_double_slash("//cdn.example.com"));
        assert!(has_disguised_double_slash("ftp://example.com"));
        assert!(has_disguised_double_slash("go.to/x?u=http://evil.com"));
    }

    #[test]
    fn test_longest_alpha_run_uses_first_label() {
        assert_eq!(longest_alpha_run("pay2pal-secure.example.com"), 6);
        assert_eq!(longest_alpha_run(""), 0);
        assert_eq!(longest_alpha_run("www.example.com"), 3);
    }

    #[test]
    fn test_unsplittable_url_falls_back_to_zero() {
        let e = extractor();
        assert!(e.try_extract("http://[::1/", None).is_err());

        let v = e.extract("http://[::1/", None);
        assert_eq!(v.len(), FEATURE_COUNT);
        assert!(v.is_zero());
    }

    #[test]
    fn test_panicking_extraction_falls_back_to_zero() {
        let v = fail_safe("http://example.com", || panic!("label index out of range"));
        assert_eq!(v.len(), FEATURE_COUNT);
        assert!(v.is_zero());

        let v = fail_safe("http://example.com", || std::panic::panic_any(42u8));
        assert!(v.is_zero());
    }

    #[test]
    fn test_non_finite_extraction_falls_back_to_zero() {
        let poisoned = FeatureVectorBuilder::new().url_length(18).obfuscation_ratio(f64::NAN).build();
        let index = poisoned.first_non_finite().unwrap();
        assert_eq!(index, 9);

        let v = fail_safe("http://example.com", || Err(ExtractError::NonFinite { index }));
        assert!(v.is_zero());
        assert_eq!(v.first_non_finite(), None);
    }

    #[test]
    fn test_successful_extraction_passes_through() {
        let expected = FeatureVectorBuilder::new().num_dots(2).build();
        let v = fail_safe("http://a.b.c", || Ok(expected.clone()));
        assert_eq!(v, expected);
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("static message");
        assert_eq!(panic_message(payload.as_ref()), "static message");

        let payload: Box<dyn std::any::Any + Send> = Box::new(String::from("owned message"));
        assert_eq!(panic_message(payload.as_ref()), "owned message");

        let payload: Box<dyn std::any::Any + Send> = Box::new(7i32);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic");
    }

    #[test]
    fn test_injected_markers() {
        let e = UrlFeatureExtractor::new(LexicalMarkers {
            shorteners: vec!["sho.rt".to_string()],
            suspicious_tlds: vec![".zip".to_string()],
        });
        let v = e.extract("https://sho.rt/x", None);
        assert_eq!(v.get_by_name("has_shortening_service"), Some(1.0));

        let v = e.extract("https://files.zip/x", None);
        assert_eq!(v.get_by_name("has_suspicious_tld"), Some(1.0));
        assert_eq!(v.get_by_name("has_shortening_service"), Some(0.0));
    }

    #[test]
    fn test_unicode_lengths_are_in_characters() {
        let v = extractor().extract("http://bücher.de", None);
        assert_eq!(v.get_by_name("url_length"), Some(16.0));
        assert_eq!(v.get_by_name("domain_length"), Some(9.0));
    }
}
