//! Network-location splitting
//!
//! Pulls the `host[:port]` component (with any userinfo) out of a raw URL
//! string without normalising it. Features are measured over the raw text,
//! so no lowercasing, IDNA or percent-decoding happens here.

/// Error for URLs whose authority cannot be split
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlError {
    #[error("Invalid IPv6 URL: {0}")]
    InvalidIpv6(String),
}

/// Characters allowed in a scheme token (after the leading letter)
fn is_scheme_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')
}

/// Strip a leading `scheme:` if the prefix is a valid scheme token
fn strip_scheme(url: &str) -> &str {
    let Some(colon) = url.find(':') else {
        return url;
    };
    let scheme = &url[..colon];
    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() && chars.all(is_scheme_char) => &url[colon + 1..],
        _ => url,
    }
}

/// Network-location component of `url`, or `""` when there is none
///
/// A netloc only exists when `//` directly follows the scheme (or starts
/// the string), so `bit.ly/abc` has no netloc while `//bit.ly/abc` does.
pub fn split_netloc(url: &str) -> Result<String, UrlError> {
    let cleaned: String = url
        .trim_start_matches(|c: char| c <= ' ')
        .chars()
        .filter(|c| !matches!(c, '\t' | '\r' | '\n'))
        .collect();

    let rest = strip_scheme(&cleaned);
    let Some(after) = rest.strip_prefix("//") else {
        return Ok(String::new());
    };

    let end = after.find(&['/', '?', '#'][..]).unwrap_or(after.len());
    let netloc = &after[..end];

    if netloc.contains('[') != netloc.contains(']') {
        return Err(UrlError::InvalidIpv6(url.to_string()));
    }

    Ok(netloc.to_string())
}

/// Netloc with a leading `www.` removed, as used for allowlist lookups
pub fn registrable_domain(url: &str) -> Result<String, UrlError> {
    let netloc = split_netloc(url)?;
    Ok(match netloc.strip_prefix("www.") {
        Some(stripped) => stripped.to_string(),
        None => netloc,
    })
}
