//! Target URL validation.
//!
//! Only absolute `http` and `https` URLs can be shortened. Accepted URLs are
//! returned in their canonical serialization (lowercase scheme and host,
//! `/` path for bare origins, default port dropped); the query and fragment
//! are kept as given.

use url::Url;

/// Reasons a candidate URL is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL is missing")]
    Missing,

    #[error("Invalid URL format: {0}")]
    Malformed(String),

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),
}

/// Parses `input` as an absolute http(s) URL.
///
/// # Errors
///
/// - [`UrlValidationError::Missing`] for empty or whitespace-only input
/// - [`UrlValidationError::Malformed`] if the input is not an absolute URL
/// - [`UrlValidationError::UnsupportedScheme`] for any scheme other than `http`/`https`
///
/// # Examples
///
/// ```
/// use shortener::utils::url_validator::validate_target_url;
///
/// let url = validate_target_url("HTTPS://Example.com/page?x=1").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/page?x=1");
///
/// assert!(validate_target_url("ftp://host/x").is_err());
/// ```
pub fn validate_target_url(input: &str) -> Result<Url, UrlValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlValidationError::Missing);
    }

    let url = Url::parse(trimmed).map_err(|e| UrlValidationError::Malformed(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(UrlValidationError::UnsupportedScheme(other.to_string())),
    }
}
