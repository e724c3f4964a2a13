//! Request origin derivation from HTTP headers.
//!
//! Short URLs are built as `<origin>/s/<code>`, where the origin is taken
//! from the request the link was created by.

use crate::error::AppError;
use axum::http::{HeaderMap, HeaderName, header};

const X_FORWARDED_PROTO: HeaderName = HeaderName::from_static("x-forwarded-proto");
const X_FORWARDED_HOST: HeaderName = HeaderName::from_static("x-forwarded-host");

/// Builds `<scheme>://<host>` for the current request.
///
/// The host comes from the `Host` header, port included. With
/// `trust_forwarded` set, `X-Forwarded-Host` and `X-Forwarded-Proto` take
/// precedence (first value of a comma-separated list). Without a trusted
/// proto the scheme is `http`.
///
/// # Errors
///
/// Returns [`AppError::InvalidHost`] if no usable host header is present.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "sho.rt:8080".parse().unwrap());
///
/// assert_eq!(request_origin(&headers, false).unwrap(), "http://sho.rt:8080");
/// ```
pub fn request_origin(headers: &HeaderMap, trust_forwarded: bool) -> Result<String, AppError> {
    let forwarded_host = if trust_forwarded {
        first_value(headers, &X_FORWARDED_HOST)
    } else {
        None
    };

    let host = match forwarded_host {
        Some(host) => host,
        None => headers
            .get(header::HOST)
            .ok_or_else(|| AppError::InvalidHost("Missing Host header".to_string()))?
            .to_str()
            .map_err(|_| AppError::InvalidHost("Host header is not valid UTF-8".to_string()))?
            .trim(),
    };

    if host.is_empty() || host.contains(|c: char| c.is_whitespace() || c == '/' || c == '@') {
        return Err(AppError::InvalidHost(format!("Unusable host '{}'", host)));
    }

    let scheme = if trust_forwarded {
        match first_value(headers, &X_FORWARDED_PROTO) {
            Some(proto) if proto.eq_ignore_ascii_case("https") => "https",
            _ => "http",
        }
    } else {
        "http"
    };

    Ok(format!("{}://{}", scheme, host))
}

/// First comma-separated value of `name`, if present and non-empty.
fn first_value<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Option<&'a str> {
    headers
        .get(name)?
        .to_str()
        .ok()?
        .split(',')
        .next()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
