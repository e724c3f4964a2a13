//! DTOs for the link shortening endpoint.

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

use crate::application::services::ShortenedLink;

/// JSON body of `POST /api/shorten`.
#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    /// The long URL to shorten.
    #[serde(alias = "u")]
    pub url: Option<String>,
}

/// Query string of `GET /api/shorten`.
#[derive(Debug, Deserialize)]
pub struct ShortenQuery {
    #[serde(alias = "url")]
    pub u: Option<String>,
}

/// Successful shorten response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub code: String,
    pub url: String,
    pub short_url: String,
    /// ISO 8601 UTC timestamp with millisecond precision.
    pub expires_at: String,
}

impl From<ShortenedLink> for ShortenResponse {
    fn from(link: ShortenedLink) -> Self {
        Self {
            code: link.code,
            url: link.url,
            short_url: link.short_url,
            expires_at: link.expires_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_response_field_names() {
        let response = ShortenResponse::from(ShortenedLink {
            code: "ABCD".to_string(),
            url: "https://example.com/".to_string(),
            short_url: "http://sho.rt/s/ABCD".to_string(),
            expires_at: Utc.with_ymd_and_hms(2025, 7, 30, 12, 0, 0).unwrap(),
        });

        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["code"], "ABCD");
        assert_eq!(json["url"], "https://example.com/");
        assert_eq!(json["shortUrl"], "http://sho.rt/s/ABCD");
        assert_eq!(json["expiresAt"], "2025-07-30T12:00:00.000Z");
    }

    #[test]
    fn test_request_accepts_url_or_u() {
        let a: ShortenRequest = serde_json::from_str(r#"{"url":"https://a.b"}"#).unwrap();
        let b: ShortenRequest = serde_json::from_str(r#"{"u":"https://a.b"}"#).unwrap();
        let c: ShortenRequest = serde_json::from_str("{}").unwrap();

        assert_eq!(a.url.as_deref(), Some("https://a.b"));
        assert_eq!(b.url.as_deref(), Some("https://a.b"));
        assert!(c.url.is_none());
    }
}
