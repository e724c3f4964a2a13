//! Short link record stored under each allocated code.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Lifetime of every short link: 90 days.
pub const LINK_TTL_SECONDS: u64 = 7_776_000;

/// Namespace prefix for short link keys in storage.
pub const CODE_KEY_PREFIX: &str = "short:code:";

/// Builds the storage key for a short code.
pub fn storage_key(code: &str) -> String {
    format!("{}{}", CODE_KEY_PREFIX, code)
}

/// A persisted short link.
///
/// Created once when a URL is shortened and never mutated afterwards.
/// Serialized as JSON with camelCase field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortLinkRecord {
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl ShortLinkRecord {
    /// Creates a record for `url` created at `created_at`, expiring after
    /// [`LINK_TTL_SECONDS`].
    pub fn new(url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            url,
            created_at,
            expires_at: created_at + Self::ttl(),
        }
    }

    /// The fixed record lifetime as a [`Duration`].
    pub fn ttl() -> Duration {
        Duration::seconds(LINK_TTL_SECONDS as i64)
    }

    /// Returns true once `now` has reached the expiry timestamp.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}
