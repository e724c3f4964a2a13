//! Short code resolution.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::clock::Clock;
use crate::domain::entities::{ShortLinkRecord, storage_key};
use crate::domain::storage::Storage;
use crate::error::AppError;

/// Resolves short codes back to their target URLs.
///
/// Only reads from storage. A code is unreachable once its record has
/// expired, even if the backend still holds the value.
pub struct RedirectResolver {
    storage: Arc<dyn Storage>,
    clock: Arc<dyn Clock>,
}

impl RedirectResolver {
    /// Creates a new resolver.
    pub fn new(storage: Arc<dyn Storage>, clock: Arc<dyn Clock>) -> Self {
        Self { storage, clock }
    }

    /// Returns the target URL stored for `code`.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the code is unknown or expired
    /// - [`AppError::CorruptRecord`] if the stored value cannot be decoded
    /// - [`AppError::Storage`] if the lookup itself fails
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        self.resolve_record(code).await.map(|record| record.url)
    }

    /// Returns the full record stored for `code`.
    ///
    /// # Errors
    ///
    /// See [`Self::resolve`].
    pub async fn resolve_record(&self, code: &str) -> Result<ShortLinkRecord, AppError> {
        let raw = self
            .storage
            .get(&storage_key(code))
            .await?
            .ok_or_else(|| AppError::NotFound {
                code: code.to_string(),
            })?;

        let record = ShortLinkRecord::from_json(&raw).map_err(|e| {
            warn!("Undecodable record for {}: {}", code, e);
            AppError::CorruptRecord {
                code: code.to_string(),
                reason: e.to_string(),
            }
        })?;

        if record.is_expired_at(self.clock.now()) {
            debug!("Record for {} expired at {}", code, record.expires_at);
            return Err(AppError::NotFound {
                code: code.to_string(),
            });
        }

        Ok(record)
    }
}
