//! Short link creation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::domain::clock::Clock;
use crate::domain::entities::{
    ATTEMPTS_PER_TIER, CODE_TIERS, LINK_TTL_SECONDS, ShortLinkRecord, storage_key,
};
use crate::domain::storage::Storage;
use crate::error::AppError;
use crate::utils::code_allocator::{Allocation, AllocationError, allocate};
use crate::utils::code_generator::generate_code;
use crate::utils::url_validator::validate_target_url;

/// Result of a successful shorten call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenedLink {
    pub code: String,
    /// Canonical form of the target URL, as stored.
    pub url: String,
    pub short_url: String,
    pub expires_at: DateTime<Utc>,
}

/// Service for creating short links.
///
/// Validates the target URL, allocates a free code through the tiered
/// allocator, and persists a [`ShortLinkRecord`] with the fixed 90-day TTL.
/// A successful call performs exactly one storage write; failures perform none.
pub struct ShortenService {
    storage: Arc<dyn Storage>,
    clock: Arc<dyn Clock>,
}

impl ShortenService {
    /// Creates a new shorten service.
    pub fn new(storage: Arc<dyn Storage>, clock: Arc<dyn Clock>) -> Self {
        Self { storage, clock }
    }

    /// Shortens `candidate_url`, building the short URL under `request_origin`.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] if the URL is not an absolute http(s) URL
    /// - [`AppError::AllocationExhausted`] if no free code was found in any tier
    /// - [`AppError::Storage`] if an existence check or the final write fails
    pub async fn shorten(
        &self,
        candidate_url: &str,
        request_origin: &str,
    ) -> Result<ShortenedLink, AppError> {
        let url = validate_target_url(candidate_url)?;

        let allocation = self.allocate_code().await?;

        let record = ShortLinkRecord::new(url.to_string(), self.clock.now());
        let payload = record
            .to_json()
            .map_err(|e| AppError::Internal(format!("Failed to encode record: {}", e)))?;

        self.storage
            .put(
                &storage_key(&allocation.code),
                &payload,
                Some(LINK_TTL_SECONDS),
            )
            .await?;

        info!(
            code = %allocation.code,
            attempts = allocation.attempts,
            "Short link created"
        );

        let short_url = format!(
            "{}/s/{}",
            request_origin.trim_end_matches('/'),
            allocation.code
        );

        Ok(ShortenedLink {
            code: allocation.code,
            url: record.url,
            short_url,
            expires_at: record.expires_at,
        })
    }

    /// Runs the tiered allocator against storage.
    async fn allocate_code(&self) -> Result<Allocation, AppError> {
        let storage = &self.storage;

        allocate(
            &CODE_TIERS,
            ATTEMPTS_PER_TIER,
            |code: &str| {
                let key = storage_key(code);
                let storage = Arc::clone(storage);
                async move { Ok::<_, AppError>(storage.get(&key).await?.is_some()) }
            },
            |tier| {
                generate_code(tier)
                    .map_err(|e| AppError::Internal(format!("Random source failure: {}", e)))
            },
        )
        .await
        .map_err(|e| match e {
            AllocationError::Exhausted { attempts } => AppError::AllocationExhausted { attempts },
            AllocationError::Source(inner) => inner,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::ManualClock;
    use crate::domain::entities::is_valid_code;
    use crate::domain::storage::{MockStorage, StorageError};
    use crate::utils::url_validator::UrlValidationError;
    use chrono::{Duration, TimeZone};

    fn fixed_clock() -> Arc<ManualClock> {
        Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).unwrap(),
        ))
    }

    fn service(storage: MockStorage) -> ShortenService {
        ShortenService::new(Arc::new(storage), fixed_clock())
    }

    #[tokio::test]
    async fn test_shorten_success_on_first_draw() {
        let mut storage = MockStorage::new();
        storage.expect_get().times(1).returning(|_| Ok(None));
        storage
            .expect_put()
            .withf(|key, value, ttl| {
                key.starts_with("short:code:")
                    && key.len() == "short:code:".len() + 4
                    && value.contains("https://example.com/page?x=1")
                    && *ttl == Some(7_776_000)
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let link = service(storage)
            .shorten("https://example.com/page?x=1", "https://sho.rt")
            .await
            .unwrap();

        assert_eq!(link.code.len(), 4);
        assert!(is_valid_code(&link.code));
        assert_eq!(link.url, "https://example.com/page?x=1");
        assert_eq!(link.short_url, format!("https://sho.rt/s/{}", link.code));
        assert_eq!(
            link.expires_at,
            Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).unwrap() + Duration::days(90)
        );
    }

    #[tokio::test]
    async fn test_shorten_writes_under_checked_key() {
        let mut storage = MockStorage::new();
        let mut seq = mockall::Sequence::new();
        storage
            .expect_get()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));
        storage
            .expect_put()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(()));

        let link = service(storage)
            .shorten("http://example.com/", "http://localhost:3000/")
            .await
            .unwrap();

        assert_eq!(
            link.short_url,
            format!("http://localhost:3000/s/{}", link.code)
        );
    }

    #[tokio::test]
    async fn test_shorten_rejects_bad_scheme_without_touching_storage() {
        let mut storage = MockStorage::new();
        storage.expect_get().times(0);
        storage.expect_put().times(0);

        let result = service(storage).shorten("ftp://host/x", "http://s").await;

        assert!(matches!(
            result,
            Err(AppError::InvalidUrl(UrlValidationError::UnsupportedScheme(_)))
        ));
    }

    #[tokio::test]
    async fn test_shorten_rejects_unparsable_url() {
        let mut storage = MockStorage::new();
        storage.expect_get().times(0);
        storage.expect_put().times(0);

        let result = service(storage).shorten("not a url", "http://s").await;

        assert!(matches!(
            result,
            Err(AppError::InvalidUrl(UrlValidationError::Malformed(_)))
        ));
    }

    #[tokio::test]
    async fn test_shorten_escalates_past_full_tiers() {
        let mut storage = MockStorage::new();
        storage.expect_get().times(21).returning(|key| {
            let code = key.trim_start_matches("short:code:");
            if code.len() < 6 {
                Ok(Some("{}".to_string()))
            } else {
                Ok(None)
            }
        });
        storage.expect_put().times(1).returning(|_, _, _| Ok(()));

        let link = service(storage)
            .shorten("https://example.com/", "http://s")
            .await
            .unwrap();

        assert_eq!(link.code.len(), 6);
    }

    #[tokio::test]
    async fn test_shorten_exhausted_writes_nothing() {
        let mut storage = MockStorage::new();
        storage
            .expect_get()
            .times(30)
            .returning(|_| Ok(Some("taken".to_string())));
        storage.expect_put().times(0);

        let result = service(storage)
            .shorten("https://example.com/", "http://s")
            .await;

        assert!(matches!(
            result,
            Err(AppError::AllocationExhausted { attempts: 30 })
        ));
    }

    #[tokio::test]
    async fn test_shorten_lookup_failure_propagates() {
        let mut storage = MockStorage::new();
        storage
            .expect_get()
            .times(1)
            .returning(|_| Err(StorageError::Operation("connection reset".into())));
        storage.expect_put().times(0);

        let result = service(storage)
            .shorten("https://example.com/", "http://s")
            .await;

        assert!(matches!(result, Err(AppError::Storage(_))));
    }

    #[tokio::test]
    async fn test_shorten_write_failure_propagates() {
        let mut storage = MockStorage::new();
        storage.expect_get().returning(|_| Ok(None));
        storage
            .expect_put()
            .times(1)
            .returning(|_, _, _| Err(StorageError::Operation("OOM".into())));

        let result = service(storage)
            .shorten("https://example.com/", "http://s")
            .await;

        assert!(matches!(result, Err(AppError::Storage(_))));
    }

    #[tokio::test]
    async fn test_shorten_record_round_trips() {
        let mut storage = MockStorage::new();
        storage.expect_get().returning(|_| Ok(None));
        storage
            .expect_put()
            .withf(|_, value, _| {
                ShortLinkRecord::from_json(value)
                    .map(|r| r.url == "https://example.com/a?b=c")
                    .unwrap_or(false)
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        service(storage)
            .shorten("https://example.com/a?b=c", "http://s")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_checks_use_namespaced_key() {
        let mut storage = MockStorage::new();
        storage
            .expect_get()
            .withf(|key| key.starts_with("short:code:"))
            .times(1)
            .returning(|_| Ok(None));
        storage.expect_put().returning(|_, _, _| Ok(()));

        service(storage)
            .shorten("https://example.com/", "http://s")
            .await
            .unwrap();
    }
}
