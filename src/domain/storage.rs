//! Key/value storage contract shared by the durable and fallback backends.

use async_trait::async_trait;

/// Errors raised by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage connection error: {0}")]
    Connection(String),

    #[error("Storage operation error: {0}")]
    Operation(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Minimal key/value capability with per-key expiry.
///
/// Both backends must be indistinguishable to callers: an entry whose TTL
/// has elapsed is reported as absent by [`Storage::get`], whether the backend
/// dropped it natively or checks expiry lazily.
///
/// # Implementations
///
/// - [`crate::infrastructure::storage::RedisStorage`] - durable, `SETEX` expiry
/// - [`crate::infrastructure::storage::MemoryStorage`] - in-process fallback
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Storage: Send + Sync {
    /// Returns the value stored under `key`, or `None` if absent or expired.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be reached.
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// `ttl_seconds = None` stores the entry without expiry.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the write is not acknowledged.
    async fn put(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> StorageResult<()>;

    /// Checks that the backend is reachable.
    async fn health_check(&self) -> bool;

    /// Short backend name for logs and health output (`redis`, `memory`).
    fn backend(&self) -> &'static str;
}
