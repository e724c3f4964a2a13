//! In-process fallback storage with lazy expiry.

use crate::domain::clock::{Clock, SystemClock};
use crate::domain::storage::{Storage, StorageError, StorageResult};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone)]
struct MemoryEntry {
    value: String,
    expires_at: Option<DateTime<Utc>>,
}

impl MemoryEntry {
    fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| now >= exp)
    }
}

/// Storage backend used when no durable store is configured.
///
/// Entries live in a concurrent map for the lifetime of this instance.
/// Expiry is checked on read: an expired entry is evicted and reported as
/// absent. Nothing is persisted across restarts.
pub struct MemoryStorage {
    entries: DashMap<String, MemoryEntry>,
    clock: Arc<dyn Clock>,
}

impl MemoryStorage {
    /// Creates an empty store driven by the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an empty store that reads time from `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        debug!("Using MemoryStorage (in-process, non-durable)");
        Self {
            entries: DashMap::new(),
            clock,
        }
    }

    /// Number of entries currently held, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Absolute expiry `ttl` seconds from now.
    ///
    /// Fails for TTLs that do not fit a timestamp, the same way Redis
    /// refuses an out-of-range `SETEX`.
    fn expiry_after(&self, ttl: u64) -> StorageResult<DateTime<Utc>> {
        i64::try_from(ttl)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|ttl| self.clock.now().checked_add_signed(ttl))
            .ok_or_else(|| StorageError::Operation(format!("TTL out of range: {}s", ttl)))
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let now = self.clock.now();

        match self.entries.get(key) {
            None => return Ok(None),
            Some(entry) if !entry.is_expired_at(now) => return Ok(Some(entry.value.clone())),
            Some(_) => {}
        }

        // A concurrent put may have replaced the entry since the read above.
        if self
            .entries
            .remove_if(key, |_, entry| entry.is_expired_at(now))
            .is_some()
        {
            debug!("Evicted expired entry {}", key);
        }

        Ok(None)
    }

    async fn put(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> StorageResult<()> {
        let expires_at = match ttl_seconds {
            Some(ttl) => Some(self.expiry_after(ttl)?),
            None => None,
        };

        self.entries.insert(
            key.to_string(),
            MemoryEntry {
                value: value.to_string(),
                expires_at,
            },
        );

        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
