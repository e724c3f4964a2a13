//! Redis-backed durable storage.

use crate::domain::storage::{Storage, StorageError, StorageResult};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, error, info};

/// Durable storage on Redis.
///
/// Expiry is delegated to Redis (`SETEX`), so expired keys simply stop
/// being returned by `GET`. Unlike a cache, errors are propagated to the
/// caller: a failed write means the link was not created.
pub struct RedisStorage {
    client: ConnectionManager,
}

impl RedisStorage {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Connection`] if the URL is invalid, the connection
    /// cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> StorageResult<Self> {
        info!("Connecting to Redis storage");

        let client = Client::open(redis_url).map_err(|e| {
            StorageError::Connection(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            StorageError::Connection(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| StorageError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self { client: manager })
    }
}

#[async_trait]
impl Storage for RedisStorage {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let mut conn = self.client.clone();

        match conn.get::<_, Option<String>>(key).await {
            Ok(value) => {
                debug!(
                    "Redis GET {}: {}",
                    key,
                    if value.is_some() { "hit" } else { "miss" }
                );
                Ok(value)
            }
            Err(e) => {
                error!("Redis GET error for {}: {}", key, e);
                Err(StorageError::Operation(e.to_string()))
            }
        }
    }

    async fn put(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> StorageResult<()> {
        let mut conn = self.client.clone();

        let result = match ttl_seconds {
            Some(ttl) => conn.set_ex::<_, _, ()>(key, value, ttl).await,
            None => conn.set::<_, _, ()>(key, value).await,
        };

        match result {
            Ok(()) => {
                debug!("Redis SET {} (TTL: {:?}s)", key, ttl_seconds);
                Ok(())
            }
            Err(e) => {
                error!("Redis SET error for {}: {}", key, e);
                Err(StorageError::Operation(e.to_string()))
            }
        }
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
