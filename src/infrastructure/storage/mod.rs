//! Storage backends for short link records.
//!
//! Implements [`crate::domain::storage::Storage`] twice:
//! - [`RedisStorage`] - durable Redis store with native key expiry
//! - [`MemoryStorage`] - in-process fallback with lazy expiry checks

mod memory_storage;
mod redis_storage;

pub use memory_storage::MemoryStorage;
pub use redis_storage::RedisStorage;
