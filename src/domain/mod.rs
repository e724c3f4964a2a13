//! Domain layer: entities, the storage contract, and the time source.
//!
//! - [`entities`] - Short link record and code tier table
//! - [`storage`] - [`storage::Storage`] trait implemented by the infrastructure layer
//! - [`clock`] - [`clock::Clock`] abstraction used for timestamps and expiry
//!
//! The domain layer does not depend on infrastructure or HTTP types.

pub mod clock;
pub mod entities;
pub mod storage;

pub use clock::{Clock, ManualClock, SystemClock};
pub use storage::{Storage, StorageError, StorageResult};

#[cfg(test)]
pub use storage::MockStorage;
