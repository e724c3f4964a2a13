//! Infrastructure layer for external integrations.
//!
//! Provides the concrete storage backends behind the domain
//! [`crate::domain::storage::Storage`] trait.
//!
//! # Modules
//!
//! - [`storage`] - Redis and in-process storage implementations

pub mod storage;
