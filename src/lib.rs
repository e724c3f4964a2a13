//! # Shortener
//!
//! A small URL shortening service built with Axum and Redis.
//!
//! `POST /api/shorten` (or `GET /api/shorten?u=...`) stores a long http(s) URL
//! under a short base32 code for 90 days; `GET /s/{code}` redirects to it.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Short link records, code tiers, storage and clock traits
//! - **Application Layer** ([`application`]) - Shortening and redirect resolution
//! - **Infrastructure Layer** ([`infrastructure`]) - Redis and in-memory storage backends
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//! - **Utilities** ([`utils`]) - Code generation, allocation, URL and origin checks
//!
//! ## Code allocation
//!
//! Codes are drawn from OS randomness and probed against storage in tiers of
//! increasing length (4, 5, then 6 characters, ten attempts each). A request
//! fails only after all thirty candidates collide.
//!
//! ## Quick Start
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379/0"  # Optional, in-memory otherwise
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod logging;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{RedirectResolver, ShortenService, ShortenedLink};
    pub use crate::domain::entities::ShortLinkRecord;
    pub use crate::domain::{Clock, ManualClock, Storage, SystemClock};
    pub use crate::error::AppError;
    pub use crate::infrastructure::storage::{MemoryStorage, RedisStorage};
    pub use crate::state::AppState;
}
