//! Application layer services implementing business logic.
//!
//! Services consume the [`crate::domain::storage::Storage`] trait and never
//! reference a concrete backend; the backend is injected at construction.
//!
//! # Available Services
//!
//! - [`services::shorten_service::ShortenService`] - URL validation, code allocation, persistence
//! - [`services::redirect_resolver::RedirectResolver`] - Code lookup and record decoding

pub mod services;
