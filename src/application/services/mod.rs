//! Business logic services for the application layer.

pub mod redirect_resolver;
pub mod shorten_service;

pub use redirect_resolver::RedirectResolver;
pub use shorten_service::{ShortenService, ShortenedLink};
