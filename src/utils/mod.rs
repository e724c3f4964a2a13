//! Utility functions for code generation, URL handling, and request parsing.
//!
//! - [`code_generator`] - Random base32 short code generation
//! - [`code_allocator`] - Tiered collision-avoiding code allocation
//! - [`url_validator`] - Target URL parsing and scheme checks
//! - [`request_origin`] - Origin derivation from request headers

pub mod code_allocator;
pub mod code_generator;
pub mod request_origin;
pub mod url_validator;
