//! Core domain entities.
//!
//! - [`ShortLinkRecord`] - the value persisted under each short code
//! - [`CodeTier`] - one escalation level of code allocation

pub mod code_tier;
pub mod short_link;

pub use code_tier::{ATTEMPTS_PER_TIER, CODE_ALPHABET, CODE_TIERS, CodeTier, is_valid_code};
pub use short_link::{CODE_KEY_PREFIX, LINK_TTL_SECONDS, ShortLinkRecord, storage_key};
