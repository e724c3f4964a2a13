//! Random short code generation.
//!
//! Codes are drawn from the operating system CSPRNG and rendered with the
//! RFC 4648 base32 alphabet (`A-Z2-7`), then truncated to the tier length.
//! Generated codes are not guaranteed unique; see
//! [`crate::utils::code_allocator`] for collision handling.

use crate::domain::entities::CodeTier;
use crate::domain::entities::code_tier::BITS_PER_SYMBOL;
use data_encoding::BASE32_NOPAD;

/// Draws `byte_count` random bytes and returns the first `target_length`
/// base32 symbols.
///
/// Callers must supply at least `ceil(target_length * 5 / 8)` bytes; with
/// fewer, the trailing symbol is partly zero padding and the result may be
/// shorter than `target_length`.
///
/// # Errors
///
/// Returns the OS error if the system random source is unavailable.
pub fn generate(byte_count: usize, target_length: usize) -> Result<String, getrandom::Error> {
    debug_assert!(byte_count * 8 >= target_length * BITS_PER_SYMBOL);

    let mut buffer = vec![0u8; byte_count];
    getrandom::fill(&mut buffer)?;

    let mut code = BASE32_NOPAD.encode(&buffer);
    code.truncate(target_length);
    Ok(code)
}

/// Draws one code for `tier`.
///
/// # Errors
///
/// See [`generate`].
pub fn generate_code(tier: &CodeTier) -> Result<String, getrandom::Error> {
    generate(tier.byte_count, tier.length)
}
