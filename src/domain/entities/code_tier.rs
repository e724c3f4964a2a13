//! Short code alphabet and allocation tiers.
//!
//! Codes are RFC 4648 base32 symbols (`A-Z`, `2-7`), five bits each. A tier
//! fixes the code length; the random byte budget is derived from the length
//! so every symbol is backed by full entropy:
//!
//! | Tier | Length | Bytes | Bits drawn | Bits needed |
//! |------|--------|-------|------------|-------------|
//! | 1    | 4      | 3     | 24         | 20          |
//! | 2    | 5      | 4     | 32         | 25          |
//! | 3    | 6      | 4     | 32         | 30          |

/// The 32-symbol code alphabet, indexed by 5-bit value.
pub const CODE_ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Bits carried by one code symbol.
pub const BITS_PER_SYMBOL: usize = 5;

/// Draws attempted in a tier before escalating to the next one.
pub const ATTEMPTS_PER_TIER: usize = 10;

/// Escalation order used for every allocation.
pub const CODE_TIERS: [CodeTier; 3] = [
    CodeTier::for_length(4),
    CodeTier::for_length(5),
    CodeTier::for_length(6),
];

/// One escalation level: a code length plus the random bytes drawn per code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeTier {
    pub length: usize,
    pub byte_count: usize,
}

impl CodeTier {
    /// Builds a tier whose byte budget is `ceil(length * 5 / 8)`.
    pub const fn for_length(length: usize) -> Self {
        Self {
            length,
            byte_count: (length * BITS_PER_SYMBOL).div_ceil(8),
        }
    }
}

/// Shortest code any tier produces.
pub const MIN_CODE_LENGTH: usize = CODE_TIERS[0].length;

/// Longest code any tier produces.
pub const MAX_CODE_LENGTH: usize = CODE_TIERS[CODE_TIERS.len() - 1].length;

/// Returns true if `code` could have been produced by the allocator.
pub fn is_valid_code(code: &str) -> bool {
    (MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&code.len())
        && code.bytes().all(|b| CODE_ALPHABET.contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_byte_counts() {
        assert_eq!(CODE_TIERS[0], CodeTier { length: 4, byte_count: 3 });
        assert_eq!(CODE_TIERS[1], CodeTier { length: 5, byte_count: 4 });
        assert_eq!(CODE_TIERS[2], CodeTier { length: 6, byte_count: 4 });
    }

    #[test]
    fn test_every_tier_has_enough_entropy() {
        for tier in CODE_TIERS {
            assert!(tier.byte_count * 8 >= tier.length * BITS_PER_SYMBOL);
        }
    }

    #[test]
    fn test_valid_codes() {
        assert!(is_valid_code("ABCD"));
        assert!(is_valid_code("Z2345"));
        assert!(is_valid_code("AAAA77"));
    }

    #[test]
    fn test_invalid_codes() {
        assert!(!is_valid_code("ABC"));
        assert!(!is_valid_code("ABCDEFG"));
        assert!(!is_valid_code("abcd"));
        assert!(!is_valid_code("AB01"));
        assert!(!is_valid_code("AB89"));
        assert!(!is_valid_code(""));
    }
}
