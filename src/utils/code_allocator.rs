//! Tiered short code allocation.
//!
//! [`allocate`] walks the tiers in order, drawing up to `attempts_per_tier`
//! candidates per tier and accepting the first one whose existence check
//! reports it free. It knows nothing about storage: both the draw and the
//! existence check are injected, which keeps it deterministic under test.
//!
//! There is no reserve step between the existence check and the caller's
//! eventual write. Two concurrent allocations can pick the same free code;
//! the later write overwrites the earlier one with an equivalent record.

use crate::domain::entities::CodeTier;
use std::future::Future;
use tracing::{debug, warn};

/// Why [`allocate`] could not produce a code.
#[derive(Debug, thiserror::Error)]
pub enum AllocationError<E> {
    /// Every tier used up its attempt budget on taken codes.
    #[error("No free code found after {attempts} attempts")]
    Exhausted { attempts: usize },

    /// A draw or existence check failed.
    #[error("{0}")]
    Source(E),
}

/// A successfully allocated code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub code: String,
    pub tier: CodeTier,
    /// Total draws made across all tiers, including the accepted one.
    pub attempts: usize,
}

/// Allocates a code that `exists` reports as free.
///
/// Tiers are tried strictly in order and draws within a tier are sequential.
/// The first free draw wins.
///
/// # Errors
///
/// - [`AllocationError::Exhausted`] if every draw in every tier was taken
/// - [`AllocationError::Source`] if `draw` or `exists` fails; no further draws are made
pub async fn allocate<E, D, X, Fut>(
    tiers: &[CodeTier],
    attempts_per_tier: usize,
    mut exists: X,
    mut draw: D,
) -> Result<Allocation, AllocationError<E>>
where
    D: FnMut(&CodeTier) -> Result<String, E>,
    X: FnMut(&str) -> Fut,
    Fut: Future<Output = Result<bool, E>>,
{
    let mut attempts = 0;

    for (index, tier) in tiers.iter().enumerate() {
        for _ in 0..attempts_per_tier {
            attempts += 1;
            let code = draw(tier).map_err(AllocationError::Source)?;

            if !exists(code.as_str()).await.map_err(AllocationError::Source)? {
                return Ok(Allocation {
                    code,
                    tier: *tier,
                    attempts,
                });
            }

            debug!("Code collision on {} (tier {})", code, index + 1);
        }

        if index + 1 < tiers.len() {
            warn!(
                "Tier {} (length {}) exhausted after {} attempts, escalating",
                index + 1,
                tier.length,
                attempts_per_tier
            );
        }
    }

    Err(AllocationError::Exhausted { attempts })
}
