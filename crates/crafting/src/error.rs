use stockpile_core::KindId;
use thiserror::Error;

/// Failure to carry out a craft against a [`CraftingContext`](crate::CraftingContext).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CraftError {
    /// Not enough of an ingredient is reachable.
    #[error("insufficient {kind}: need {required}, have {available}")]
    Insufficient {
        /// Requested kind.
        kind: KindId,
        /// Total required across the ingredient list.
        required: u64,
        /// Total reachable under the matcher.
        available: u64,
    },
    /// Contents changed between reserve and commit.
    #[error("commit left {unfulfilled} of {kind} unfulfilled")]
    PartialFulfillment {
        /// Requested kind.
        kind: KindId,
        /// Units that could not be extracted.
        unfulfilled: u32,
    },
}
