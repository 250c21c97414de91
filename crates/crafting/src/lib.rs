//! Cross-container crafting for stockpile.
//!
//! A crafting request sees the requesting actor's own container plus every
//! auxiliary [`CraftingSource`] the host discovers for it. Availability is a
//! plain per-kind sum; extraction drains the primary container first and then
//! each source in discovery order, slots in ascending index order.

#![warn(missing_docs)]

mod context;
mod craft;
mod engine;
mod error;
mod matcher;
mod source;

pub use context::CraftingContext;
pub use craft::{reserve, Ingredient, Reservation};
pub use engine::{available, compute_availability, extract_across};
pub use error::CraftError;
pub use matcher::{ExactKind, KindMatcher, SubstitutionGroups};
pub use source::{CraftingSource, Reachable, SourceDiscovery};
