#![warn(missing_docs)]
//! Slot-based resource storage with cross-container crafting aggregation.
//!
//! The member crates carry the engine; this crate re-exports them behind one
//! path and adds configuration and logging setup for hosts.

pub mod config;

pub use config::StockpileConfig;

pub use stockpile_container::{
    decode_snapshot, encode_snapshot, ContainerData, ContainerError, ObserverFn, SlotChange,
    SlotContainer, SlotEntry, SlotLimitFn, SnapshotError, ValidityFn, MAX_SLOTS,
};
pub use stockpile_core::{
    KindDef, KindId, KindKey, KindKeyError, KindRegistry, RegistryError, ResourceStack,
    SlotMode, StackMeta, UnknownSlotMode, DEFAULT_NAMESPACE,
};
pub use stockpile_crafting::{
    available, compute_availability, extract_across, reserve, CraftError, CraftingContext,
    CraftingSource, ExactKind, Ingredient, KindMatcher, Reachable, Reservation, SourceDiscovery,
    SubstitutionGroups,
};

use tracing_subscriber::EnvFilter;

/// Install a global `fmt` subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` (typically
/// [`StockpileConfig::log_filter`]) is used. Fails if a global subscriber is
/// already installed.
pub fn init_tracing(default_filter: &str) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to install tracing subscriber: {err}"))
}
