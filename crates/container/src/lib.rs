#![warn(missing_docs)]
//! Slot containers: fixed-size resource storage with capacity rules,
//! validity predicates, change observers, and persistence.

mod container;
mod error;
mod hooks;
mod persist;
mod snapshot;

pub use container::SlotContainer;
pub use error::{ContainerError, SnapshotError};
pub use hooks::{ObserverFn, SlotChange, SlotLimitFn, ValidityFn};
pub use persist::{ContainerData, SlotEntry, MAX_SLOTS};
pub use snapshot::{decode_snapshot, encode_snapshot};
