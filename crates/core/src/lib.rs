#![warn(missing_docs)]
//! Core value types shared across the workspace.

pub mod mode;
pub mod registry;
pub mod stack;

pub use mode::{SlotMode, UnknownSlotMode};
pub use registry::{KindDef, KindKey, KindKeyError, KindRegistry, RegistryError, DEFAULT_NAMESPACE};
pub use stack::{KindId, ResourceStack, StackMeta};
