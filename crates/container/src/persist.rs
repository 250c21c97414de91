//! Logical save/load layout for slot containers.

use serde::{Deserialize, Serialize};
use stockpile_core::{ResourceStack, SlotMode};
use tracing::{debug, warn};

use crate::container::SlotContainer;
use crate::error::{ContainerError, SnapshotError};

/// Largest slot count accepted from saved data.
pub const MAX_SLOTS: usize = 1 << 16;

/// Persisted container state.
///
/// `slot_count` is applied before any entry. Entries whose index falls
/// outside the restored size are dropped, which keeps old saves loadable
/// after a container grows or shrinks. There is no version field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContainerData {
    /// Slot count to restore.
    pub slot_count: usize,
    /// One entry per saved slot.
    pub entries: Vec<SlotEntry>,
}

impl ContainerData {
    /// Reject data that cannot be applied to a container.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.slot_count > MAX_SLOTS {
            return Err(SnapshotError::SlotCountTooLarge {
                requested: self.slot_count,
                max: MAX_SLOTS,
            });
        }
        Ok(())
    }
}

/// A single persisted slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotEntry {
    /// Slot index the entry belongs to.
    pub slot_index: usize,
    /// Slot contents.
    pub stack: ResourceStack,
    /// Slot mode discriminant (see [`SlotMode`]).
    pub mode: u8,
}

impl SlotContainer {
    /// Capture every slot's contents and mode.
    pub fn save(&self) -> ContainerData {
        let entries = self
            .stacks()
            .iter()
            .zip(self.modes())
            .enumerate()
            .map(|(slot_index, (stack, mode))| SlotEntry {
                slot_index,
                stack: stack.clone(),
                mode: u8::from(*mode),
            })
            .collect();

        ContainerData {
            slot_count: self.slot_count(),
            entries,
        }
    }

    /// Replace the container's contents with `data`.
    ///
    /// The container is resized first, discarding everything it held.
    /// Hooks stay installed; observers are not notified. Data rejected by
    /// [`ContainerData::validate`] leaves the container untouched.
    pub fn load(&mut self, data: &ContainerData) -> Result<(), ContainerError> {
        data.validate()?;
        self.resize(data.slot_count);

        let mut dropped = 0usize;
        for entry in &data.entries {
            if entry.slot_index >= data.slot_count {
                dropped += 1;
                continue;
            }

            let mode = SlotMode::from_repr(entry.mode).unwrap_or_else(|| {
                warn!(
                    slot = entry.slot_index,
                    mode = entry.mode,
                    "unknown slot mode in saved container, using {}",
                    SlotMode::Both
                );
                SlotMode::Both
            });
            self.restore_slot(entry.slot_index, entry.stack.clone(), mode);
        }

        if dropped > 0 {
            debug!(
                dropped,
                slot_count = data.slot_count,
                "dropped out-of-range container entries"
            );
        }
        Ok(())
    }

    /// Build a fresh container (without hooks) from saved data.
    pub fn from_data(data: &ContainerData) -> Result<Self, ContainerError> {
        let mut container = SlotContainer::default();
        container.load(data)?;
        Ok(container)
    }
}
