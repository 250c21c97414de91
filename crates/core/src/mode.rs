//! Per-slot behavioral tags.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Governs which automated fill operations may target a slot.
///
/// Persisted as its integer discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum SlotMode {
    /// Any bulk insert may target the slot.
    #[default]
    Both = 0,
    /// Reserved for direct manual interaction. Bulk insert skips it, same as `Locked`.
    Input = 1,
    /// Bulk insert may target the slot; also listed in the container's output view.
    Output = 2,
    /// Excluded from bulk insert.
    Locked = 3,
}

impl SlotMode {
    /// All modes in discriminant order.
    pub const ALL: [SlotMode; 4] = [
        SlotMode::Both,
        SlotMode::Input,
        SlotMode::Output,
        SlotMode::Locked,
    ];

    /// Whether bulk insert may place resources into a slot with this mode.
    pub fn accepts_bulk_insert(self) -> bool {
        matches!(self, SlotMode::Both | SlotMode::Output)
    }

    /// Decode a persisted discriminant.
    pub fn from_repr(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }
}

impl From<SlotMode> for u8 {
    fn from(mode: SlotMode) -> Self {
        mode as u8
    }
}

/// Error returned for an unknown persisted slot mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown slot mode {0}")]
pub struct UnknownSlotMode(pub u8);

impl TryFrom<u8> for SlotMode {
    type Error = UnknownSlotMode;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_repr(value).ok_or(UnknownSlotMode(value))
    }
}

impl fmt::Display for SlotMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SlotMode::Both => "both",
            SlotMode::Input => "input",
            SlotMode::Output => "output",
            SlotMode::Locked => "locked",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discriminants_roundtrip() {
        for mode in SlotMode::ALL {
            assert_eq!(SlotMode::try_from(u8::from(mode)), Ok(mode));
        }
        assert_eq!(SlotMode::try_from(4), Err(UnknownSlotMode(4)));
    }

    #[test]
    fn input_is_excluded_from_bulk_insert() {
        assert!(SlotMode::Both.accepts_bulk_insert());
        assert!(SlotMode::Output.accepts_bulk_insert());
        assert!(!SlotMode::Input.accepts_bulk_insert());
        assert!(!SlotMode::Locked.accepts_bulk_insert());
    }
}
