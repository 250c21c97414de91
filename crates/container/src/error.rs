use thiserror::Error;

/// Errors surfaced by [`SlotContainer`](crate::SlotContainer) operations.
///
/// Running out of room or failing a validity check are not errors; those
/// outcomes come back as a non-empty leftover stack.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// A slot index outside `[0, len)` was addressed.
    #[error("slot {slot} not in valid range [0, {len})")]
    IndexOutOfRange {
        /// Requested slot.
        slot: usize,
        /// Slot count at the time of the call.
        len: usize,
    },
    /// Encoding or decoding the snapshot payload failed.
    #[error("failed to encode container payload: {0}")]
    Codec(#[from] bincode::Error),
    /// The snapshot frame is malformed.
    #[error("invalid container snapshot: {0}")]
    Snapshot(#[from] SnapshotError),
}

/// Problems detected while reading saved container data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// Fewer bytes than a header.
    #[error("snapshot header too short ({0} bytes)")]
    TooShort(usize),
    /// Magic number mismatch.
    #[error("bad snapshot magic: expected 0x{expected:08X}, got 0x{found:08X}")]
    BadMagic {
        /// Magic this build writes.
        expected: u32,
        /// Magic found in the frame.
        found: u32,
    },
    /// Frame written by an unknown format version.
    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u16),
    /// Payload length does not match the header.
    #[error("snapshot payload length mismatch: header says {expected}, found {actual}")]
    LengthMismatch {
        /// Length recorded in the header.
        expected: usize,
        /// Bytes actually present.
        actual: usize,
    },
    /// CRC32 of the payload does not match the header.
    #[error("snapshot checksum mismatch: expected 0x{expected:08X}, got 0x{actual:08X}")]
    ChecksumMismatch {
        /// Checksum recorded in the header.
        expected: u32,
        /// Checksum of the payload.
        actual: u32,
    },
    /// Saved slot count exceeds [`MAX_SLOTS`](crate::MAX_SLOTS).
    #[error("saved slot count {requested} exceeds the maximum of {max}")]
    SlotCountTooLarge {
        /// Slot count recorded in the data.
        requested: usize,
        /// Largest slot count accepted.
        max: usize,
    },
}
