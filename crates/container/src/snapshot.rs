//! Compact binary snapshots of a container.
//!
//! A snapshot is a 14-byte header followed by a bincode payload holding the
//! same [`ContainerData`] layout as [`SlotContainer::save`]. The header
//! carries a CRC32 of the payload so truncated or corrupted blobs are
//! rejected before decoding.

use crc32fast::Hasher;

use crate::container::SlotContainer;
use crate::error::{ContainerError, SnapshotError};
use crate::persist::ContainerData;

/// Magic number for snapshot identification ("STPK").
const SNAPSHOT_MAGIC: u32 = 0x5354_504B;

/// Current snapshot format version.
const SNAPSHOT_VERSION: u16 = 1;

const HEADER_LEN: usize = 14;

#[derive(Debug, Clone, Copy)]
struct SnapshotHeader {
    magic: u32,
    version: u16,
    crc32: u32,
    payload_len: u32,
}

impl SnapshotHeader {
    fn new(crc32: u32, payload_len: u32) -> Self {
        Self {
            magic: SNAPSHOT_MAGIC,
            version: SNAPSHOT_VERSION,
            crc32,
            payload_len,
        }
    }

    fn to_bytes(self) -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];
        bytes[0..4].copy_from_slice(&self.magic.to_le_bytes());
        bytes[4..6].copy_from_slice(&self.version.to_le_bytes());
        bytes[6..10].copy_from_slice(&self.crc32.to_le_bytes());
        bytes[10..14].copy_from_slice(&self.payload_len.to_le_bytes());
        bytes
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        if bytes.len() < HEADER_LEN {
            return Err(SnapshotError::TooShort(bytes.len()));
        }

        let magic = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        if magic != SNAPSHOT_MAGIC {
            return Err(SnapshotError::BadMagic {
                expected: SNAPSHOT_MAGIC,
                found: magic,
            });
        }

        let version = u16::from_le_bytes([bytes[4], bytes[5]]);
        if version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(version));
        }

        Ok(Self {
            magic,
            version,
            crc32: u32::from_le_bytes([bytes[6], bytes[7], bytes[8], bytes[9]]),
            payload_len: u32::from_le_bytes([bytes[10], bytes[11], bytes[12], bytes[13]]),
        })
    }
}

fn checksum(payload: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(payload);
    hasher.finalize()
}

/// Decode a snapshot frame into its logical layout.
pub fn decode_snapshot(bytes: &[u8]) -> Result<ContainerData, ContainerError> {
    let header = SnapshotHeader::from_bytes(bytes)?;
    let payload = &bytes[HEADER_LEN..];

    if payload.len() != header.payload_len as usize {
        return Err(SnapshotError::LengthMismatch {
            expected: header.payload_len as usize,
            actual: payload.len(),
        }
        .into());
    }

    let actual = checksum(payload);
    if actual != header.crc32 {
        return Err(SnapshotError::ChecksumMismatch {
            expected: header.crc32,
            actual,
        }
        .into());
    }

    let data: ContainerData = bincode::deserialize(payload)?;
    data.validate()?;
    Ok(data)
}

/// Encode a logical layout as a snapshot frame.
pub fn encode_snapshot(data: &ContainerData) -> Result<Vec<u8>, ContainerError> {
    let payload = bincode::serialize(data)?;
    let header = SnapshotHeader::new(checksum(&payload), payload.len() as u32);

    let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
    bytes.extend_from_slice(&header.to_bytes());
    bytes.extend_from_slice(&payload);
    Ok(bytes)
}

impl SlotContainer {
    /// Serialize the container into a binary snapshot.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ContainerError> {
        encode_snapshot(&self.save())
    }

    /// Replace the container's contents from a binary snapshot.
    ///
    /// The container is left untouched when the snapshot is rejected.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<(), ContainerError> {
        self.load(&decode_snapshot(bytes)?)
    }

    /// Build a fresh container (without hooks) from a binary snapshot.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ContainerError> {
        Self::from_data(&decode_snapshot(bytes)?)
    }
}
