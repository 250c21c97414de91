//! Observer that records slot changes for later assertions.

use anyhow::{anyhow, Result};
use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError};
use stockpile_container::SlotChange;

/// Serializable copy of a [`SlotChange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChangeRecord {
    /// Slot whose contents changed.
    pub slot: usize,
    /// Whether the change was user-driven.
    pub user: bool,
}

impl From<SlotChange> for ChangeRecord {
    fn from(change: SlotChange) -> Self {
        Self {
            slot: change.slot,
            user: change.user,
        }
    }
}

/// Shared log of slot changes. Clones append to the same log.
#[derive(Debug, Clone, Default)]
pub struct ChangeRecorder {
    records: Arc<Mutex<Vec<ChangeRecord>>>,
}

impl ChangeRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Observer closure to install on a container.
    pub fn observer(&self) -> impl Fn(SlotChange) -> Result<()> + Send + Sync + 'static {
        let records = Arc::clone(&self.records);
        move |change| {
            records
                .lock()
                .map_err(|_| anyhow!("change recorder lock poisoned"))?
                .push(change.into());
            Ok(())
        }
    }

    /// Everything recorded so far, in order.
    pub fn records(&self) -> Vec<ChangeRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Slots touched so far, in order.
    pub fn slots(&self) -> Vec<usize> {
        self.records().into_iter().map(|record| record.slot).collect()
    }

    /// Forget everything recorded.
    pub fn clear(&self) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
