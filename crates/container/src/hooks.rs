//! Pluggable per-container strategies: validity, slot limits, change observers.
//!
//! Strategies are held behind `Arc`, so cloning a container shares them with
//! the clone. They are expected to be stateless (or to manage their own
//! interior state); nothing here deep-copies captured data.

use std::fmt;
use std::sync::Arc;

use stockpile_core::ResourceStack;
use tracing::warn;

/// Decides whether a stack may be placed into a slot.
pub type ValidityFn = dyn Fn(usize, &ResourceStack) -> bool + Send + Sync;

/// Per-slot capacity override. `None` means "use the kind ceiling".
pub type SlotLimitFn = dyn Fn(usize) -> Option<u32> + Send + Sync;

/// Observer notified after a slot's contents change.
pub type ObserverFn = dyn Fn(SlotChange) -> anyhow::Result<()> + Send + Sync;

/// Payload delivered to change observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotChange {
    /// Slot whose contents changed.
    pub slot: usize,
    /// True when the change was caused by direct user interaction.
    pub user: bool,
}

#[derive(Clone, Default)]
pub(crate) struct Hooks {
    validity: Option<Arc<ValidityFn>>,
    slot_limit: Option<Arc<SlotLimitFn>>,
    observers: Vec<Arc<ObserverFn>>,
}

impl Hooks {
    pub(crate) fn set_validity(&mut self, validity: Arc<ValidityFn>) {
        self.validity = Some(validity);
    }

    pub(crate) fn set_slot_limit(&mut self, slot_limit: Arc<SlotLimitFn>) {
        self.slot_limit = Some(slot_limit);
    }

    pub(crate) fn push_observer(&mut self, observer: Arc<ObserverFn>) {
        self.observers.push(observer);
    }

    pub(crate) fn clear_observers(&mut self) {
        self.observers.clear();
    }

    pub(crate) fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub(crate) fn is_valid(&self, slot: usize, stack: &ResourceStack) -> bool {
        self.validity
            .as_ref()
            .map_or(true, |validity| validity(slot, stack))
    }

    pub(crate) fn slot_limit(&self, slot: usize) -> Option<u32> {
        self.slot_limit.as_ref().and_then(|limit| limit(slot))
    }

    /// Run every observer in registration order.
    ///
    /// A failing observer is logged and the remaining observers still run.
    pub(crate) fn notify(&self, change: SlotChange) {
        for (index, observer) in self.observers.iter().enumerate() {
            if let Err(err) = observer(change) {
                warn!(
                    observer = index,
                    slot = change.slot,
                    user = change.user,
                    "slot observer failed: {err:#}"
                );
            }
        }
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("validity", &self.validity.is_some())
            .field("slot_limit", &self.slot_limit.is_some())
            .field("observers", &self.observers.len())
            .finish()
    }
}
