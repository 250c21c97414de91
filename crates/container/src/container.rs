//! Fixed-size slot container.
//!
//! A [`SlotContainer`] owns an ordered array of slots. Each slot holds exactly
//! one [`ResourceStack`] (possibly the empty sentinel) and a [`SlotMode`].
//! Insertion and extraction never fail for lack of room: whatever cannot be
//! placed comes back to the caller as a leftover stack.

use std::ops::{Bound, RangeBounds};
use std::sync::Arc;

use stockpile_core::{ResourceStack, SlotMode};
use tracing::debug;

use crate::error::ContainerError;
use crate::hooks::{Hooks, SlotChange};

/// Ordered, fixed-size array of resource slots.
///
/// The slot count only changes through [`SlotContainer::resize`] (or
/// [`SlotContainer::load`], which resizes), and a resize always discards
/// the previous contents and modes.
#[derive(Debug, Clone, Default)]
pub struct SlotContainer {
    stacks: Vec<ResourceStack>,
    modes: Vec<SlotMode>,
    hooks: Hooks,
}

impl SlotContainer {
    /// Create a container with `size` empty slots in [`SlotMode::Both`].
    pub fn new(size: usize) -> Self {
        Self {
            stacks: vec![ResourceStack::empty(); size],
            modes: vec![SlotMode::Both; size],
            hooks: Hooks::default(),
        }
    }

    /// Create a container pre-filled with `stacks`, one slot per stack.
    pub fn from_stacks(stacks: Vec<ResourceStack>) -> Self {
        let stacks: Vec<ResourceStack> = stacks.into_iter().map(canonical).collect();
        let modes = vec![SlotMode::Both; stacks.len()];
        Self {
            stacks,
            modes,
            hooks: Hooks::default(),
        }
    }

    /// Install the validity predicate.
    pub fn with_validator<F>(mut self, validity: F) -> Self
    where
        F: Fn(usize, &ResourceStack) -> bool + Send + Sync + 'static,
    {
        self.hooks.set_validity(Arc::new(validity));
        self
    }

    /// Install the per-slot capacity override.
    pub fn with_slot_limit<F>(mut self, slot_limit: F) -> Self
    where
        F: Fn(usize) -> Option<u32> + Send + Sync + 'static,
    {
        self.hooks.set_slot_limit(Arc::new(slot_limit));
        self
    }

    /// Register a change observer (builder form of [`SlotContainer::add_observer`]).
    pub fn with_observer<F>(mut self, observer: F) -> Self
    where
        F: Fn(SlotChange) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.add_observer(observer);
        self
    }

    /// Append a change observer. Observers run in registration order.
    pub fn add_observer<F>(&mut self, observer: F)
    where
        F: Fn(SlotChange) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.hooks.push_observer(Arc::new(observer));
    }

    /// Drop every registered observer.
    pub fn clear_observers(&mut self) {
        self.hooks.clear_observers();
    }

    /// Number of registered observers.
    pub fn observer_count(&self) -> usize {
        self.hooks.observer_count()
    }

    /// Number of slots.
    pub fn slot_count(&self) -> usize {
        self.stacks.len()
    }

    /// True when every slot holds the empty sentinel.
    pub fn is_empty(&self) -> bool {
        self.stacks.iter().all(ResourceStack::is_empty)
    }

    /// All slot contents in index order.
    pub fn stacks(&self) -> &[ResourceStack] {
        &self.stacks
    }

    /// All slot modes in index order.
    pub fn modes(&self) -> &[SlotMode] {
        &self.modes
    }

    /// Contents of `slot`.
    pub fn stack(&self, slot: usize) -> Result<&ResourceStack, ContainerError> {
        self.check_slot(slot)?;
        Ok(&self.stacks[slot])
    }

    /// Mode of `slot`.
    pub fn mode(&self, slot: usize) -> Result<SlotMode, ContainerError> {
        self.check_slot(slot)?;
        Ok(self.modes[slot])
    }

    /// Change the mode of `slot`.
    pub fn set_mode(&mut self, slot: usize, mode: SlotMode) -> Result<(), ContainerError> {
        self.check_slot(slot)?;
        self.modes[slot] = mode;
        Ok(())
    }

    /// Slots tagged [`SlotMode::Output`], with their indices.
    pub fn output_slots(&self) -> impl Iterator<Item = (usize, &ResourceStack)> + '_ {
        self.stacks
            .iter()
            .zip(&self.modes)
            .enumerate()
            .filter(|(_, (_, mode))| **mode == SlotMode::Output)
            .map(|(slot, (stack, _))| (slot, stack))
    }

    /// Overwrite `slot` with `stack` and notify observers.
    ///
    /// Bypasses the validity predicate and capacity limits.
    pub fn set_stack(
        &mut self,
        slot: usize,
        stack: ResourceStack,
        user: bool,
    ) -> Result<(), ContainerError> {
        self.check_slot(slot)?;
        self.stacks[slot] = canonical(stack);
        self.hooks.notify(SlotChange { slot, user });
        Ok(())
    }

    /// Resize to `size` slots, discarding all contents and resetting all modes.
    pub fn resize(&mut self, size: usize) {
        debug!(from = self.stacks.len(), to = size, "resizing slot container");
        self.stacks = vec![ResourceStack::empty(); size];
        self.modes = vec![SlotMode::Both; size];
    }

    /// Capacity of `slot`.
    ///
    /// Returns the slot-limit override when one is set, otherwise the
    /// occupant's kind ceiling. `None` means the slot is empty with no
    /// override; callers then use the candidate stack's own ceiling.
    pub fn item_limit(&self, slot: usize) -> Result<Option<u32>, ContainerError> {
        self.check_slot(slot)?;
        Ok(self.limit_of(slot))
    }

    /// Try to place `stack` into `slot`, returning what did not fit.
    ///
    /// With `simulate` set, the returned leftover is exactly what a real
    /// insert would return, and the container is left untouched.
    pub fn insert(
        &mut self,
        slot: usize,
        stack: ResourceStack,
        simulate: bool,
        user: bool,
    ) -> Result<ResourceStack, ContainerError> {
        self.check_slot(slot)?;
        Ok(self.insert_at(slot, stack, simulate, user))
    }

    /// Dry-run form of [`SlotContainer::insert`] usable through a shared reference.
    pub fn simulate_insert(
        &self,
        slot: usize,
        stack: &ResourceStack,
    ) -> Result<ResourceStack, ContainerError> {
        self.check_slot(slot)?;
        Ok(match self.placement(slot, stack) {
            Some(placed) => stack.with_quantity(stack.quantity - placed),
            None => stack.clone(),
        })
    }

    /// Remove up to `amount` units from `slot`, returning what was removed.
    ///
    /// A single call removes at most one full stack (the occupant's kind
    /// ceiling), even if a slot-limit override let the slot grow beyond it.
    pub fn extract(
        &mut self,
        slot: usize,
        amount: u32,
        simulate: bool,
        user: bool,
    ) -> Result<ResourceStack, ContainerError> {
        self.check_slot(slot)?;
        if amount == 0 {
            return Ok(ResourceStack::empty());
        }

        let existing = &self.stacks[slot];
        if existing.is_empty() {
            return Ok(ResourceStack::empty());
        }

        let to_extract = amount.min(existing.max_quantity);
        if to_extract == 0 {
            return Ok(ResourceStack::empty());
        }
        if existing.quantity <= to_extract {
            let removed = existing.clone();
            if !simulate {
                self.stacks[slot] = ResourceStack::empty();
                self.hooks.notify(SlotChange { slot, user });
            }
            return Ok(removed);
        }

        let removed = existing.with_quantity(to_extract);
        if !simulate {
            self.stacks[slot].quantity -= to_extract;
            self.hooks.notify(SlotChange { slot, user });
        }
        Ok(removed)
    }

    /// Spread `stack` across the slots in `range`, updating it to the remainder.
    ///
    /// Only [`SlotMode::Both`] and [`SlotMode::Output`] slots are targeted.
    /// The first pass tops up matching stacks that still have room; the
    /// second pass fills whatever remains eligible, including empty slots.
    /// The range is clamped to the container.
    pub fn bulk_insert<R>(&mut self, stack: &mut ResourceStack, range: R)
    where
        R: RangeBounds<usize>,
    {
        let len = self.stacks.len();
        let end = match range.end_bound() {
            Bound::Included(&end) => end.saturating_add(1),
            Bound::Excluded(&end) => end,
            Bound::Unbounded => len,
        }
        .min(len);
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start.saturating_add(1),
            Bound::Unbounded => 0,
        }
        .min(end);

        if stack.is_empty() {
            return;
        }

        for slot in start..end {
            if !self.modes[slot].accepts_bulk_insert() || !self.can_top_up(slot, stack) {
                continue;
            }
            *stack = self.insert_at(slot, std::mem::take(stack), false, false);
            if stack.is_empty() {
                return;
            }
        }

        for slot in start..end {
            if !self.modes[slot].accepts_bulk_insert() {
                continue;
            }
            *stack = self.insert_at(slot, std::mem::take(stack), false, false);
            if stack.is_empty() {
                return;
            }
        }
    }

    /// [`SlotContainer::bulk_insert`] over every slot.
    pub fn bulk_insert_all(&mut self, stack: &mut ResourceStack) {
        self.bulk_insert(stack, ..);
    }

    fn check_slot(&self, slot: usize) -> Result<(), ContainerError> {
        if slot >= self.stacks.len() {
            return Err(ContainerError::IndexOutOfRange {
                slot,
                len: self.stacks.len(),
            });
        }
        Ok(())
    }

    fn limit_of(&self, slot: usize) -> Option<u32> {
        self.hooks.slot_limit(slot).or_else(|| {
            let existing = &self.stacks[slot];
            (!existing.is_empty()).then_some(existing.max_quantity)
        })
    }

    fn can_top_up(&self, slot: usize, stack: &ResourceStack) -> bool {
        let existing = &self.stacks[slot];
        if existing.is_empty() || !existing.matches(stack) {
            return false;
        }
        let limit = self.limit_of(slot).unwrap_or(existing.max_quantity);
        existing.quantity < limit
    }

    /// How many units of `stack` `slot` would accept, or `None` if it takes nothing.
    fn placement(&self, slot: usize, stack: &ResourceStack) -> Option<u32> {
        if stack.is_empty() || !self.hooks.is_valid(slot, stack) {
            return None;
        }

        let existing = &self.stacks[slot];
        let mut room = self.limit_of(slot).unwrap_or(stack.max_quantity);
        if !existing.is_empty() {
            if !existing.matches(stack) {
                return None;
            }
            room = room.saturating_sub(existing.quantity);
        }

        (room > 0).then(|| stack.quantity.min(room))
    }

    fn insert_at(
        &mut self,
        slot: usize,
        stack: ResourceStack,
        simulate: bool,
        user: bool,
    ) -> ResourceStack {
        let Some(placed) = self.placement(slot, &stack) else {
            return stack;
        };

        let leftover = stack.with_quantity(stack.quantity - placed);
        if !simulate {
            if self.stacks[slot].is_empty() {
                self.stacks[slot] = stack.with_quantity(placed);
            } else {
                self.stacks[slot].grow(placed);
            }
            self.hooks.notify(SlotChange { slot, user });
        }
        leftover
    }

    pub(crate) fn restore_slot(&mut self, slot: usize, stack: ResourceStack, mode: SlotMode) {
        self.stacks[slot] = canonical(stack);
        self.modes[slot] = mode;
    }
}

fn canonical(stack: ResourceStack) -> ResourceStack {
    if stack.is_empty() {
        ResourceStack::empty()
    } else {
        stack
    }
}
