//! Cross-container availability and ordered extraction.

use std::collections::BTreeMap;

use stockpile_container::SlotContainer;
use stockpile_core::KindId;
use tracing::{debug, trace};

use crate::matcher::KindMatcher;

/// Sum every non-empty slot's quantity per kind across `containers`.
pub fn compute_availability<'a, I>(containers: I) -> BTreeMap<KindId, u64>
where
    I: IntoIterator<Item = &'a SlotContainer>,
{
    let mut totals = BTreeMap::new();
    for container in containers {
        for stack in container.stacks().iter().filter(|stack| !stack.is_empty()) {
            *totals.entry(stack.kind).or_insert(0) += u64::from(stack.quantity);
        }
    }
    totals
}

/// Total quantity across `containers` that `matcher` accepts for `requested`.
pub fn available<'a, I, M>(containers: I, requested: KindId, matcher: &M) -> u64
where
    I: IntoIterator<Item = &'a SlotContainer>,
    M: KindMatcher + ?Sized,
{
    containers
        .into_iter()
        .flat_map(|container| container.stacks())
        .filter(|stack| !stack.is_empty() && matcher.matches(stack.kind, requested))
        .map(|stack| u64::from(stack.quantity))
        .sum()
}

/// Remove up to `amount` units of `requested` across `containers`.
///
/// Containers are drained in iteration order (primary first), slots in
/// ascending index order. Returns the amount left unfulfilled. Extractions
/// already made are not rolled back when the total falls short.
pub fn extract_across<'a, I, M>(
    containers: I,
    requested: KindId,
    matcher: &M,
    amount: u32,
    user: bool,
) -> u32
where
    I: IntoIterator<Item = &'a mut SlotContainer>,
    M: KindMatcher + ?Sized,
{
    let mut remaining = amount;

    'containers: for (index, container) in containers.into_iter().enumerate() {
        for slot in 0..container.slot_count() {
            if remaining == 0 {
                break 'containers;
            }
            remaining -= drain_slot(container, slot, requested, matcher, remaining, user);
            trace!(container = index, slot, remaining, "drained slot");
        }
    }

    if remaining > 0 {
        debug!(
            %requested,
            amount,
            unfulfilled = remaining,
            "sources exhausted before request was met"
        );
    }
    remaining
}

/// Pull up to `want` matching units out of one slot.
///
/// A single extract is capped at the occupant's kind ceiling, so slots grown
/// past it by a limit override take several calls.
fn drain_slot<M>(
    container: &mut SlotContainer,
    slot: usize,
    requested: KindId,
    matcher: &M,
    want: u32,
    user: bool,
) -> u32
where
    M: KindMatcher + ?Sized,
{
    let mut taken = 0;
    while taken < want {
        let Ok(held) = container.stack(slot) else {
            break;
        };
        if held.is_empty() || !matcher.matches(held.kind, requested) {
            break;
        }

        let take = (want - taken).min(held.quantity);
        let Ok(removed) = container.extract(slot, take, false, user) else {
            break;
        };
        if removed.is_empty() {
            break;
        }
        taken += removed.quantity;
    }
    taken
}
