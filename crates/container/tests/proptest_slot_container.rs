//! Property-based tests for slot container mechanics
//!
//! Validates container invariants:
//! - Simulated inserts are repeatable and never mutate
//! - Per-kind totals are conserved across inserts and extracts
//! - Slot quantities never exceed their effective limit after an insert
//! - Save/load and binary snapshots reproduce slots and modes

use proptest::prelude::*;
use std::collections::BTreeMap;
use stockpile_container::SlotContainer;
use stockpile_core::{KindId, ResourceStack, SlotMode};

const SLOTS: usize = 5;
const OVERRIDE_SLOT: usize = 0;
const OVERRIDE_LIMIT: u32 = 30;

fn max_for(kind: u32) -> u32 {
    match kind {
        1 => 16,
        2 => 50,
        _ => 99,
    }
}

fn stack(kind: u32, quantity: u32) -> ResourceStack {
    ResourceStack::new(KindId(kind), quantity, max_for(kind))
}

fn container() -> SlotContainer {
    SlotContainer::new(SLOTS)
        .with_slot_limit(|slot| (slot == OVERRIDE_SLOT).then_some(OVERRIDE_LIMIT))
}

fn effective_limit(slot: usize, stack: &ResourceStack) -> u32 {
    if slot == OVERRIDE_SLOT {
        OVERRIDE_LIMIT
    } else {
        stack.max_quantity
    }
}

#[derive(Debug, Clone)]
enum Op {
    Insert { slot: usize, kind: u32, quantity: u32 },
    Extract { slot: usize, amount: u32 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..SLOTS, 1u32..4, 0u32..120).prop_map(|(slot, kind, quantity)| Op::Insert {
            slot,
            kind,
            quantity
        }),
        (0..SLOTS, 0u32..120).prop_map(|(slot, amount)| Op::Extract { slot, amount }),
    ]
}

fn mode_strategy() -> impl Strategy<Value = SlotMode> {
    prop_oneof![
        Just(SlotMode::Both),
        Just(SlotMode::Input),
        Just(SlotMode::Output),
        Just(SlotMode::Locked),
    ]
}

fn totals(container: &SlotContainer) -> BTreeMap<KindId, u64> {
    let mut totals = BTreeMap::new();
    for stack in container.stacks().iter().filter(|stack| !stack.is_empty()) {
        *totals.entry(stack.kind).or_insert(0) += u64::from(stack.quantity);
    }
    totals
}

proptest! {
    /// Property: Simulated inserts are idempotent
    ///
    /// Repeating a dry-run insert returns the same leftover every time and
    /// leaves the slots exactly as they were.
    #[test]
    fn simulate_is_idempotent(
        ops in prop::collection::vec(op_strategy(), 0..20),
        slot in 0..SLOTS,
        kind in 1u32..4,
        quantity in 0u32..150,
    ) {
        let mut container = container();
        for op in ops {
            match op {
                Op::Insert { slot, kind, quantity } => {
                    container.insert(slot, stack(kind, quantity), false, false).unwrap();
                }
                Op::Extract { slot, amount } => {
                    container.extract(slot, amount, false, false).unwrap();
                }
            }
        }

        let before = container.stacks().to_vec();
        let first = container.insert(slot, stack(kind, quantity), true, false).unwrap();
        for _ in 0..3 {
            let again = container.insert(slot, stack(kind, quantity), true, false).unwrap();
            prop_assert_eq!(&again, &first);
        }
        prop_assert_eq!(container.stacks(), before.as_slice());

        let real = container.insert(slot, stack(kind, quantity), false, false).unwrap();
        prop_assert_eq!(real, first);
    }

    /// Property: Inserts and extracts conserve per-kind totals
    ///
    /// What the container holds equals everything placed minus everything removed.
    #[test]
    fn operations_conserve_totals(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let mut container = container();
        let mut expected: BTreeMap<KindId, i64> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert { slot, kind, quantity } => {
                    let leftover = container.insert(slot, stack(kind, quantity), false, false).unwrap();
                    let placed = quantity - leftover.quantity;
                    *expected.entry(KindId(kind)).or_insert(0) += i64::from(placed);
                }
                Op::Extract { slot, amount } => {
                    let removed = container.extract(slot, amount, false, false).unwrap();
                    prop_assert!(removed.quantity <= amount);
                    if !removed.is_empty() {
                        *expected.entry(removed.kind).or_insert(0) -= i64::from(removed.quantity);
                    }
                }
            }
        }

        let actual = totals(&container);
        for (kind, count) in expected {
            prop_assert_eq!(actual.get(&kind).copied().unwrap_or(0) as i64, count);
        }
    }

    /// Property: Inserts never push a slot past its effective limit
    #[test]
    fn inserts_respect_capacity(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let mut container = container();

        for op in ops {
            match op {
                Op::Insert { slot, kind, quantity } => {
                    container.insert(slot, stack(kind, quantity), false, false).unwrap();
                    for (index, held) in container.stacks().iter().enumerate() {
                        if !held.is_empty() {
                            prop_assert!(
                                held.quantity <= effective_limit(index, held),
                                "slot {} holds {} over limit {}",
                                index,
                                held.quantity,
                                effective_limit(index, held)
                            );
                        }
                    }
                }
                Op::Extract { slot, amount } => {
                    container.extract(slot, amount, false, false).unwrap();
                }
            }
        }
    }

    /// Property: Bulk insert only ever places into Both/Output slots
    #[test]
    fn bulk_insert_honors_modes(
        modes in prop::collection::vec(mode_strategy(), SLOTS),
        kind in 1u32..4,
        quantity in 1u32..400,
    ) {
        let mut container = container();
        for (slot, mode) in modes.iter().enumerate() {
            container.set_mode(slot, *mode).unwrap();
        }

        let mut remaining = stack(kind, quantity);
        container.bulk_insert_all(&mut remaining);

        let mut placed = 0;
        for (slot, held) in container.stacks().iter().enumerate() {
            if !modes[slot].accepts_bulk_insert() {
                prop_assert!(held.is_empty());
            }
            placed += held.quantity;
        }
        prop_assert_eq!(placed + remaining.quantity, quantity);
    }

    /// Property: Save/load reproduces slots and modes
    #[test]
    fn save_load_roundtrip(
        contents in prop::collection::vec((0u32..4, 0u32..100, mode_strategy()), 0..12),
    ) {
        let mut original = SlotContainer::new(contents.len());
        for (slot, (kind, quantity, mode)) in contents.iter().enumerate() {
            original.set_stack(slot, stack(*kind, *quantity), false).unwrap();
            original.set_mode(slot, *mode).unwrap();
        }

        let restored = SlotContainer::from_data(&original.save()).unwrap();
        prop_assert_eq!(restored.stacks(), original.stacks());
        prop_assert_eq!(restored.modes(), original.modes());

        let restored = SlotContainer::from_bytes(&original.to_bytes().unwrap()).unwrap();
        prop_assert_eq!(restored.stacks(), original.stacks());
        prop_assert_eq!(restored.modes(), original.modes());
    }

    /// Property: Arbitrary bytes never panic the snapshot reader
    #[test]
    fn arbitrary_bytes_dont_crash(random_bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let mut target = container();
        let _ = target.load_bytes(&random_bytes);
    }
}
