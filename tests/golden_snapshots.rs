use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use stockpile::{
    reserve, CraftingContext, Ingredient, KindId, SlotContainer, SlotMode, StackMeta,
    SubstitutionGroups,
};
use stockpile_testkit::{
    assert_json_snapshot, container_with, kinds, quantity_at, sample_registry, ChangeRecord,
    ChangeRecorder,
};

fn snapshot_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/snapshots")
        .join(name)
}

#[test]
fn container_save_layout_snapshot() {
    let registry = sample_registry().unwrap();
    let oak = registry.stack(&"oak_wood".parse().unwrap(), 12).unwrap();
    let torch = registry
        .stack(&"torch".parse().unwrap(), 5)
        .unwrap()
        .with_meta(StackMeta {
            favorited: true,
            display_name: Some("Camp torch".into()),
        });

    let mut container = container_with(3, [(0, oak), (2, torch)]).unwrap();
    container.set_mode(1, SlotMode::Output).unwrap();
    container.set_mode(2, SlotMode::Locked).unwrap();

    assert_json_snapshot(snapshot_path("container_save_layout.json"), &container.save())
        .expect("snapshot matches");
}

#[derive(Serialize)]
struct CraftReport {
    before: BTreeMap<KindId, u64>,
    after: BTreeMap<KindId, u64>,
    primary: Vec<u32>,
    chest: Vec<u32>,
    chest_changes: Vec<ChangeRecord>,
}

fn quantities(container: &SlotContainer) -> Vec<u32> {
    (0..container.slot_count())
        .map(|slot| quantity_at(container, slot))
        .collect()
}

#[test]
fn substitution_craft_snapshot() {
    let registry = sample_registry().unwrap();
    let groups = SubstitutionGroups::from_registry(&registry);
    let recorder = ChangeRecorder::new();

    let mut primary = container_with(
        4,
        [
            (0, stockpile_testkit::stack(kinds::OAK_WOOD, 3)),
            (1, stockpile_testkit::stack(kinds::GEL, 2)),
            (3, stockpile_testkit::stack(kinds::PINE_WOOD, 1)),
        ],
    )
    .unwrap();
    let mut chest = container_with(
        3,
        [
            (0, stockpile_testkit::stack(kinds::SAND, 20)),
            (2, stockpile_testkit::stack(kinds::PINE_WOOD, 10)),
        ],
    )
    .unwrap()
    .with_observer(recorder.observer());

    let mut ctx = CraftingContext::new(&mut primary, true).with_source(&mut chest);
    let before = ctx.availability();

    let table = [
        Ingredient::new(kinds::OAK_WOOD, 8),
        Ingredient::new(kinds::GEL, 1),
    ];
    reserve(&ctx, &table, &groups)
        .unwrap()
        .commit(&mut ctx)
        .unwrap();
    let after = ctx.availability();
    drop(ctx);

    let report = CraftReport {
        before,
        after,
        primary: quantities(&primary),
        chest: quantities(&chest),
        chest_changes: recorder.records(),
    };
    assert_json_snapshot(snapshot_path("substitution_craft.json"), &report)
        .expect("snapshot matches");
}
