//! Reusable kinds and containers for tests.

use stockpile_container::SlotContainer;
use stockpile_core::{KindId, KindRegistry, ResourceStack};

/// Registry definition shared by integration tests.
///
/// Ids follow declaration order: oak_wood=1, pine_wood=2, sand=3, gel=4,
/// torch=5, iron_bar=6, lead_bar=7.
pub const SAMPLE_REGISTRY_JSON: &str = r#"{
    "kinds": [
        { "key": "stockpile:oak_wood", "max_quantity": 999 },
        { "key": "stockpile:pine_wood", "max_quantity": 999 },
        { "key": "stockpile:sand", "max_quantity": 999 },
        { "key": "stockpile:gel", "max_quantity": 999 },
        { "key": "stockpile:torch", "max_quantity": 99 },
        { "key": "stockpile:iron_bar", "max_quantity": 99 },
        { "key": "stockpile:lead_bar", "max_quantity": 99 }
    ],
    "groups": {
        "wood": ["oak_wood", "pine_wood"],
        "iron_bar": ["iron_bar", "lead_bar"]
    }
}"#;

/// Kind ids of [`SAMPLE_REGISTRY_JSON`].
pub mod kinds {
    use stockpile_core::KindId;

    /// Oak wood.
    pub const OAK_WOOD: KindId = KindId(1);
    /// Pine wood.
    pub const PINE_WOOD: KindId = KindId(2);
    /// Sand.
    pub const SAND: KindId = KindId(3);
    /// Gel.
    pub const GEL: KindId = KindId(4);
    /// Torch.
    pub const TORCH: KindId = KindId(5);
    /// Iron bar.
    pub const IRON_BAR: KindId = KindId(6);
    /// Lead bar.
    pub const LEAD_BAR: KindId = KindId(7);
}

/// Load [`SAMPLE_REGISTRY_JSON`].
pub fn sample_registry() -> anyhow::Result<KindRegistry> {
    Ok(KindRegistry::load_from_str(SAMPLE_REGISTRY_JSON)?)
}

/// A stack of `kind` with a ceiling of 99.
pub fn stack(kind: KindId, quantity: u32) -> ResourceStack {
    ResourceStack::new(kind, quantity, 99)
}

/// Container of `size` slots holding `(slot, stack)` pairs.
///
/// Fails if a slot is outside the container.
pub fn container_with(
    size: usize,
    contents: impl IntoIterator<Item = (usize, ResourceStack)>,
) -> anyhow::Result<SlotContainer> {
    let mut container = SlotContainer::new(size);
    for (slot, stack) in contents {
        container.set_stack(slot, stack, false)?;
    }
    Ok(container)
}

/// Quantity held in `slot`, 0 for empty or out-of-range slots.
pub fn quantity_at(container: &SlotContainer, slot: usize) -> u32 {
    container
        .stack(slot)
        .ok()
        .filter(|stack| !stack.is_empty())
        .map_or(0, |stack| stack.quantity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_ids_follow_declaration_order() {
        let registry = sample_registry().unwrap();
        let sand = "sand".parse().unwrap();
        assert_eq!(registry.id(&sand), Some(kinds::SAND));
        assert_eq!(registry.get(kinds::TORCH).unwrap().max_quantity, 99);
        assert_eq!(registry.groups()["wood"].len(), 2);
    }

    #[test]
    fn container_with_places_stacks() {
        let container = container_with(3, [(2, stack(kinds::GEL, 4))]).unwrap();
        assert_eq!(quantity_at(&container, 2), 4);
        assert_eq!(quantity_at(&container, 0), 0);
        assert_eq!(quantity_at(&container, 9), 0);
        assert!(container_with(1, [(1, stack(kinds::GEL, 1))]).is_err());
    }
}
