//! Crafting source capability and host-side discovery.

use stockpile_container::SlotContainer;

/// An object exposing a slot container as an auxiliary crafting pool.
///
/// Storage holders (placed blocks, carried bags) implement this so their
/// contents can be counted and consumed during crafting.
pub trait CraftingSource {
    /// Container whose contents count toward crafting.
    fn crafting_container(&self) -> &SlotContainer;

    /// Mutable access used when a craft consumes ingredients.
    fn crafting_container_mut(&mut self) -> &mut SlotContainer;
}

impl CraftingSource for SlotContainer {
    fn crafting_container(&self) -> &SlotContainer {
        self
    }

    fn crafting_container_mut(&mut self) -> &mut SlotContainer {
        self
    }
}

/// The containers a requesting actor can reach, in drain order.
pub struct Reachable<'a> {
    /// The actor's own inventory. Always drained first.
    pub primary: &'a mut SlotContainer,
    /// Auxiliary sources in enumeration order.
    pub sources: Vec<&'a mut dyn CraftingSource>,
}

/// Host-supplied enumeration of the sources reachable by an actor.
///
/// Implemented by the host's actor type (typically a player). The returned
/// order must be stable for a given state, e.g. the inventory slot order of
/// the objects providing the capability.
pub trait SourceDiscovery {
    /// Split the actor into its primary container and reachable sources.
    fn discover(&mut self) -> Reachable<'_>;
}
