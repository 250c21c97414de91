//! A requesting actor's view over every container it can craft from.

use std::collections::BTreeMap;
use std::fmt;

use stockpile_container::SlotContainer;
use stockpile_core::KindId;

use crate::engine;
use crate::matcher::KindMatcher;
use crate::source::{CraftingSource, Reachable, SourceDiscovery};

/// Primary container plus auxiliary sources, in drain order.
///
/// The `user` flag is forwarded to every container observer fired by an
/// extraction made through this context.
pub struct CraftingContext<'a> {
    primary: &'a mut SlotContainer,
    sources: Vec<&'a mut dyn CraftingSource>,
    user: bool,
}

impl<'a> CraftingContext<'a> {
    /// Context over the primary container alone.
    pub fn new(primary: &'a mut SlotContainer, user: bool) -> Self {
        Self {
            primary,
            sources: Vec::new(),
            user,
        }
    }

    /// Context over everything `actor` reports as reachable.
    pub fn discover<D>(actor: &'a mut D, user: bool) -> Self
    where
        D: SourceDiscovery + ?Sized,
    {
        let Reachable { primary, sources } = actor.discover();
        Self {
            primary,
            sources,
            user,
        }
    }

    /// Append an auxiliary source after those already present.
    pub fn with_source(mut self, source: &'a mut dyn CraftingSource) -> Self {
        self.sources.push(source);
        self
    }

    /// Number of auxiliary sources (the primary is not counted).
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Whether extractions are reported to observers as user-driven.
    pub fn user(&self) -> bool {
        self.user
    }

    /// The primary container.
    pub fn primary(&self) -> &SlotContainer {
        self.primary
    }

    /// Every container, primary first.
    pub fn containers(&self) -> impl Iterator<Item = &SlotContainer> + '_ + use<'_, 'a> {
        std::iter::once(&*self.primary).chain(
            self.sources
                .iter()
                .map(|source| source.crafting_container()),
        )
    }

    fn containers_mut(&mut self) -> impl Iterator<Item = &mut SlotContainer> + '_ + use<'_, 'a> {
        std::iter::once(&mut *self.primary).chain(
            self.sources
                .iter_mut()
                .map(|source| source.crafting_container_mut()),
        )
    }

    /// Per-kind totals across every container.
    pub fn availability(&self) -> BTreeMap<KindId, u64> {
        engine::compute_availability(self.containers())
    }

    /// Quantity available for `kind` under `matcher`.
    pub fn available<M>(&self, kind: KindId, matcher: &M) -> u64
    where
        M: KindMatcher + ?Sized,
    {
        engine::available(self.containers(), kind, matcher)
    }

    /// Remove up to `amount` of `kind`, returning the unfulfilled remainder.
    pub fn extract<M>(&mut self, kind: KindId, matcher: &M, amount: u32) -> u32
    where
        M: KindMatcher + ?Sized,
    {
        let user = self.user;
        engine::extract_across(self.containers_mut(), kind, matcher, amount, user)
    }
}

impl fmt::Debug for CraftingContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CraftingContext")
            .field("primary_slots", &self.primary.slot_count())
            .field("sources", &self.sources.len())
            .field("user", &self.user)
            .finish()
    }
}
