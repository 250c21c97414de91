//! Kind matchers decide which held kinds satisfy a requested kind.

use std::collections::{BTreeMap, BTreeSet};

use stockpile_core::{KindId, KindRegistry};

/// Equivalence rule between an occupying kind and a requested kind.
pub trait KindMatcher {
    /// Whether a slot holding `held` can satisfy a request for `requested`.
    fn matches(&self, held: KindId, requested: KindId) -> bool;
}

impl<F> KindMatcher for F
where
    F: Fn(KindId, KindId) -> bool,
{
    fn matches(&self, held: KindId, requested: KindId) -> bool {
        self(held, requested)
    }
}

/// Only the requested kind itself matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExactKind;

impl KindMatcher for ExactKind {
    fn matches(&self, held: KindId, requested: KindId) -> bool {
        held == requested
    }
}

/// Interchangeable kind families.
///
/// A request is satisfied by the requested kind itself or by any kind that
/// shares a named group with it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionGroups {
    groups: BTreeMap<String, BTreeSet<KindId>>,
}

impl SubstitutionGroups {
    /// Create an empty matcher (behaves like [`ExactKind`]).
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the groups declared in a kind registry.
    pub fn from_registry(registry: &KindRegistry) -> Self {
        Self {
            groups: registry.groups().clone(),
        }
    }

    /// Add kinds to a named group, creating it if needed.
    pub fn add_group<I>(&mut self, name: impl Into<String>, kinds: I)
    where
        I: IntoIterator<Item = KindId>,
    {
        self.groups.entry(name.into()).or_default().extend(kinds);
    }

    /// Builder form of [`add_group`](Self::add_group).
    pub fn with_group<I>(mut self, name: impl Into<String>, kinds: I) -> Self
    where
        I: IntoIterator<Item = KindId>,
    {
        self.add_group(name, kinds);
        self
    }

    /// Names of the groups containing `kind`, in name order.
    pub fn groups_of(&self, kind: KindId) -> impl Iterator<Item = &str> + '_ {
        self.groups
            .iter()
            .filter(move |(_, members)| members.contains(&kind))
            .map(|(name, _)| name.as_str())
    }

    /// Number of declared groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true when no group is declared.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl KindMatcher for SubstitutionGroups {
    fn matches(&self, held: KindId, requested: KindId) -> bool {
        held == requested
            || self
                .groups
                .values()
                .any(|members| members.contains(&held) && members.contains(&requested))
    }
}
