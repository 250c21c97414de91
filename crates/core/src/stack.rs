//! Resource stacks - a quantity of one resource kind plus per-instance metadata.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Stable identifier of a resource kind.
///
/// `KindId::NONE` is reserved for the empty sentinel and never names a real kind.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct KindId(pub u32);

impl KindId {
    /// The "no kind" identifier carried by empty stacks.
    pub const NONE: Self = Self(0);

    /// Returns true for the reserved empty identifier.
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

impl fmt::Display for KindId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Per-instance metadata carried through copies.
///
/// Metadata never affects whether two stacks can be merged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StackMeta {
    /// Player marked this stack as a favorite.
    pub favorited: bool,
    /// Display name override.
    pub display_name: Option<String>,
}

/// A quantity of one resource kind.
///
/// A stack whose quantity is zero, or whose kind is [`KindId::NONE`], is the
/// canonical empty sentinel. Containers store empty stacks rather than
/// `Option`s so that every slot always holds exactly one value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceStack {
    /// Resource kind.
    pub kind: KindId,
    /// Number of units in this stack.
    pub quantity: u32,
    /// Ceiling for this kind, copied from the kind definition. Never zero.
    #[serde(deserialize_with = "positive_ceiling")]
    pub max_quantity: u32,
    /// Opaque per-instance metadata.
    #[serde(default)]
    pub meta: StackMeta,
}

fn positive_ceiling<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(u32::deserialize(deserializer)?.max(1))
}

impl Default for ResourceStack {
    fn default() -> Self {
        Self::empty()
    }
}

impl ResourceStack {
    /// Create a stack of `quantity` units of `kind`.
    ///
    /// `max_quantity` is clamped to at least 1.
    pub fn new(kind: KindId, quantity: u32, max_quantity: u32) -> Self {
        Self {
            kind,
            quantity,
            max_quantity: max_quantity.max(1),
            meta: StackMeta::default(),
        }
    }

    /// The empty sentinel.
    pub fn empty() -> Self {
        Self {
            kind: KindId::NONE,
            quantity: 0,
            max_quantity: 1,
            meta: StackMeta::default(),
        }
    }

    /// Attach metadata to this stack.
    pub fn with_meta(mut self, meta: StackMeta) -> Self {
        self.meta = meta;
        self
    }

    /// True when this stack represents the absence of a resource.
    pub fn is_empty(&self) -> bool {
        self.quantity == 0 || self.kind.is_none()
    }

    /// Two stacks match when they hold the same kind.
    pub fn matches(&self, other: &ResourceStack) -> bool {
        self.kind == other.kind
    }

    /// Check if this stack is at its kind ceiling.
    pub fn is_full(&self) -> bool {
        self.quantity >= self.max_quantity
    }

    /// Copy this stack with a different quantity. A size of zero yields the empty sentinel.
    pub fn with_quantity(&self, quantity: u32) -> ResourceStack {
        if quantity == 0 {
            return ResourceStack::empty();
        }
        let mut copy = self.clone();
        copy.quantity = quantity;
        copy
    }

    /// Add `amount` units, ignoring the kind ceiling. Capacity is the caller's concern.
    pub fn grow(&mut self, amount: u32) {
        self.quantity = self.quantity.saturating_add(amount);
    }

    /// Split off up to `amount` units into a new stack.
    ///
    /// If this stack runs out it becomes the empty sentinel.
    pub fn split(&mut self, amount: u32) -> ResourceStack {
        let taken = amount.min(self.quantity);
        let split = self.with_quantity(taken);
        self.quantity -= taken;
        if self.quantity == 0 {
            *self = ResourceStack::empty();
        }
        split
    }
}
