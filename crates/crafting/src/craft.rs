//! Two-phase crafting: verify every ingredient, then consume them.
//!
//! [`extract_across`](crate::extract_across) is best-effort and never rolls
//! back. Reserving first turns a shortfall into an error before anything is
//! consumed, so a commit against unchanged contents always succeeds.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use stockpile_core::KindId;
use tracing::debug;

use crate::context::CraftingContext;
use crate::error::CraftError;
use crate::matcher::KindMatcher;

/// A quantity of one requested kind consumed by a craft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ingredient {
    /// Requested kind; substitutes are resolved by the matcher.
    pub kind: KindId,
    /// Units consumed.
    pub amount: u32,
}

impl Ingredient {
    /// Create an ingredient.
    pub fn new(kind: KindId, amount: u32) -> Self {
        Self { kind, amount }
    }
}

/// Ingredients verified as available, ready to be consumed.
#[derive(Debug)]
pub struct Reservation<'m, M: ?Sized> {
    ingredients: Vec<Ingredient>,
    matcher: &'m M,
}

/// Check that every ingredient is reachable through `ctx`.
///
/// Amounts for the same requested kind are summed before checking.
pub fn reserve<'m, M>(
    ctx: &CraftingContext<'_>,
    ingredients: &[Ingredient],
    matcher: &'m M,
) -> Result<Reservation<'m, M>, CraftError>
where
    M: KindMatcher + ?Sized,
{
    let mut totals: BTreeMap<KindId, u64> = BTreeMap::new();
    for ingredient in ingredients.iter().filter(|ingredient| ingredient.amount > 0) {
        *totals.entry(ingredient.kind).or_insert(0) += u64::from(ingredient.amount);
    }

    for (&kind, &required) in &totals {
        let available = ctx.available(kind, matcher);
        if available < required {
            debug!(%kind, required, available, "reservation refused");
            return Err(CraftError::Insufficient {
                kind,
                required,
                available,
            });
        }
    }

    Ok(Reservation {
        ingredients: ingredients.to_vec(),
        matcher,
    })
}

impl<'m, M> Reservation<'m, M>
where
    M: KindMatcher + ?Sized,
{
    /// The reserved ingredients, in consumption order.
    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    /// Consume every reserved ingredient from `ctx`.
    ///
    /// Stops at the first ingredient that cannot be met in full; what was
    /// already extracted stays extracted.
    pub fn commit(self, ctx: &mut CraftingContext<'_>) -> Result<(), CraftError> {
        self.commit_with(ctx, |ingredient| ingredient.amount)
    }

    /// Like [`commit`](Self::commit), but `consume` decides how many units of
    /// each ingredient are actually taken (e.g. a chance to save materials).
    ///
    /// The returned amount is capped at the reserved amount.
    pub fn commit_with<F>(
        self,
        ctx: &mut CraftingContext<'_>,
        mut consume: F,
    ) -> Result<(), CraftError>
    where
        F: FnMut(&Ingredient) -> u32,
    {
        for ingredient in &self.ingredients {
            let amount = consume(ingredient).min(ingredient.amount);
            let unfulfilled = ctx.extract(ingredient.kind, self.matcher, amount);
            if unfulfilled > 0 {
                return Err(CraftError::PartialFulfillment {
                    kind: ingredient.kind,
                    unfulfilled,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::{ExactKind, SubstitutionGroups};
    use stockpile_container::SlotContainer;
    use stockpile_core::ResourceStack;

    const WOOD: KindId = KindId(1);
    const PINE: KindId = KindId(2);
    const GEL: KindId = KindId(3);

    fn inventory(contents: &[(KindId, u32)]) -> SlotContainer {
        SlotContainer::from_stacks(
            contents
                .iter()
                .map(|&(kind, quantity)| ResourceStack::new(kind, quantity, 99))
                .collect(),
        )
    }

    #[test]
    fn reserve_then_commit_consumes_everything() {
        let mut primary = inventory(&[(WOOD, 3), (GEL, 1)]);
        let mut chest = inventory(&[(WOOD, 10)]);
        let mut ctx = CraftingContext::new(&mut primary, true).with_source(&mut chest);

        let recipe = [Ingredient::new(WOOD, 8), Ingredient::new(GEL, 1)];
        let reservation = reserve(&ctx, &recipe, &ExactKind).unwrap();
        assert_eq!(reservation.ingredients(), &recipe);
        reservation.commit(&mut ctx).unwrap();

        assert_eq!(ctx.availability().get(&WOOD), Some(&5));
        assert_eq!(ctx.availability().get(&GEL), None);
    }

    #[test]
    fn reserve_refuses_without_touching_contents() {
        let mut primary = inventory(&[(WOOD, 3), (GEL, 1)]);
        let ctx = CraftingContext::new(&mut primary, false);

        let err = reserve(&ctx, &[Ingredient::new(GEL, 1), Ingredient::new(WOOD, 4)], &ExactKind)
            .unwrap_err();
        assert_eq!(
            err,
            CraftError::Insufficient {
                kind: WOOD,
                required: 4,
                available: 3,
            }
        );
        assert_eq!(ctx.available(GEL, &ExactKind), 1);
    }

    #[test]
    fn repeated_kinds_are_summed() {
        let mut primary = inventory(&[(WOOD, 5)]);
        let ctx = CraftingContext::new(&mut primary, false);

        let recipe = [Ingredient::new(WOOD, 3), Ingredient::new(WOOD, 3)];
        assert!(matches!(
            reserve(&ctx, &recipe, &ExactKind),
            Err(CraftError::Insufficient { required: 6, .. })
        ));
    }

    #[test]
    fn substitutes_satisfy_group_requests() {
        let groups = SubstitutionGroups::new().with_group("wood", [WOOD, PINE]);
        let mut primary = inventory(&[(PINE, 6), (WOOD, 2)]);
        let mut ctx = CraftingContext::new(&mut primary, false);

        let reservation = reserve(&ctx, &[Ingredient::new(WOOD, 7)], &groups).unwrap();
        reservation.commit(&mut ctx).unwrap();

        assert_eq!(ctx.availability().get(&WOOD), Some(&1));
        assert_eq!(ctx.availability().get(&PINE), None);
    }

    #[test]
    fn commit_reports_contents_changed_since_reserve() {
        let mut primary = inventory(&[(WOOD, 4)]);
        let mut ctx = CraftingContext::new(&mut primary, false);

        let reservation = reserve(&ctx, &[Ingredient::new(WOOD, 4)], &ExactKind).unwrap();
        assert_eq!(ctx.extract(WOOD, &ExactKind, 1), 0);

        assert_eq!(
            reservation.commit(&mut ctx),
            Err(CraftError::PartialFulfillment {
                kind: WOOD,
                unfulfilled: 1,
            })
        );
    }

    #[test]
    fn ingredients_deserialize_from_json() {
        let recipe: Vec<Ingredient> =
            serde_json::from_str(r#"[{ "kind": 1, "amount": 8 }, { "kind": 3, "amount": 1 }]"#)
                .unwrap();
        assert_eq!(recipe, vec![Ingredient::new(WOOD, 8), Ingredient::new(GEL, 1)]);
    }

    #[test]
    fn commit_with_consumes_adjusted_amounts() {
        let mut primary = inventory(&[(WOOD, 10), (GEL, 4)]);
        let mut ctx = CraftingContext::new(&mut primary, false);

        let recipe = [Ingredient::new(WOOD, 6), Ingredient::new(GEL, 2)];
        reserve(&ctx, &recipe, &ExactKind)
            .unwrap()
            .commit_with(&mut ctx, |ingredient| {
                if ingredient.kind == WOOD {
                    ingredient.amount / 2
                } else {
                    u32::MAX
                }
            })
            .unwrap();

        assert_eq!(ctx.availability().get(&WOOD), Some(&7));
        assert_eq!(ctx.availability().get(&GEL), Some(&2));
    }
}
