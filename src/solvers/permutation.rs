//! Permutation Solver
//!
//! Applying a promotion changes the cart every later promotion sees, so the
//! cheapest total depends on application order. This solver tries every
//! ordering of the promotions and keeps the cheapest candidate, which is exact
//! but grows factorially with the number of promotions.
//!
//! Each ordering is evaluated on its own copy of the cart, so orderings are
//! independent of one another and only the running minimum is retained.

use rusty_money::Money;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::{
    cart::Cart,
    catalog::Catalog,
    promotions::{Promotion, applications::PromotionApplication},
    solvers::{Solver, SolverError, SolverResult, permutations::Permutations},
    validation::validate_cart,
};

/// Exhaustive search over promotion application order
#[derive(Debug)]
pub struct PermutationSolver;

impl Solver for PermutationSolver {
    #[tracing::instrument(
        name = "solvers.permutation.solve",
        skip_all,
        fields(promotions = promotions.len(), lines = cart.len())
    )]
    fn solve<'a>(
        catalog: &Catalog<'a>,
        promotions: &[Promotion<'a>],
        cart: &Cart<'a>,
    ) -> Result<SolverResult<'a>, SolverError> {
        validate_cart(cart, catalog)?;

        if cart.is_empty() {
            return Err(SolverError::NoCandidate);
        }

        debug!(
            orderings = ?Permutations::count_for(promotions.len()),
            "searching promotion orderings"
        );

        let mut best: Option<SolverResult<'a>> = None;
        let mut evaluated = 0usize;

        for ordering in Permutations::new(promotions.len()) {
            let candidate = evaluate_ordering(promotions, cart, ordering)?;

            evaluated += 1;

            let improves = best.as_ref().is_none_or(|best| {
                candidate.total.to_minor_units() < best.total.to_minor_units()
            });

            if improves {
                trace!(
                    total = %candidate.total,
                    ordering = ?candidate.ordering,
                    "new cheapest ordering"
                );

                best = Some(candidate);
            }
        }

        let mut best = best.ok_or(SolverError::NoCandidate)?;
        best.permutations_evaluated = evaluated;

        debug!(
            permutations = evaluated,
            total = %best.total,
            "selected cheapest ordering"
        );

        Ok(best)
    }
}

/// Price the cart under one ordering.
///
/// Promotions are folded from the last index of the ordering to the first, each
/// one seeing the residual cart left by the previous. Whatever remains afterwards
/// is charged at regular prices.
fn evaluate_ordering<'a>(
    promotions: &[Promotion<'a>],
    cart: &Cart<'a>,
    ordering: SmallVec<[usize; 10]>,
) -> Result<SolverResult<'a>, SolverError> {
    let mut residual = cart.clone();
    let mut total = Money::from_minor(0, cart.currency());
    let mut promotion_applications = SmallVec::new();
    let mut full_price_lines = SmallVec::new();

    for &idx in ordering.iter().rev() {
        let promotion = promotions
            .get(idx)
            .ok_or(SolverError::InvariantViolation {
                message: "ordering refers to a promotion that does not exist",
            })?;

        let applied = promotion.apply(&residual)?;

        total = total.add(applied.total()?)?;

        if applied.is_applied() {
            promotion_applications.push(PromotionApplication {
                promotion_key: promotion.key(),
                bundles: applied.bundles(),
                charge: *applied.charge(),
            });

            full_price_lines.extend(applied.claimed_lines().iter().copied());
        }

        residual = applied.into_cart();
    }

    total = total.add(residual.subtotal()?)?;
    full_price_lines.extend(residual.iter().copied());

    Ok(SolverResult {
        total,
        ordering,
        promotion_applications,
        full_price_lines,
        permutations_evaluated: 0,
    })
}
