//! Pricing Engine
//!
//! Holds a catalog and promotion list for the lifetime of the engine and prices
//! carts against them.

use rusty_money::{Money, iso::Currency};

use crate::{
    cart::Cart,
    catalog::Catalog,
    promotions::Promotion,
    solvers::{Solver, SolverError, SolverResult, permutation::PermutationSolver},
};

/// Find the cheapest total for `cart` under every ordering of `promotions`.
///
/// # Errors
///
/// - [`SolverError::InvalidCart`]: a cart line references an item not in the catalog.
/// - [`SolverError::NoCandidate`]: the cart is empty.
/// - [`SolverError::TotalPrice`] / [`SolverError::Money`]: a total could not be calculated.
pub fn bundle_cart_to_lowest_price<'a>(
    catalog: &Catalog<'a>,
    promotions: &[Promotion<'a>],
    cart: &Cart<'a>,
) -> Result<Money<'a, Currency>, SolverError> {
    Ok(PermutationSolver::solve(catalog, promotions, cart)?.total)
}

/// Pricing engine
#[derive(Debug, Clone)]
pub struct PricingEngine<'a> {
    catalog: Catalog<'a>,
    promotions: Vec<Promotion<'a>>,
}

impl<'a> PricingEngine<'a> {
    /// Create a new engine for the given catalog and promotions.
    pub fn new(catalog: Catalog<'a>, promotions: impl Into<Vec<Promotion<'a>>>) -> Self {
        Self {
            catalog,
            promotions: promotions.into(),
        }
    }

    /// The catalog
    pub fn catalog(&self) -> &Catalog<'a> {
        &self.catalog
    }

    /// The promotions, in the order they were supplied
    pub fn promotions(&self) -> &[Promotion<'a>] {
        &self.promotions
    }

    /// Solve the cart, returning the cheapest total along with how it was reached.
    ///
    /// # Errors
    ///
    /// Returns a [`SolverError`] if the cart is invalid, empty or cannot be priced.
    pub fn solve(&self, cart: &Cart<'a>) -> Result<SolverResult<'a>, SolverError> {
        PermutationSolver::solve(&self.catalog, &self.promotions, cart)
    }

    /// Find the cheapest total for the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`SolverError`] if the cart is invalid, empty or cannot be priced.
    pub fn bundle_cart_to_lowest_price(
        &self,
        cart: &Cart<'a>,
    ) -> Result<Money<'a, Currency>, SolverError> {
        bundle_cart_to_lowest_price(&self.catalog, &self.promotions, cart)
    }
}
