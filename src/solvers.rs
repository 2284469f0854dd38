//! Solvers for Promotions

use rusty_money::{Money, MoneyError, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    cart::{Cart, CartItem},
    catalog::Catalog,
    pricing::TotalPriceError,
    promotions::{Promotion, applications::PromotionApplication},
    validation::ValidationError,
};

pub mod permutation;
pub mod permutations;

/// Solver Errors
#[derive(Debug, Error, PartialEq)]
pub enum SolverError {
    /// The cart references items that are not in the catalog.
    #[error(transparent)]
    InvalidCart(#[from] ValidationError),

    /// No candidate total could be produced, because the cart has no lines.
    #[error("no candidate total: the cart is empty")]
    NoCandidate,

    /// Wrapped pricing error
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Internal solver invariant was violated (this is a bug).
    #[error("solver invariant violated: {message}")]
    InvariantViolation {
        /// What invariant was violated
        message: &'static str,
    },
}

/// Cheapest way found to price a cart
#[derive(Debug, Clone, PartialEq)]
pub struct SolverResult<'a> {
    /// Total cost of the cart after applying promotions
    pub total: Money<'a, Currency>,

    /// Promotion indexes of the winning ordering
    pub ordering: SmallVec<[usize; 10]>,

    /// Promotions that changed the cart in the winning ordering, in the order they were applied
    pub promotion_applications: SmallVec<[PromotionApplication<'a>; 10]>,

    /// Lines charged at their regular price
    pub full_price_lines: SmallVec<[CartItem<'a>; 10]>,

    /// Number of orderings evaluated
    pub permutations_evaluated: usize,
}

/// Trait for solving promotion problems on a cart
pub trait Solver {
    /// Find the cheapest total for the cart under the given promotions.
    ///
    /// # Errors
    ///
    /// Returns a [`SolverError`] if the cart is invalid or cannot be priced.
    fn solve<'a>(
        catalog: &Catalog<'a>,
        promotions: &[Promotion<'a>],
        cart: &Cart<'a>,
    ) -> Result<SolverResult<'a>, SolverError>;
}
