//! Cart

use std::num::NonZeroU32;

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    catalog::CatalogItem,
    pricing::{TotalPriceError, total_price},
};

pub mod consumption;

/// Errors related to cart construction.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// A cart line was given a quantity of zero.
    #[error("cart lines must have a quantity of at least one")]
    ZeroQuantity,

    /// A line's currency differs from the cart currency (index, item currency, cart currency).
    #[error("Line {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(usize, &'static str, &'static str),
}

/// A cart line: a catalog item and how many of it are being bought.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartItem<'a> {
    item: CatalogItem<'a>,
    quantity: NonZeroU32,
}

impl<'a> CartItem<'a> {
    /// Create a new cart line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ZeroQuantity`] if `quantity` is zero.
    pub fn new(item: CatalogItem<'a>, quantity: u32) -> Result<Self, CartError> {
        let quantity = NonZeroU32::new(quantity).ok_or(CartError::ZeroQuantity)?;

        Ok(Self::with_quantity(item, quantity))
    }

    /// Create a new cart line from a quantity that is already known to be positive.
    pub fn with_quantity(item: CatalogItem<'a>, quantity: NonZeroU32) -> Self {
        Self { item, quantity }
    }

    /// Returns the catalog item
    pub fn item(&self) -> &CatalogItem<'a> {
        &self.item
    }

    /// Returns the quantity
    pub fn quantity(&self) -> NonZeroU32 {
        self.quantity
    }
}

/// Cart
///
/// Line order does not change the final price, but it does decide which line a
/// promotion encounters first while scanning.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart<'a> {
    lines: SmallVec<[CartItem<'a>; 10]>,
    currency: &'static Currency,
}

impl<'a> Cart<'a> {
    /// Create an empty cart.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            lines: SmallVec::new(),
            currency,
        }
    }

    /// Create a new cart with the given lines.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if there was a currency mismatch error.
    pub fn with_items(
        lines: impl IntoIterator<Item = CartItem<'a>>,
        currency: &'static Currency,
    ) -> Result<Self, CartError> {
        let lines: SmallVec<[CartItem<'a>; 10]> = lines.into_iter().collect();

        lines.iter().enumerate().try_for_each(|(i, line)| {
            let line_currency = line.item().price().currency();

            if line_currency == currency {
                Ok(())
            } else {
                Err(CartError::CurrencyMismatch(
                    i,
                    line_currency.iso_alpha_code,
                    currency.iso_alpha_code,
                ))
            }
        })?;

        Ok(Cart { lines, currency })
    }

    /// Build a cart from lines that were derived from an existing cart.
    pub(crate) fn from_lines(
        lines: SmallVec<[CartItem<'a>; 10]>,
        currency: &'static Currency,
    ) -> Self {
        Cart { lines, currency }
    }

    /// Calculate the subtotal of the cart at regular prices.
    ///
    /// # Errors
    ///
    /// Returns a `TotalPriceError` if there was an overflow, money arithmetic or currency mismatch error.
    pub fn subtotal(&self) -> Result<Money<'a, Currency>, TotalPriceError> {
        total_price(&self.lines, self.currency)
    }

    /// The cart lines, in order.
    pub fn lines(&self) -> &[CartItem<'a>] {
        &self.lines
    }

    /// Iterate over the lines in the cart.
    pub fn iter(&self) -> impl Iterator<Item = &CartItem<'a>> {
        self.lines.iter()
    }

    /// Get the number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
