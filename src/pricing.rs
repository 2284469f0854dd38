//! Prices
//!
//! Regular (undiscounted) pricing of cart lines in minor units.

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::cart::CartItem;

/// Errors that can occur while calculating total price.
#[derive(Debug, Error, PartialEq)]
pub enum TotalPriceError {
    /// Unit price multiplied by quantity does not fit in minor units.
    #[error("line total overflowed: {minor_units} x {quantity}")]
    Overflow {
        /// Unit price in minor units
        minor_units: i64,
        /// Quantity being priced
        quantity: u32,
    },

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Multiply a unit price by a quantity.
///
/// # Errors
///
/// Returns [`TotalPriceError::Overflow`] if the product does not fit in minor units.
pub fn extended_price<'a>(
    unit_price: &Money<'a, Currency>,
    quantity: u32,
) -> Result<Money<'a, Currency>, TotalPriceError> {
    let minor_units = unit_price.to_minor_units();

    let extended = minor_units
        .checked_mul(i64::from(quantity))
        .ok_or(TotalPriceError::Overflow {
            minor_units,
            quantity,
        })?;

    Ok(Money::from_minor(extended, unit_price.currency()))
}

/// Calculates the regular price of a single cart line.
///
/// # Errors
///
/// Returns [`TotalPriceError::Overflow`] if the line total does not fit in minor units.
pub fn line_total<'a>(line: &CartItem<'a>) -> Result<Money<'a, Currency>, TotalPriceError> {
    extended_price(line.item().price(), line.quantity().get())
}

/// Calculates the regular price of a list of cart lines.
///
/// An empty list totals to zero in the given currency.
///
/// # Errors
///
/// - [`TotalPriceError::Overflow`]: a line total does not fit in minor units.
/// - [`TotalPriceError::Money`]: wrapped money arithmetic or currency mismatch error.
pub fn total_price<'a>(
    lines: &[CartItem<'a>],
    currency: &'static Currency,
) -> Result<Money<'a, Currency>, TotalPriceError> {
    lines
        .iter()
        .try_fold(Money::from_minor(0, currency), |acc, line| {
            Ok(acc.add(line_total(line)?)?)
        })
}
