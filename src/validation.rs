//! Validation
//!
//! Every cart line must reference an item listed in the catalog before any
//! pricing happens.

use thiserror::Error;

use crate::{cart::Cart, catalog::Catalog, products::ProductKey};

/// Cart validation errors.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A cart line references an item that is not in the catalog at that price.
    #[error("cart line {line} references product {product:?}, which is not in the catalog")]
    UnknownItem {
        /// Index of the offending cart line
        line: usize,

        /// Product referenced by the offending line
        product: ProductKey,
    },
}

/// Return whether every line in the cart references a catalog item.
pub fn is_cart_valid(cart: &Cart<'_>, catalog: &Catalog<'_>) -> bool {
    validate_cart(cart, catalog).is_ok()
}

/// Check every line in the cart references a catalog item, stopping at the first that doesn't.
///
/// # Errors
///
/// Returns [`ValidationError::UnknownItem`] for the first line not found in the catalog.
pub fn validate_cart(cart: &Cart<'_>, catalog: &Catalog<'_>) -> Result<(), ValidationError> {
    cart.iter().enumerate().try_for_each(|(line, item)| {
        if catalog.contains(item.item()) {
            Ok(())
        } else {
            Err(ValidationError::UnknownItem {
                line,
                product: item.item().product(),
            })
        }
    })
}
