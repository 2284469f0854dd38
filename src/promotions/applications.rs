//! Promotion Applications

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;

use crate::{
    cart::{Cart, CartItem},
    pricing::{TotalPriceError, total_price},
    promotions::PromotionKey,
};

/// Result of applying a promotion to a cart: the residual cart plus what was charged for the
/// quantities the promotion took out of it.
#[derive(Debug, Clone, PartialEq)]
pub struct Applied<'a> {
    cart: Cart<'a>,
    charge: Money<'a, Currency>,
    bundles: u32,
    claimed: SmallVec<[CartItem<'a>; 4]>,
}

impl<'a> Applied<'a> {
    /// A promotion that did not apply: the cart is returned as-is and nothing is charged.
    pub fn unchanged(cart: &Cart<'a>) -> Self {
        Self {
            cart: cart.clone(),
            charge: Money::from_minor(0, cart.currency()),
            bundles: 0,
            claimed: SmallVec::new(),
        }
    }

    /// `bundles` bundle instances were matched and removed, leaving `cart`.
    pub fn bundled(cart: Cart<'a>, charge: Money<'a, Currency>, bundles: u32) -> Self {
        Self {
            cart,
            charge,
            bundles,
            claimed: SmallVec::new(),
        }
    }

    /// A line was taken out of the cart by a promotion but charged at its regular price.
    pub fn claimed(cart: Cart<'a>, line: CartItem<'a>) -> Self {
        Self {
            charge: Money::from_minor(0, cart.currency()),
            cart,
            bundles: 0,
            claimed: SmallVec::from_elem(line, 1),
        }
    }

    /// Combine with an application made on this one's residual cart.
    ///
    /// Charges and bundle counts add up; the later residual cart wins.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if the charges cannot be added.
    pub fn then(mut self, next: Applied<'a>) -> Result<Self, TotalPriceError> {
        self.charge = self.charge.add(next.charge)?;
        self.bundles = self.bundles.saturating_add(next.bundles);
        self.claimed.extend(next.claimed);
        self.cart = next.cart;

        Ok(self)
    }

    /// The residual cart
    pub fn cart(&self) -> &Cart<'a> {
        &self.cart
    }

    /// Consume the result, returning the residual cart.
    pub fn into_cart(self) -> Cart<'a> {
        self.cart
    }

    /// Amount charged for matched bundles
    pub fn charge(&self) -> &Money<'a, Currency> {
        &self.charge
    }

    /// Number of bundle instances matched
    pub fn bundles(&self) -> u32 {
        self.bundles
    }

    /// Lines removed from the cart but priced at their regular price
    pub fn claimed_lines(&self) -> &[CartItem<'a>] {
        &self.claimed
    }

    /// Whether the promotion changed the cart at all.
    pub fn is_applied(&self) -> bool {
        self.bundles > 0 || !self.claimed.is_empty()
    }

    /// Everything this application contributes to the cart total: bundle charges plus the
    /// regular price of claimed lines.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if the claimed lines cannot be priced.
    pub fn total(&self) -> Result<Money<'a, Currency>, TotalPriceError> {
        let claimed = total_price(&self.claimed, self.cart.currency())?;

        Ok(self.charge.add(claimed)?)
    }
}

/// Record of a promotion that took part in the winning ordering
#[derive(Debug, Clone, PartialEq)]
pub struct PromotionApplication<'a> {
    /// Key of the promotion that was applied
    pub promotion_key: PromotionKey,

    /// Number of bundle instances matched
    pub bundles: u32,

    /// Amount charged for those bundles
    pub charge: Money<'a, Currency>,
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::GBP;
    use testresult::TestResult;

    use crate::{cart::CartError, catalog::CatalogItem, products::ProductKey};

    use super::*;

    fn line(quantity: u32) -> Result<CartItem<'static>, CartError> {
        CartItem::new(
            CatalogItem::new(ProductKey::default(), Money::from_minor(199, GBP)),
            quantity,
        )
    }

    #[test]
    fn unchanged_charges_nothing() -> TestResult {
        let cart = Cart::with_items([line(1)?], GBP)?;

        let applied = Applied::unchanged(&cart);

        assert_eq!(applied.cart(), &cart);
        assert_eq!(applied.total()?, Money::from_minor(0, GBP));
        assert!(!applied.is_applied());

        Ok(())
    }

    #[test]
    fn then_accumulates_charges_and_keeps_latest_cart() -> TestResult {
        let first = Applied::bundled(
            Cart::with_items([line(1)?], GBP)?,
            Money::from_minor(430, GBP),
            2,
        );
        let second = Applied::claimed(Cart::new(GBP), line(1)?);

        let combined = first.then(second)?;

        assert!(combined.cart().is_empty());
        assert_eq!(combined.bundles(), 2);
        assert_eq!(combined.charge(), &Money::from_minor(430, GBP));
        assert_eq!(combined.claimed_lines().len(), 1);
        assert_eq!(combined.total()?, Money::from_minor(629, GBP));

        Ok(())
    }
}
