//! Quantity Bundle Promotion
//!
//! A fixed total price charged for an exact quantity of one catalog item, e.g.
//! "2 for £2.15". Every whole multiple of the quantity found on a cart line is
//! charged at the bundle price.

use std::num::NonZeroU32;

use rusty_money::{Money, iso::Currency};

use crate::{
    cart::{
        Cart, CartItem,
        consumption::{remove_line, replace_quantity},
    },
    catalog::CatalogItem,
    pricing::{TotalPriceError, extended_price},
    promotions::{PromotionError, PromotionKey, applications::Applied},
};

/// Quantity bundle promotion
#[derive(Debug, Clone, PartialEq)]
pub struct QuantityBundlePromotion<'a> {
    key: PromotionKey,
    item: CatalogItem<'a>,
    quantity: NonZeroU32,
    price: Money<'a, Currency>,
}

impl<'a> QuantityBundlePromotion<'a> {
    /// Create a new quantity bundle promotion charging `price` for `quantity` of `item`.
    ///
    /// # Errors
    ///
    /// - [`PromotionError::InvalidQuantity`]: `quantity` is zero.
    /// - [`PromotionError::NegativePrice`]: `price` is below zero.
    /// - [`PromotionError::CurrencyMismatch`]: `price` and `item` use different currencies.
    pub fn new(
        key: PromotionKey,
        item: CatalogItem<'a>,
        quantity: u32,
        price: Money<'a, Currency>,
    ) -> Result<Self, PromotionError> {
        let quantity = NonZeroU32::new(quantity).ok_or(PromotionError::InvalidQuantity)?;

        if price.to_minor_units() < 0 {
            return Err(PromotionError::NegativePrice(price.to_minor_units()));
        }

        if price.currency() != item.price().currency() {
            return Err(PromotionError::CurrencyMismatch(
                price.currency().iso_alpha_code,
                item.price().currency().iso_alpha_code,
            ));
        }

        Ok(Self {
            key,
            item,
            quantity,
            price,
        })
    }

    /// Return the promotion key
    pub fn key(&self) -> PromotionKey {
        self.key
    }

    /// The item and quantity making up one bundle
    pub fn required(&self) -> CartItem<'a> {
        CartItem::with_quantity(self.item, self.quantity)
    }

    /// Total price charged for one bundle
    pub fn discounted_price(&self) -> &Money<'a, Currency> {
        &self.price
    }

    /// Return whether the cart holds the bundle item at all.
    pub fn is_applicable(&self, cart: &Cart<'_>) -> bool {
        cart.iter().any(|line| *line.item() == self.item)
    }

    /// Apply the promotion to the first cart line holding the bundle item.
    ///
    /// Whole bundles on that line are charged at the bundle price and removed. A
    /// line divided exactly is dropped and the scan ends there; otherwise the
    /// remainder stays on the line and the cart is scanned again. A line holding
    /// fewer than one bundle is claimed by the promotion at its regular price and
    /// removed, which also ends the scan. Carts without the item come back unchanged.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if a charge does not fit in minor units.
    pub fn apply(&self, cart: &Cart<'a>) -> Result<Applied<'a>, TotalPriceError> {
        let required = self.quantity.get();
        let mut applied = Applied::unchanged(cart);

        loop {
            let found = applied
                .cart()
                .iter()
                .enumerate()
                .find(|(_, line)| *line.item() == self.item)
                .map(|(idx, line)| (idx, line.quantity()));

            let Some((idx, held)) = found else {
                return Ok(applied);
            };

            if held.get() < required {
                let residual = remove_line(idx, applied.cart());
                let line = CartItem::with_quantity(self.item, held);

                return applied.then(Applied::claimed(residual, line));
            }

            let bundles = held.get() / required;
            let charge = extended_price(&self.price, bundles)?;

            // An exactly divided line ends the scan; a remainder is re-scanned.
            let Some(remainder) = NonZeroU32::new(held.get() % required) else {
                let residual = remove_line(idx, applied.cart());

                return applied.then(Applied::bundled(residual, charge, bundles));
            };

            let residual = replace_quantity(idx, remainder, applied.cart());

            applied = applied.then(Applied::bundled(residual, charge, bundles))?;
        }
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, USD};
    use slotmap::SlotMap;
    use testresult::TestResult;

    use crate::products::ProductKey;

    use super::*;

    fn items() -> (CatalogItem<'static>, CatalogItem<'static>) {
        let mut keys = SlotMap::<ProductKey, ()>::with_key();

        (
            CatalogItem::new(keys.insert(()), Money::from_minor(199, GBP)),
            CatalogItem::new(keys.insert(()), Money::from_minor(80, GBP)),
        )
    }

    fn two_for_215(
        item: CatalogItem<'static>,
    ) -> Result<QuantityBundlePromotion<'static>, PromotionError> {
        QuantityBundlePromotion::new(
            PromotionKey::default(),
            item,
            2,
            Money::from_minor(215, GBP),
        )
    }

    #[test]
    fn new_rejects_zero_quantity() {
        let (apple, _) = items();

        let result = QuantityBundlePromotion::new(
            PromotionKey::default(),
            apple,
            0,
            Money::from_minor(215, GBP),
        );

        assert_eq!(result, Err(PromotionError::InvalidQuantity));
    }

    #[test]
    fn new_rejects_negative_price() {
        let (apple, _) = items();

        let result = QuantityBundlePromotion::new(
            PromotionKey::default(),
            apple,
            2,
            Money::from_minor(-5, GBP),
        );

        assert_eq!(result, Err(PromotionError::NegativePrice(-5)));
    }

    #[test]
    fn new_rejects_other_currency() {
        let (apple, _) = items();

        let result = QuantityBundlePromotion::new(
            PromotionKey::default(),
            apple,
            2,
            Money::from_minor(215, USD),
        );

        assert_eq!(
            result,
            Err(PromotionError::CurrencyMismatch(
                USD.iso_alpha_code,
                GBP.iso_alpha_code
            ))
        );
    }

    #[test]
    fn exact_multiple_consumes_whole_line() -> TestResult {
        let (apple, banana) = items();
        let promo = two_for_215(apple)?;
        let cart = Cart::with_items(
            [CartItem::new(apple, 4)?, CartItem::new(banana, 1)?],
            GBP,
        )?;

        let applied = promo.apply(&cart)?;

        assert_eq!(applied.bundles(), 2);
        assert_eq!(applied.total()?, Money::from_minor(430, GBP));
        assert_eq!(applied.cart().lines(), &[CartItem::new(banana, 1)?]);

        Ok(())
    }

    #[test]
    fn remainder_is_claimed_at_regular_price() -> TestResult {
        let (apple, _) = items();
        let promo = two_for_215(apple)?;
        let cart = Cart::with_items([CartItem::new(apple, 5)?], GBP)?;

        let applied = promo.apply(&cart)?;

        assert_eq!(applied.bundles(), 2);
        assert_eq!(applied.charge(), &Money::from_minor(430, GBP));
        assert_eq!(applied.claimed_lines(), &[CartItem::new(apple, 1)?]);
        assert_eq!(applied.total()?, Money::from_minor(629, GBP));
        assert!(applied.cart().is_empty());

        Ok(())
    }

    #[test]
    fn short_line_is_claimed_and_scan_stops() -> TestResult {
        let (apple, banana) = items();
        let promo = two_for_215(apple)?;
        let cart = Cart::with_items(
            [
                CartItem::new(apple, 1)?,
                CartItem::new(banana, 1)?,
                CartItem::new(apple, 3)?,
            ],
            GBP,
        )?;

        let applied = promo.apply(&cart)?;

        assert_eq!(applied.bundles(), 0);
        assert_eq!(applied.total()?, Money::from_minor(199, GBP));
        assert_eq!(
            applied.cart().lines(),
            &[CartItem::new(banana, 1)?, CartItem::new(apple, 3)?]
        );

        Ok(())
    }

    #[test]
    fn exactly_divided_line_ends_the_scan() -> TestResult {
        let (apple, banana) = items();
        let promo = two_for_215(apple)?;
        let cart = Cart::with_items(
            [
                CartItem::new(apple, 2)?,
                CartItem::new(banana, 1)?,
                CartItem::new(apple, 2)?,
            ],
            GBP,
        )?;

        let applied = promo.apply(&cart)?;

        assert_eq!(applied.bundles(), 1);
        assert_eq!(applied.total()?, Money::from_minor(215, GBP));
        assert!(applied.claimed_lines().is_empty());
        assert_eq!(
            applied.cart().lines(),
            &[CartItem::new(banana, 1)?, CartItem::new(apple, 2)?]
        );

        Ok(())
    }

    #[test]
    fn missing_item_leaves_cart_unchanged() -> TestResult {
        let (apple, banana) = items();
        let promo = two_for_215(apple)?;
        let cart = Cart::with_items([CartItem::new(banana, 3)?], GBP)?;

        let applied = promo.apply(&cart)?;

        assert!(!promo.is_applicable(&cart));
        assert!(!applied.is_applied());
        assert_eq!(applied.cart(), &cart);
        assert_eq!(applied.total()?, Money::from_minor(0, GBP));

        Ok(())
    }
}
