//! Unit Price Override Bundle
//!
//! A bundle of several catalog items, each entry optionally charged at an
//! override unit price instead of its catalog price, e.g. "bread and two
//! margarines, second margarine free". The bundle price is fixed when the
//! promotion is built.

use std::num::NonZeroU32;

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;

use crate::{
    cart::{
        Cart, CartItem,
        consumption::{covers, remove},
    },
    catalog::CatalogItem,
    pricing::{TotalPriceError, extended_price},
    promotions::{PromotionError, PromotionKey, applications::Applied},
};

/// One entry of a unit price override bundle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BundleEntry<'a> {
    line: CartItem<'a>,
    price_override: Option<Money<'a, Currency>>,
}

impl<'a> BundleEntry<'a> {
    /// Create a new entry requiring `quantity` of `item`, optionally at an override unit price.
    ///
    /// # Errors
    ///
    /// - [`PromotionError::InvalidQuantity`]: `quantity` is zero.
    /// - [`PromotionError::NegativePrice`]: the override price is below zero.
    /// - [`PromotionError::CurrencyMismatch`]: the override price and `item` use different currencies.
    pub fn new(
        item: CatalogItem<'a>,
        quantity: u32,
        price_override: Option<Money<'a, Currency>>,
    ) -> Result<Self, PromotionError> {
        let quantity = NonZeroU32::new(quantity).ok_or(PromotionError::InvalidQuantity)?;
        let line = CartItem::with_quantity(item, quantity);

        if let Some(price) = price_override {
            if price.to_minor_units() < 0 {
                return Err(PromotionError::NegativePrice(price.to_minor_units()));
            }

            if price.currency() != item.price().currency() {
                return Err(PromotionError::CurrencyMismatch(
                    price.currency().iso_alpha_code,
                    item.price().currency().iso_alpha_code,
                ));
            }
        }

        Ok(Self {
            line,
            price_override,
        })
    }

    /// The catalog item and quantity this entry consumes
    pub fn line(&self) -> &CartItem<'a> {
        &self.line
    }

    /// The override unit price, if any
    pub fn price_override(&self) -> Option<&Money<'a, Currency>> {
        self.price_override.as_ref()
    }

    /// Unit price charged for this entry: the override if present, otherwise the catalog price.
    pub fn unit_price(&self) -> &Money<'a, Currency> {
        self.price_override
            .as_ref()
            .unwrap_or_else(|| self.line.item().price())
    }

    /// Price charged for this entry inside the bundle.
    ///
    /// # Errors
    ///
    /// Returns [`TotalPriceError::Overflow`] if the price does not fit in minor units.
    pub fn price(&self) -> Result<Money<'a, Currency>, TotalPriceError> {
        extended_price(self.unit_price(), self.line.quantity().get())
    }
}

/// Unit price override bundle promotion
#[derive(Debug, Clone, PartialEq)]
pub struct UnitPriceOverridePromotion<'a> {
    key: PromotionKey,
    entries: SmallVec<[BundleEntry<'a>; 4]>,
    discounted_price: Money<'a, Currency>,
}

impl<'a> UnitPriceOverridePromotion<'a> {
    /// Create a new bundle from its entries, in the order they are consumed.
    ///
    /// # Errors
    ///
    /// - [`PromotionError::EmptyBundle`]: no entries were given.
    /// - [`PromotionError::CurrencyMismatch`]: the entries use different currencies.
    /// - [`PromotionError::Price`]: the bundle price cannot be calculated.
    pub fn new(
        key: PromotionKey,
        entries: impl IntoIterator<Item = BundleEntry<'a>>,
    ) -> Result<Self, PromotionError> {
        let entries: SmallVec<[BundleEntry<'a>; 4]> = entries.into_iter().collect();

        let first = entries.first().ok_or(PromotionError::EmptyBundle)?;
        let currency = first.unit_price().currency();

        let discounted_price = entries
            .iter()
            .try_fold(Money::from_minor(0, currency), |acc, entry| {
                let entry_currency = entry.unit_price().currency();

                if entry_currency != currency {
                    return Err(PromotionError::CurrencyMismatch(
                        entry_currency.iso_alpha_code,
                        currency.iso_alpha_code,
                    ));
                }

                Ok(acc.add(entry.price()?).map_err(TotalPriceError::from)?)
            })?;

        Ok(Self {
            key,
            entries,
            discounted_price,
        })
    }

    /// Return the promotion key
    pub fn key(&self) -> PromotionKey {
        self.key
    }

    /// Bundle entries
    pub fn entries(&self) -> &[BundleEntry<'a>] {
        &self.entries
    }

    /// Total price charged for one bundle
    pub fn discounted_price(&self) -> &Money<'a, Currency> {
        &self.discounted_price
    }

    /// The item quantities one bundle consumes.
    pub fn requirements(&self) -> SmallVec<[CartItem<'a>; 4]> {
        self.entries.iter().map(|entry| *entry.line()).collect()
    }

    /// Return whether any cart line holds an item from this bundle.
    pub fn is_applicable(&self, cart: &Cart<'_>) -> bool {
        cart.iter().any(|line| {
            self.entries
                .iter()
                .any(|entry| entry.line().item() == line.item())
        })
    }

    /// Apply one instance of the bundle to the cart.
    ///
    /// Applies only when some cart line holds a bundle item and the cart covers
    /// every entry's quantity; the entries are then removed in order and the
    /// bundle price is charged. Otherwise the cart comes back unchanged.
    pub fn apply(&self, cart: &Cart<'a>) -> Applied<'a> {
        if !self.is_applicable(cart) || !covers(&self.requirements(), cart) {
            return Applied::unchanged(cart);
        }

        let residual = self
            .entries
            .iter()
            .fold(cart.clone(), |residual, entry| remove(entry.line(), &residual));

        Applied::bundled(residual, self.discounted_price, 1)
    }
}
