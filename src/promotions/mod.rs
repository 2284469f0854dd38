//! Promotions

use rusty_money::{Money, iso::Currency};
use slotmap::new_key_type;
use thiserror::Error;

use crate::{
    cart::Cart,
    pricing::TotalPriceError,
    promotions::{
        applications::Applied, quantity_bundle::QuantityBundlePromotion,
        unit_price_override::UnitPriceOverridePromotion,
    },
};

pub mod applications;
pub mod quantity_bundle;
pub mod unit_price_override;

new_key_type! {
    /// Promotion Key
    pub struct PromotionKey;
}

/// Promotion metadata
#[derive(Debug, Default)]
pub struct PromotionMeta {
    /// Promotion name
    pub name: String,
}

/// Errors raised while constructing a promotion.
#[derive(Debug, Error, PartialEq)]
pub enum PromotionError {
    /// A required quantity was zero.
    #[error("promotion quantities must be at least one")]
    InvalidQuantity,

    /// A promotion price was below zero (minor units).
    #[error("promotion price must not be negative, got {0}")]
    NegativePrice(i64),

    /// A bundle was defined without any entries.
    #[error("bundle promotions need at least one entry")]
    EmptyBundle,

    /// Prices within the promotion use different currencies (found, expected).
    #[error("promotion price has currency {0}, expected {1}")]
    CurrencyMismatch(&'static str, &'static str),

    /// The bundle price could not be calculated.
    #[error(transparent)]
    Price(#[from] TotalPriceError),
}

/// Promotion enum
#[derive(Debug, Clone, PartialEq)]
pub enum Promotion<'a> {
    /// Fixed total price for a quantity of one item
    QuantityBundle(QuantityBundlePromotion<'a>),

    /// Multi-item bundle with optional per-item unit price overrides
    UnitPriceOverride(Box<UnitPriceOverridePromotion<'a>>),
}

impl<'a> Promotion<'a> {
    /// Return the promotion key.
    pub fn key(&self) -> PromotionKey {
        match self {
            Promotion::QuantityBundle(quantity_bundle) => quantity_bundle.key(),
            Promotion::UnitPriceOverride(unit_price_override) => unit_price_override.key(),
        }
    }

    /// Price charged for one instance of the promotion's bundle.
    pub fn discounted_price(&self) -> &Money<'a, Currency> {
        match self {
            Promotion::QuantityBundle(quantity_bundle) => quantity_bundle.discounted_price(),
            Promotion::UnitPriceOverride(unit_price_override) => {
                unit_price_override.discounted_price()
            }
        }
    }

    /// Return whether this promotion _might_ apply to the given cart.
    pub fn is_applicable(&self, cart: &Cart<'_>) -> bool {
        match self {
            Promotion::QuantityBundle(quantity_bundle) => quantity_bundle.is_applicable(cart),
            Promotion::UnitPriceOverride(unit_price_override) => {
                unit_price_override.is_applicable(cart)
            }
        }
    }

    /// Apply the promotion to the cart, returning the residual cart and what was charged.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if a charge does not fit in minor units.
    pub fn apply(&self, cart: &Cart<'a>) -> Result<Applied<'a>, TotalPriceError> {
        match self {
            Promotion::QuantityBundle(quantity_bundle) => quantity_bundle.apply(cart),
            Promotion::UnitPriceOverride(unit_price_override) => {
                Ok(unit_price_override.apply(cart))
            }
        }
    }
}

impl<'a> From<QuantityBundlePromotion<'a>> for Promotion<'a> {
    fn from(promotion: QuantityBundlePromotion<'a>) -> Self {
        Promotion::QuantityBundle(promotion)
    }
}

impl<'a> From<UnitPriceOverridePromotion<'a>> for Promotion<'a> {
    fn from(promotion: UnitPriceOverridePromotion<'a>) -> Self {
        Promotion::UnitPriceOverride(Box::new(promotion))
    }
}

/// Wrap a concrete promotion in [`Promotion`].
pub fn promotion<'a>(promotion: impl Into<Promotion<'a>>) -> Promotion<'a> {
    promotion.into()
}
