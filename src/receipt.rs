//! Receipt

use std::io;

use rusty_money::{Money, MoneyError, iso::Currency};
use slotmap::SlotMap;
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::{Cart, CartItem},
    catalog::Catalog,
    pricing::{TotalPriceError, line_total},
    products::ProductKey,
    promotions::{PromotionKey, PromotionMeta, applications::PromotionApplication},
    solvers::SolverResult,
};

/// Errors that can occur when building a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Error calculating total price from cart lines.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),

    /// Wrapper for money errors.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Error finding a product in the catalog.
    #[error("Missing product")]
    MissingProduct(ProductKey),

    /// Error finding a promotion's metadata.
    #[error("Missing promotion")]
    MissingPromotion(PromotionKey),

    /// IO error
    #[error("IO error")]
    IO,
}

/// Final receipt for a priced cart.
#[derive(Debug, Clone)]
pub struct Receipt<'a> {
    /// Lines purchased at full price, not in any bundle
    full_price_lines: SmallVec<[CartItem<'a>; 10]>,

    /// Promotions applied, in application order
    promotion_applications: SmallVec<[PromotionApplication<'a>; 10]>,

    /// Total cost before any promotion applications
    subtotal: Money<'a, Currency>,

    /// Total amount paid after promotion applications
    total: Money<'a, Currency>,

    /// Currency used for all monetary values
    currency: &'static Currency,
}

impl<'a> Receipt<'a> {
    /// Build a receipt from a cart and the solver result for it.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if the cart subtotal cannot be calculated.
    pub fn from_solver_result(
        cart: &Cart<'a>,
        result: SolverResult<'a>,
    ) -> Result<Self, ReceiptError> {
        Ok(Receipt {
            full_price_lines: result.full_price_lines,
            promotion_applications: result.promotion_applications,
            subtotal: cart.subtotal()?,
            total: result.total,
            currency: cart.currency(),
        })
    }

    /// Total cost before any promotion applications
    #[must_use]
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// Total amount paid for the cart
    #[must_use]
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Calculate the savings made by applying promotions.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the subtraction operation fails.
    pub fn savings(&self) -> Result<Money<'a, Currency>, MoneyError> {
        self.subtotal.sub(self.total)
    }

    /// Lines charged at full price.
    #[must_use]
    pub fn full_price_lines(&self) -> &[CartItem<'a>] {
        &self.full_price_lines
    }

    /// Promotions applied, in application order.
    #[must_use]
    pub fn promotion_applications(&self) -> &[PromotionApplication<'a>] {
        &self.promotion_applications
    }

    /// Currency used for all monetary values.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Writes the receipt as a table followed by the totals.
    ///
    /// # Errors
    ///
    /// Returns an error if a product or promotion is unknown, or the receipt cannot be written.
    pub fn write_to(
        &self,
        mut out: impl io::Write,
        catalog: &Catalog<'_>,
        promotion_meta: &SlotMap<PromotionKey, PromotionMeta>,
    ) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Qty", "Unit Price", "Price"]);

        for app in &self.promotion_applications {
            let meta = promotion_meta
                .get(app.promotion_key)
                .ok_or(ReceiptError::MissingPromotion(app.promotion_key))?;

            builder.push_record([
                meta.name.clone(),
                format!("{}x", app.bundles),
                String::new(),
                format!("{}", app.charge),
            ]);
        }

        for line in &self.full_price_lines {
            let product = catalog
                .get(line.item().product())
                .ok_or(ReceiptError::MissingProduct(line.item().product()))?;

            builder.push_record([
                product.name.clone(),
                line.quantity().to_string(),
                format!("{}", line.item().price()),
                format!("{}", line_total(line)?),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(1..4), Alignment::right());

        writeln!(out, "\n{table}").map_err(|_err| ReceiptError::IO)?;

        writeln!(out, " Subtotal: {}", self.subtotal).map_err(|_err| ReceiptError::IO)?;
        writeln!(out, " Total:    {}", self.total).map_err(|_err| ReceiptError::IO)?;
        writeln!(out, " Savings:  {}", self.savings()?).map_err(|_err| ReceiptError::IO)?;

        Ok(())
    }
}
