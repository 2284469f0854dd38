//! Product Fixtures

use rustc_hash::FxHashMap;
use rusty_money::{Findable, iso::Currency};
use serde::Deserialize;

use crate::fixtures::FixtureError;

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// ISO currency code every price is given in (e.g. "GBP")
    pub currency: String,

    /// Map of product key -> product fixture
    pub products: FxHashMap<String, ProductFixture>,
}

/// Product fixture from YAML
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product name
    pub name: String,

    /// Unit price in minor units
    pub price: i64,
}

/// Look up an ISO currency by its alphabetic code.
///
/// # Errors
///
/// Returns [`FixtureError::UnknownCurrency`] if the code is not a known ISO currency.
pub fn parse_currency(code: &str) -> Result<&'static Currency, FixtureError> {
    Currency::find(code).ok_or_else(|| FixtureError::UnknownCurrency(code.to_string()))
}
