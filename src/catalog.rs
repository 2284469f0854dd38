//! Catalog
//!
//! The authoritative set of purchasable products and their regular unit prices.

use rusty_money::{Money, iso::Currency};
use slotmap::SlotMap;
use thiserror::Error;

use crate::products::{Product, ProductKey};

/// Errors related to catalog construction.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// A product's currency differs from the catalog currency (product currency, catalog currency).
    #[error("Product has currency {0}, but catalog has currency {1}")]
    CurrencyMismatch(&'static str, &'static str),

    /// A product was given a negative unit price.
    #[error("Product {0} has a negative price")]
    NegativePrice(String),
}

/// A reference to a catalog product along with the unit price it was listed at.
///
/// Two catalog items are equal when both the product and the price match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogItem<'a> {
    product: ProductKey,
    price: Money<'a, Currency>,
}

impl<'a> CatalogItem<'a> {
    /// Create a new catalog item.
    pub fn new(product: ProductKey, price: Money<'a, Currency>) -> Self {
        Self { product, price }
    }

    /// Returns the product key
    pub fn product(&self) -> ProductKey {
        self.product
    }

    /// Returns the unit price
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.price
    }
}

/// Catalog
#[derive(Debug, Clone)]
pub struct Catalog<'a> {
    products: SlotMap<ProductKey, Product<'a>>,
    currency: &'static Currency,
}

impl<'a> Catalog<'a> {
    /// Create an empty catalog priced in the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            products: SlotMap::with_key(),
            currency,
        }
    }

    /// Add a product to the catalog, returning its catalog item.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::CurrencyMismatch`]: the product is priced in another currency.
    /// - [`CatalogError::NegativePrice`]: the product price is below zero.
    pub fn insert(&mut self, product: Product<'a>) -> Result<CatalogItem<'a>, CatalogError> {
        let product_currency = product.price.currency();

        if product_currency != self.currency {
            return Err(CatalogError::CurrencyMismatch(
                product_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if product.price.to_minor_units() < 0 {
            return Err(CatalogError::NegativePrice(product.name));
        }

        let price = product.price;
        let key = self.products.insert(product);

        Ok(CatalogItem::new(key, price))
    }

    /// Get a product by key.
    pub fn get(&self, key: ProductKey) -> Option<&Product<'a>> {
        self.products.get(key)
    }

    /// Get the catalog item for a product key.
    pub fn item(&self, key: ProductKey) -> Option<CatalogItem<'a>> {
        self.products
            .get(key)
            .map(|product| CatalogItem::new(key, product.price))
    }

    /// Return whether the catalog lists this item at this price.
    pub fn contains(&self, item: &CatalogItem<'_>) -> bool {
        self.products
            .get(item.product())
            .is_some_and(|product| product.price == *item.price())
    }

    /// Iterate over the catalog items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ProductKey, &Product<'a>)> {
        self.products.iter()
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Get the currency of the catalog.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
