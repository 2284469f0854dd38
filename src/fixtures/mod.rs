//! Fixtures
//!
//! Catalogs, promotions and carts loaded from YAML files laid out as
//! `<base>/products/<name>.yml`, `<base>/promotions/<name>.yml` and
//! `<base>/carts/<name>.yml`.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use slotmap::SlotMap;
use thiserror::Error;
use tracing::debug;

use crate::{
    cart::{Cart, CartError, CartItem},
    catalog::{Catalog, CatalogError},
    engine::PricingEngine,
    fixtures::{
        carts::CartFixture,
        products::{ProductsFixture, parse_currency},
        promotions::PromotionsFixture,
    },
    products::{Product, ProductKey},
    promotions::{Promotion, PromotionError, PromotionKey, PromotionMeta},
};

pub mod carts;
pub mod products;
pub mod promotions;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between product files
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No products loaded yet
    #[error("No products loaded yet; currency unknown")]
    NoCurrency,

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Promotion not found
    #[error("Promotion not found: {0}")]
    PromotionNotFound(String),

    /// Catalog construction error
    #[error("Invalid product: {0}")]
    Catalog(#[from] CatalogError),

    /// Cart construction error
    #[error("Invalid cart: {0}")]
    Cart(#[from] CartError),

    /// Promotion construction error
    #[error("Invalid promotion: {0}")]
    Promotion(#[from] PromotionError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Catalog, created once the first products file is loaded
    catalog: Option<Catalog<'static>>,

    /// Promotion metadata with generated keys
    promotion_meta: SlotMap<PromotionKey, PromotionMeta>,

    /// String key -> `SlotMap` key mappings for lookups
    product_keys: FxHashMap<String, ProductKey>,
    promotion_keys: FxHashMap<String, PromotionKey>,

    /// Pre-built cart lines
    lines: Vec<CartItem<'static>>,

    /// Pre-built promotions
    promotions: Vec<Promotion<'static>>,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            catalog: None,
            promotion_meta: SlotMap::with_key(),
            product_keys: FxHashMap::default(),
            promotion_keys: FxHashMap::default(),
            lines: Vec::new(),
            promotions: Vec::new(),
        }
    }

    /// Load products from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if there are currency mismatches.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: ProductsFixture = serde_norway::from_str(&contents)?;

        let currency = parse_currency(&fixture.currency)?;
        let catalog = self.catalog.get_or_insert_with(|| Catalog::new(currency));

        if catalog.currency() != currency {
            return Err(FixtureError::CurrencyMismatch(
                catalog.currency().iso_alpha_code.to_string(),
                currency.iso_alpha_code.to_string(),
            ));
        }

        // Sorted so that catalog order does not depend on hash order.
        let mut products: Vec<_> = fixture.products.into_iter().collect();
        products.sort_by(|(a, _), (b, _)| a.cmp(b));

        for (key, product) in products {
            let price = Money::from_minor(product.price, currency);
            let item = catalog.insert(Product::new(product.name, price))?;

            self.product_keys.insert(key, item.product());
        }

        debug!(name, products = catalog.len(), "loaded products fixture");

        Ok(self)
    }

    /// Load cart lines from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if referenced products don't exist.
    pub fn load_cart(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("carts").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: CartFixture = serde_norway::from_str(&contents)?;

        let catalog = self.catalog.as_ref().ok_or(FixtureError::NoCurrency)?;

        for line in fixture.items {
            let item = self
                .product_keys
                .get(&line.product)
                .and_then(|key| catalog.item(*key))
                .ok_or_else(|| FixtureError::ProductNotFound(line.product.clone()))?;

            self.lines.push(CartItem::new(item, line.quantity)?);
        }

        debug!(name, lines = self.lines.len(), "loaded cart fixture");

        Ok(self)
    }

    /// Load promotions from a YAML fixture file
    ///
    /// Promotions are added in key order.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a promotion is invalid.
    pub fn load_promotions(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self
            .base_path
            .join("promotions")
            .join(format!("{name}.yml"));

        let contents = fs::read_to_string(&file_path)?;
        let fixture: PromotionsFixture = serde_norway::from_str(&contents)?;

        let catalog = self.catalog.as_ref().ok_or(FixtureError::NoCurrency)?;

        let mut promotions: Vec<_> = fixture.promotions.into_iter().collect();
        promotions.sort_by(|(a, _), (b, _)| a.cmp(b));

        for (key, promotion_fixture) in promotions {
            let promotion_key = self.promotion_meta.insert(PromotionMeta::default());

            let (meta, promotion) =
                promotion_fixture.try_into_promotion(promotion_key, catalog, &self.product_keys)?;

            if let Some(meta_slot) = self.promotion_meta.get_mut(promotion_key) {
                *meta_slot = meta;
            }

            self.promotions.push(promotion);
            self.promotion_keys.insert(key, promotion_key);
        }

        debug!(
            name,
            promotions = self.promotions.len(),
            "loaded promotions fixture"
        );

        Ok(self)
    }

    /// Load a complete fixture set (products, promotions and cart with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture
            .load_products(name)?
            .load_promotions(name)?
            .load_cart(name)?;

        Ok(fixture)
    }

    /// Get the catalog
    ///
    /// # Errors
    ///
    /// Returns an error if no products have been loaded yet.
    pub fn catalog(&self) -> Result<&Catalog<'static>, FixtureError> {
        self.catalog.as_ref().ok_or(FixtureError::NoCurrency)
    }

    /// Get the currency
    ///
    /// # Errors
    ///
    /// Returns an error if no products have been loaded yet.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        Ok(self.catalog()?.currency())
    }

    /// Get a catalog item by its string key
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product_key(&self, key: &str) -> Result<ProductKey, FixtureError> {
        self.product_keys
            .get(key)
            .copied()
            .ok_or_else(|| FixtureError::ProductNotFound(key.to_string()))
    }

    /// Get a promotion by its string key
    ///
    /// # Errors
    ///
    /// Returns an error if the promotion is not found.
    pub fn promotion(&self, key: &str) -> Result<&Promotion<'static>, FixtureError> {
        let promotion_key = self
            .promotion_keys
            .get(key)
            .ok_or_else(|| FixtureError::PromotionNotFound(key.to_string()))?;

        self.promotions
            .iter()
            .find(|p| p.key() == *promotion_key)
            .ok_or_else(|| FixtureError::PromotionNotFound(key.to_string()))
    }

    /// Get all promotions
    pub fn promotions(&self) -> &[Promotion<'static>] {
        &self.promotions
    }

    /// Create a cart from the loaded lines
    ///
    /// # Errors
    ///
    /// Returns an error if no products are loaded or if cart creation fails.
    pub fn cart(&self) -> Result<Cart<'static>, FixtureError> {
        Ok(Cart::with_items(self.lines.iter().copied(), self.currency()?)?)
    }

    /// Create a pricing engine over the loaded catalog and promotions
    ///
    /// # Errors
    ///
    /// Returns an error if no products have been loaded yet.
    pub fn engine(&self) -> Result<PricingEngine<'static>, FixtureError> {
        Ok(PricingEngine::new(
            self.catalog()?.clone(),
            self.promotions.clone(),
        ))
    }

    /// Get the promotion metadata `SlotMap`
    pub fn promotion_meta_map(&self) -> &SlotMap<PromotionKey, PromotionMeta> {
        &self.promotion_meta
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
