//! Promotion Fixtures

use rusty_money::Money;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::{
    catalog::{Catalog, CatalogItem},
    fixtures::FixtureError,
    products::ProductKey,
    promotions::{
        Promotion, PromotionKey, PromotionMeta, quantity_bundle::QuantityBundlePromotion,
        unit_price_override::{BundleEntry, UnitPriceOverridePromotion},
    },
};

/// Wrapper for promotions in YAML
#[derive(Debug, Deserialize)]
pub struct PromotionsFixture {
    /// Map of promotion key -> promotion fixture
    pub promotions: FxHashMap<String, PromotionFixture>,
}

/// Promotion fixture from YAML
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PromotionFixture {
    /// Fixed total price for a quantity of one product
    QuantityBundle {
        /// Promotion name
        name: String,

        /// Product key
        product: String,

        /// Quantity making up one bundle
        quantity: u32,

        /// Bundle price in minor units
        price: i64,
    },

    /// Multi-product bundle with optional unit price overrides
    UnitPriceOverride {
        /// Promotion name
        name: String,

        /// Bundle entries, in consumption order
        entries: Vec<BundleEntryFixture>,
    },
}

/// Bundle entry fixture from YAML
#[derive(Debug, Deserialize)]
pub struct BundleEntryFixture {
    /// Product key
    pub product: String,

    /// Quantity required
    pub quantity: u32,

    /// Override unit price in minor units
    #[serde(default)]
    pub price: Option<i64>,
}

impl PromotionFixture {
    /// Convert to `PromotionMeta` and `Promotion`, resolving product keys against the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if a product is unknown or the promotion is invalid.
    pub fn try_into_promotion(
        self,
        key: PromotionKey,
        catalog: &Catalog<'static>,
        product_keys: &FxHashMap<String, ProductKey>,
    ) -> Result<(PromotionMeta, Promotion<'static>), FixtureError> {
        let currency = catalog.currency();

        match self {
            PromotionFixture::QuantityBundle {
                name,
                product,
                quantity,
                price,
            } => {
                let item = resolve(&product, catalog, product_keys)?;

                let promotion = QuantityBundlePromotion::new(
                    key,
                    item,
                    quantity,
                    Money::from_minor(price, currency),
                )?;

                Ok((PromotionMeta { name }, promotion.into()))
            }
            PromotionFixture::UnitPriceOverride { name, entries } => {
                let entries = entries
                    .into_iter()
                    .map(|entry| {
                        let item = resolve(&entry.product, catalog, product_keys)?;
                        let price = entry.price.map(|minor| Money::from_minor(minor, currency));

                        Ok(BundleEntry::new(item, entry.quantity, price)?)
                    })
                    .collect::<Result<Vec<_>, FixtureError>>()?;

                let promotion = UnitPriceOverridePromotion::new(key, entries)?;

                Ok((PromotionMeta { name }, promotion.into()))
            }
        }
    }
}

fn resolve(
    product: &str,
    catalog: &Catalog<'static>,
    product_keys: &FxHashMap<String, ProductKey>,
) -> Result<CatalogItem<'static>, FixtureError> {
    product_keys
        .get(product)
        .and_then(|key| catalog.item(*key))
        .ok_or_else(|| FixtureError::ProductNotFound(product.to_string()))
}
