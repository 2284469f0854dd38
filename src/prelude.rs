//! Bundle pricer prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartItem},
    catalog::{Catalog, CatalogError, CatalogItem},
    engine::{PricingEngine, bundle_cart_to_lowest_price},
    pricing::{TotalPriceError, total_price},
    products::{Product, ProductKey},
    promotions::{
        Promotion, PromotionError, PromotionKey, PromotionMeta,
        applications::{Applied, PromotionApplication},
        promotion,
        quantity_bundle::QuantityBundlePromotion,
        unit_price_override::{BundleEntry, UnitPriceOverridePromotion},
    },
    receipt::{Receipt, ReceiptError},
    solvers::{Solver, SolverError, SolverResult, permutation::PermutationSolver},
    validation::{ValidationError, is_cart_valid, validate_cart},
};
