//! Integration tests for cheapest-cart pricing

use rusty_money::{Money, iso::GBP};
use testresult::TestResult;

use bundle_pricer::prelude::*;

struct Shop {
    catalog: Catalog<'static>,
    apple: CatalogItem<'static>,
    bread: CatalogItem<'static>,
    margarine: CatalogItem<'static>,
    jam: CatalogItem<'static>,
}

fn shop() -> Result<Shop, CatalogError> {
    let mut catalog = Catalog::new(GBP);

    let apple = catalog.insert(Product::new("Apple", Money::from_minor(199, GBP)))?;
    let bread = catalog.insert(Product::new("Bread", Money::from_minor(300, GBP)))?;
    let margarine = catalog.insert(Product::new("Margarine", Money::from_minor(250, GBP)))?;
    let jam = catalog.insert(Product::new("Jam", Money::from_minor(180, GBP)))?;

    Ok(Shop {
        catalog,
        apple,
        bread,
        margarine,
        jam,
    })
}

fn cart(lines: &[(CatalogItem<'static>, u32)]) -> TestResult<Cart<'static>> {
    let lines = lines
        .iter()
        .map(|(item, quantity)| CartItem::new(*item, *quantity))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Cart::with_items(lines, GBP)?)
}

fn apples_two_for_215(shop: &Shop) -> Result<Promotion<'static>, PromotionError> {
    Ok(promotion(QuantityBundlePromotion::new(
        PromotionKey::default(),
        shop.apple,
        2,
        Money::from_minor(215, GBP),
    )?))
}

fn breakfast(shop: &Shop) -> Result<Promotion<'static>, PromotionError> {
    Ok(promotion(UnitPriceOverridePromotion::new(
        PromotionKey::default(),
        [
            BundleEntry::new(shop.bread, 1, None)?,
            BundleEntry::new(shop.margarine, 1, None)?,
            BundleEntry::new(shop.margarine, 1, Some(Money::from_minor(0, GBP)))?,
        ],
    )?))
}

#[test]
fn unknown_item_is_rejected_before_pricing() -> TestResult {
    let shop = shop()?;
    let mut other = Catalog::new(GBP);
    let stranger = other.insert(Product::new("Stranger", Money::from_minor(100, GBP)))?;

    let cart = cart(&[(shop.apple, 1), (stranger, 1)])?;
    let result = bundle_cart_to_lowest_price(&shop.catalog, &[], &cart);

    assert!(matches!(
        result,
        Err(SolverError::InvalidCart(ValidationError::UnknownItem { line: 1, .. }))
    ));

    Ok(())
}

#[test]
fn stale_catalog_price_is_rejected() -> TestResult {
    let shop = shop()?;
    let repriced = CatalogItem::new(shop.apple.product(), Money::from_minor(99, GBP));

    let cart = cart(&[(repriced, 1)])?;
    let result = bundle_cart_to_lowest_price(&shop.catalog, &[], &cart);

    assert!(matches!(result, Err(SolverError::InvalidCart(_))));

    Ok(())
}

#[test]
fn no_promotions_charges_regular_prices() -> TestResult {
    let shop = shop()?;
    let cart = cart(&[(shop.apple, 3), (shop.bread, 2), (shop.jam, 1)])?;

    let total = bundle_cart_to_lowest_price(&shop.catalog, &[], &cart)?;

    assert_eq!(total, Money::from_minor(3 * 199 + 2 * 300 + 180, GBP));

    Ok(())
}

#[test]
fn quantity_bundle_consumes_whole_bundles() -> TestResult {
    let shop = shop()?;
    let promotions = [apples_two_for_215(&shop)?];

    let four = cart(&[(shop.apple, 4)])?;
    let five = cart(&[(shop.apple, 5)])?;

    assert_eq!(
        bundle_cart_to_lowest_price(&shop.catalog, &promotions, &four)?,
        Money::from_minor(430, GBP)
    );

    assert_eq!(
        bundle_cart_to_lowest_price(&shop.catalog, &promotions, &five)?,
        Money::from_minor(629, GBP)
    );

    Ok(())
}

#[test]
fn quantity_bundle_split_lines_price_the_same_in_either_order() -> TestResult {
    let shop = shop()?;
    let promotions = [apples_two_for_215(&shop)?];

    let three_then_two = cart(&[(shop.apple, 3), (shop.apple, 2)])?;
    let two_then_three = cart(&[(shop.apple, 2), (shop.apple, 3)])?;

    // One bundle, then the rest at 199 each.
    let expected = Money::from_minor(215 + 3 * 199, GBP);

    assert_eq!(
        bundle_cart_to_lowest_price(&shop.catalog, &promotions, &three_then_two)?,
        expected
    );
    assert_eq!(
        bundle_cart_to_lowest_price(&shop.catalog, &promotions, &two_then_three)?,
        expected
    );

    Ok(())
}

#[test]
fn unit_price_override_bundle_prices_from_entries() -> TestResult {
    let shop = shop()?;
    let promotion = breakfast(&shop)?;

    assert_eq!(promotion.discounted_price(), &Money::from_minor(550, GBP));

    Ok(())
}

#[test]
fn unit_price_override_partial_match_charges_regular_prices() -> TestResult {
    let shop = shop()?;
    let promotions = [breakfast(&shop)?];

    let cart = cart(&[(shop.bread, 1), (shop.margarine, 1)])?;
    let result = PermutationSolver::solve(&shop.catalog, &promotions, &cart)?;

    assert_eq!(result.total, Money::from_minor(550, GBP));
    assert!(result.promotion_applications.is_empty());
    assert_eq!(result.full_price_lines.len(), 2);

    Ok(())
}

#[test]
fn unit_price_override_full_match_charges_bundle_price() -> TestResult {
    let shop = shop()?;
    let promotions = [breakfast(&shop)?];

    let cart = cart(&[(shop.bread, 1), (shop.margarine, 2)])?;
    let result = PermutationSolver::solve(&shop.catalog, &promotions, &cart)?;

    assert_eq!(result.total, Money::from_minor(550, GBP));
    assert_eq!(result.promotion_applications.len(), 1);
    assert!(result.full_price_lines.is_empty());

    Ok(())
}

#[test]
fn unit_price_override_leaves_unmatched_lines_at_full_price() -> TestResult {
    let shop = shop()?;
    let promotions = [breakfast(&shop)?];

    let cart = cart(&[(shop.bread, 2), (shop.margarine, 2), (shop.jam, 1)])?;
    let total = bundle_cart_to_lowest_price(&shop.catalog, &promotions, &cart)?;

    assert_eq!(total, Money::from_minor(550 + 300 + 180, GBP));

    Ok(())
}

#[test]
fn cheapest_ordering_wins_when_promotions_compete() -> TestResult {
    let shop = shop()?;

    // Both promotions want the only loaf.
    let bread_and_jam = promotion(UnitPriceOverridePromotion::new(
        PromotionKey::default(),
        [
            BundleEntry::new(shop.bread, 1, None)?,
            BundleEntry::new(shop.jam, 1, Some(Money::from_minor(100, GBP)))?,
        ],
    )?);

    let bread_and_free_margarine = promotion(UnitPriceOverridePromotion::new(
        PromotionKey::default(),
        [
            BundleEntry::new(shop.bread, 1, None)?,
            BundleEntry::new(shop.margarine, 1, Some(Money::from_minor(0, GBP)))?,
        ],
    )?);

    let cart = cart(&[(shop.bread, 1), (shop.margarine, 1), (shop.jam, 1)])?;

    // bread & jam first: 400 + 250, free margarine first: 300 + 180
    for promotions in [
        [bread_and_jam.clone(), bread_and_free_margarine.clone()],
        [bread_and_free_margarine.clone(), bread_and_jam.clone()],
    ] {
        let result = PermutationSolver::solve(&shop.catalog, &promotions, &cart)?;

        assert_eq!(result.total, Money::from_minor(480, GBP));
        assert_eq!(result.permutations_evaluated, 2);
        assert_eq!(result.promotion_applications.len(), 1);
    }

    Ok(())
}

#[test]
fn empty_cart_has_no_candidate() -> TestResult {
    let shop = shop()?;
    let promotions = [apples_two_for_215(&shop)?];

    let result = bundle_cart_to_lowest_price(&shop.catalog, &promotions, &Cart::new(GBP));

    assert_eq!(result, Err(SolverError::NoCandidate));

    Ok(())
}

#[test]
fn fully_discounted_cart_totals_zero() -> TestResult {
    let shop = shop()?;

    let free_apples = promotion(QuantityBundlePromotion::new(
        PromotionKey::default(),
        shop.apple,
        1,
        Money::from_minor(0, GBP),
    )?);

    let cart = cart(&[(shop.apple, 3)])?;
    let total = bundle_cart_to_lowest_price(&shop.catalog, &[free_apples], &cart)?;

    assert_eq!(total, Money::from_minor(0, GBP));

    Ok(())
}

#[test]
fn repeated_calls_give_identical_results() -> TestResult {
    let shop = shop()?;
    let promotions = [apples_two_for_215(&shop)?, breakfast(&shop)?];
    let cart = cart(&[(shop.apple, 5), (shop.bread, 1), (shop.margarine, 2)])?;

    let engine = PricingEngine::new(shop.catalog.clone(), promotions.to_vec());

    let first = engine.solve(&cart)?;
    let second = engine.solve(&cart)?;

    assert_eq!(first.total, second.total);
    assert_eq!(first.ordering, second.ordering);
    assert_eq!(first.total, Money::from_minor(629 + 550, GBP));
    assert_eq!(
        bundle_cart_to_lowest_price(&shop.catalog, &promotions, &cart)?,
        first.total
    );

    Ok(())
}
