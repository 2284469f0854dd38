//! Cheapest Cart Receipt Example
//!
//! Prices a fixture cart under every ordering of the fixture promotions and prints the receipt.
//!
//! Use `-f` to load a fixture set by name
//! Use `-c` to price a different cart from `fixtures/carts`
//! Set `RUST_LOG=bundle_pricer=trace` to see each improving ordering

use std::{io, io::Write, time::Instant};

use anyhow::Result;
use clap::Parser;
use humanize_duration::{Truncate, prelude::DurationExt};
use tracing_subscriber::EnvFilter;

use bundle_pricer::{fixtures::Fixture, receipt::Receipt, utils::ExampleBasketArgs};

/// Cheapest Cart Receipt Example
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = ExampleBasketArgs::parse();

    let mut fixture = Fixture::new();

    fixture
        .load_products(&args.fixture)?
        .load_promotions(&args.fixture)?
        .load_cart(args.cart_name())?;

    let cart = fixture.cart()?;
    let engine = fixture.engine()?;

    let start = Instant::now();
    let result = engine.solve(&cart)?;
    let elapsed = start.elapsed();

    let permutations = result.permutations_evaluated;
    let receipt = Receipt::from_solver_result(&cart, result)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    receipt.write_to(&mut handle, engine.catalog(), fixture.promotion_meta_map())?;

    writeln!(
        handle,
        " {permutations} orderings in {} ({}s)",
        elapsed.human(Truncate::Nano),
        elapsed.as_secs_f32()
    )?;

    Ok(())
}
