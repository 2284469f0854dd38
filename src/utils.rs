//! Utils

use clap::Parser;

/// Arguments for the basket demo
#[derive(Debug, Parser)]
pub struct ExampleBasketArgs {
    /// Fixture set to use for the catalog & promotions
    #[clap(short, long, default_value = "groceries")]
    pub fixture: String,

    /// Cart fixture to price, defaults to the fixture set's own cart
    #[clap(short, long)]
    pub cart: Option<String>,
}

impl ExampleBasketArgs {
    /// Name of the cart fixture to load
    pub fn cart_name(&self) -> &str {
        self.cart.as_deref().unwrap_or(&self.fixture)
    }
}
