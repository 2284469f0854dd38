//! Cart Fixtures

use serde::Deserialize;

/// Wrapper for a cart in YAML
#[derive(Debug, Deserialize)]
pub struct CartFixture {
    /// Cart lines, in order
    pub items: Vec<CartLineFixture>,
}

/// Cart line fixture from YAML
#[derive(Debug, Deserialize)]
pub struct CartLineFixture {
    /// Product key
    pub product: String,

    /// Quantity bought
    pub quantity: u32,
}
