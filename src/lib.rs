//! Bundle Pricer
//!
//! Finds the cheapest total for a shopping cart under a set of bundle promotions. Every
//! ordering of the promotions is tried, each promotion consuming what it can from the cart
//! left over by the ones before it, and the lowest total wins.

pub mod cart;
pub mod catalog;
pub mod engine;
pub mod fixtures;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod promotions;
pub mod receipt;
pub mod solvers;
pub mod utils;
pub mod validation;
