//! Shopping cart module.
//!
//! Contains the cart aggregator and its pricing breakdown.

mod cart;
mod pricing;

pub use cart::{Cart, CartItem};
pub use pricing::{CartPricing, LineItemPricing};
