//! Cart pricing breakdown.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Pricing for a cart at checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Sum of line totals.
    pub subtotal: Money,
    /// Shipping charge.
    pub shipping_total: Money,
    /// Subtotal plus shipping.
    pub grand_total: Money,
    /// Sum of quantities.
    pub total_items: i64,
    /// Per-line breakdown.
    pub line_items: Vec<LineItemPricing>,
}

/// Pricing for a single cart line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItemPricing {
    pub product_id: ProductId,
    pub unit_price: Money,
    pub quantity: i64,
    /// Unit price times quantity.
    pub total: Money,
}
