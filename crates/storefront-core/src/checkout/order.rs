//! Order placement.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cart::Cart;
use crate::checkout::{CheckoutForm, PaymentMethod, ShippingMethod, ShippingRates};
use crate::error::CommerceError;
use crate::ids::{OrderId, ProductId};
use crate::money::Money;

/// A placed order.
///
/// Line items copy the product name and price at the moment of purchase so
/// the order reads the same after the cart is cleared.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: OrderId,
    /// Human-readable order number (e.g., "ORD-20260101-3F2A").
    pub order_number: String,
    pub placed_at: DateTime<Utc>,
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub shipping_address: String,
    pub shipping_method: ShippingMethod,
    pub payment_method: PaymentMethod,
    pub line_items: Vec<OrderLineItem>,
    pub subtotal: Money,
    pub shipping_total: Money,
    pub grand_total: Money,
}

impl Order {
    /// Sum of quantities.
    pub fn item_count(&self) -> i64 {
        self.line_items.iter().map(|i| i.quantity).sum()
    }
}

/// A line on a placed order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLineItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub unit_price: Money,
    pub quantity: i64,
    pub total: Money,
}

/// Validate the form, turn the cart into an order and empty the cart.
///
/// The cart is left untouched when the cart is empty or the form is
/// invalid.
pub fn place_order(
    cart: &mut Cart,
    form: &CheckoutForm,
    rates: &ShippingRates,
) -> Result<Order, CommerceError> {
    if cart.is_empty() {
        return Err(CommerceError::EmptyCart);
    }
    form.validate()?;

    let pricing = cart.pricing(rates.rate(form.shipping_method));
    let line_items = cart
        .items()
        .iter()
        .map(|item| OrderLineItem {
            product_id: item.product.id.clone(),
            product_name: item.product.name.clone(),
            unit_price: item.product.price,
            quantity: item.quantity,
            total: item.line_total(),
        })
        .collect();

    let id = OrderId::generate();
    let placed_at = Utc::now();
    let order = Order {
        order_number: order_number(&id, &placed_at),
        id,
        placed_at,
        customer_name: form.full_name(),
        email: form.email.trim().to_string(),
        phone: form.phone.trim().to_string(),
        shipping_address: form.one_line_address(),
        shipping_method: form.shipping_method,
        payment_method: form.payment_method,
        line_items,
        subtotal: pricing.subtotal,
        shipping_total: pricing.shipping_total,
        grand_total: pricing.grand_total,
    };

    cart.clear_cart();
    info!(
        order_number = %order.order_number,
        items = order.item_count(),
        total = %order.grand_total,
        "placed order"
    );

    Ok(order)
}

fn order_number(id: &OrderId, placed_at: &DateTime<Utc>) -> String {
    let id = id.as_str();
    let suffix = &id[id.len().saturating_sub(4)..];
    format!(
        "ORD-{}-{}",
        placed_at.format("%Y%m%d"),
        suffix.to_uppercase()
    )
}
