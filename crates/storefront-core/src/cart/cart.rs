//! Cart and cart item types.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::cart::{CartPricing, LineItemPricing};
use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// A shopping cart for one session.
///
/// Items keep the order they were first added in, and there is at most one
/// item per product id. Operations never fail: a quantity below one on add,
/// an id that is not in the cart, or a change that would overflow the
/// cart's item count or total leaves the cart unchanged and the method
/// returns `false`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
    currency: Currency,
}

impl Cart {
    /// Create an empty cart.
    pub fn new(currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            currency,
        }
    }

    /// Add `quantity` of a product.
    ///
    /// An existing line is incremented rather than overwritten.
    pub fn add_to_cart(&mut self, product: &Arc<Product>, quantity: i64) -> bool {
        if quantity < 1 {
            debug!(product_id = %product.id, quantity, "ignored add with non-positive quantity");
            return false;
        }

        let current = self.get_item(&product.id).map_or(0, |i| i.quantity);
        let fits = current
            .checked_add(quantity)
            .and_then(|total| self.checked_totals(&product.id, product.price, total));
        if fits.is_none() {
            debug!(product_id = %product.id, quantity, "ignored add that would overflow cart totals");
            return false;
        }

        if let Some(existing) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            existing.quantity += quantity;
            debug!(product_id = %product.id, quantity = existing.quantity, "incremented cart item");
            return true;
        }

        self.items.push(CartItem {
            product: Arc::clone(product),
            quantity,
        });
        debug!(product_id = %product.id, quantity, "added cart item");
        true
    }

    /// Remove a product's line.
    pub fn remove_from_cart(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.product.id != product_id);
        let removed = self.items.len() < len_before;
        if removed {
            debug!(product_id = %product_id, "removed cart item");
        }
        removed
    }

    /// Set a line's quantity. Zero or less removes the line.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_from_cart(product_id);
        }

        let Some(price) = self.get_item(product_id).map(|i| i.product.price) else {
            return false;
        };
        if self.checked_totals(product_id, price, quantity).is_none() {
            debug!(product_id = %product_id, quantity, "ignored update that would overflow cart totals");
            return false;
        }

        match self.items.iter_mut().find(|i| &i.product.id == product_id) {
            Some(item) => {
                item.quantity = quantity;
                debug!(product_id = %product_id, quantity, "updated cart item quantity");
                true
            }
            None => false,
        }
    }

    /// Remove every line.
    pub fn clear_cart(&mut self) {
        self.items.clear();
        debug!("cleared cart");
    }

    /// Sum of all quantities.
    pub fn total_items(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Sum of price times quantity over all lines.
    pub fn total_price(&self) -> Money {
        self.items
            .iter()
            .fold(Money::zero(self.currency), |acc, item| acc + item.line_total())
    }

    /// Price breakdown including a shipping charge.
    pub fn pricing(&self, shipping: Money) -> CartPricing {
        let line_items = self
            .items
            .iter()
            .map(|item| LineItemPricing {
                product_id: item.product.id.clone(),
                unit_price: item.product.price,
                quantity: item.quantity,
                total: item.line_total(),
            })
            .collect();
        let subtotal = self.total_price();

        CartPricing {
            subtotal,
            shipping_total: shipping,
            grand_total: Money::new(
                subtotal.amount_cents.saturating_add(shipping.amount_cents),
                self.currency,
            ),
            total_items: self.total_items(),
            line_items,
        }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn get_item(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.product.id == product_id)
    }

    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.get_item(product_id).is_some()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Item count and price total if `product_id`'s line held `quantity`,
    /// or `None` if either would overflow.
    fn checked_totals(&self, product_id: &ProductId, price: Money, quantity: i64) -> Option<(i64, Money)> {
        self.items
            .iter()
            .filter(|i| &i.product.id != product_id)
            .map(|i| (i.quantity, i.product.price))
            .chain(std::iter::once((quantity, price)))
            .try_fold((0_i64, Money::zero(self.currency)), |(items, total), (qty, price)| {
                Some((items.checked_add(qty)?, total.checked_add(price.checked_mul(qty)?)?))
            })
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}

/// One line in the cart.
///
/// The product is shared with the catalog, so the line always prices at
/// the product's captured price.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CartItem {
    pub product: Arc<Product>,
    pub quantity: i64,
}

impl CartItem {
    /// Price times quantity.
    pub fn line_total(&self) -> Money {
        self.product.price * self.quantity
    }
}
