//! Checkout module.
//!
//! Contains the checkout form, shipping and payment choices, and order
//! placement. Payment is never processed.

pub(crate) mod form;
mod order;
mod shipping;

pub use form::{
    is_valid_email, is_valid_phone, is_valid_postal_code, CheckoutForm, FieldError, FormField,
    ValidationErrors,
};
pub use order::{place_order, Order, OrderLineItem};
pub use shipping::{PaymentMethod, ShippingMethod, ShippingRates};
