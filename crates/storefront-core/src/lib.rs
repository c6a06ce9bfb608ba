//! Storefront domain types and logic.
//!
//! This crate holds everything the storefront does that is not display:
//!
//! - **Catalog**: the static product and category data
//! - **Search**: conjunctive filtering and sorting over the catalog
//! - **Cart**: quantity-keyed line items and derived totals
//! - **Checkout**: form validation, shipping choice and order placement
//!
//! # Example
//!
//! ```rust
//! use storefront_core::prelude::*;
//!
//! let catalog = Catalog::builtin().unwrap();
//!
//! let spec = FilterSpec::new().with_min_rating(4.5);
//! let results = apply(catalog.products(), &spec, SortKey::PriceLow);
//!
//! let mut cart = Cart::new(Currency::USD);
//! cart.add_to_cart(&results[0], 2);
//! assert_eq!(cart.total_items(), 2);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod cart;
pub mod checkout;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Catalog, Category, Product, ProductSpecification};

    // Cart
    pub use crate::cart::{Cart, CartItem, CartPricing, LineItemPricing};

    // Checkout
    pub use crate::checkout::{
        place_order, CheckoutForm, FieldError, FormField, Order, OrderLineItem, PaymentMethod,
        ShippingMethod, ShippingRates, ValidationErrors,
    };

    // Search
    pub use crate::search::{apply, FilterSpec, SortKey};
}
