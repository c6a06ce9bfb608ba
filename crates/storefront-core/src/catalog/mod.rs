//! Product catalog module.
//!
//! Contains the product and category records and the read-only store
//! that holds them.

mod category;
pub(crate) mod product;
mod store;

pub use category::Category;
pub use product::{Product, ProductSpecification};
pub use store::Catalog;
