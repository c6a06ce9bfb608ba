//! Search module.
//!
//! Filters and sorts the catalog for listing pages.

mod filter;
mod query;

pub use filter::{FilterSpec, ALL, DEFAULT_PRICE_MAX_CENTS};
pub use query::{apply, SortKey};
