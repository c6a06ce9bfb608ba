//! Sort keys and the filter/sort engine.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Product;
use crate::search::FilterSpec;

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Catalog order.
    #[default]
    Default,
    /// Price, low to high.
    PriceLow,
    /// Price, high to low.
    PriceHigh,
    /// Highest rated first.
    Rating,
    /// Last catalog entry first. The catalog has no timestamps, so position
    /// stands in for recency.
    Newest,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Default,
        SortKey::PriceLow,
        SortKey::PriceHigh,
        SortKey::Rating,
        SortKey::Newest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Default => "default",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Rating => "rating",
            SortKey::Newest => "newest",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortKey::Default => "Featured",
            SortKey::PriceLow => "Price: Low to High",
            SortKey::PriceHigh => "Price: High to Low",
            SortKey::Rating => "Highest Rated",
            SortKey::Newest => "Newest",
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("unknown sort key: {}", s))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter the catalog and order the survivors.
///
/// The input slice is never reordered. All sorts are stable, so ties keep
/// their catalog order. The returned products are shared with the catalog.
pub fn apply(catalog: &[Arc<Product>], spec: &FilterSpec, sort: SortKey) -> Vec<Arc<Product>> {
    let mut results: Vec<Arc<Product>> = catalog
        .iter()
        .filter(|p| spec.matches(p))
        .cloned()
        .collect();

    match sort {
        SortKey::Default => {}
        SortKey::PriceLow => {
            results.sort_by(|a, b| a.price.amount_cents.cmp(&b.price.amount_cents))
        }
        SortKey::PriceHigh => {
            results.sort_by(|a, b| b.price.amount_cents.cmp(&a.price.amount_cents))
        }
        SortKey::Rating => results.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortKey::Newest => results.reverse(),
    }

    debug!(
        search = %spec.search_text,
        category = spec.category_slug.as_deref().unwrap_or("all"),
        brand = spec.brand.as_deref().unwrap_or("all"),
        sort = sort.as_str(),
        matched = results.len(),
        total = catalog.len(),
        "applied catalog filter"
    );

    results
}
