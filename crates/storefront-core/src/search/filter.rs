//! Filter specification for catalog listings.

use crate::catalog::Product;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Sentinel accepted by the builders for "no restriction".
pub const ALL: &str = "all";

/// Upper end of the default price range.
pub const DEFAULT_PRICE_MAX_CENTS: i64 = 200_000 * 100;

/// The active filter criteria. All predicates are applied conjunctively.
///
/// `None` for `category_slug` or `brand` means "all".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterSpec {
    /// Case-insensitive text matched against name, description and brand.
    pub search_text: String,
    /// Restrict to one category.
    pub category_slug: Option<String>,
    /// Restrict to one brand (exact match).
    pub brand: Option<String>,
    /// Inclusive lower price bound.
    pub price_min: Money,
    /// Inclusive upper price bound.
    pub price_max: Money,
    /// Minimum rating, 0 disables the predicate.
    pub min_rating: f64,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self::for_currency(Currency::USD)
    }
}

impl FilterSpec {
    /// A spec that matches every product in the default price range.
    pub fn new() -> Self {
        Self::default()
    }

    /// Like [`new`](Self::new), with the price bounds in `currency`.
    pub fn for_currency(currency: Currency) -> Self {
        Self {
            search_text: String::new(),
            category_slug: None,
            brand: None,
            price_min: Money::zero(currency),
            price_max: Money::new(DEFAULT_PRICE_MAX_CENTS, currency),
            min_rating: 0.0,
        }
    }

    /// Set the search text.
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    /// Restrict to a category. `"all"` clears the restriction.
    pub fn with_category(mut self, slug: impl Into<String>) -> Self {
        self.category_slug = selection(slug.into());
        self
    }

    /// Restrict to a brand. `"all"` clears the restriction.
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = selection(brand.into());
        self
    }

    /// Set the inclusive price range.
    pub fn with_price_range(mut self, min: Money, max: Money) -> Self {
        self.price_min = min;
        self.price_max = max;
        self
    }

    /// Set the minimum rating.
    pub fn with_min_rating(mut self, rating: f64) -> Self {
        self.min_rating = rating;
        self
    }

    /// Reset every criterion to its default, keeping the price currency.
    pub fn reset(&mut self) {
        *self = Self::for_currency(self.price_max.currency);
    }

    /// Check every active predicate against a product.
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_text(product)
            && self.matches_category(product)
            && self.matches_brand(product)
            && self.matches_price(product)
            && self.matches_rating(product)
    }

    pub fn matches_text(&self, product: &Product) -> bool {
        if self.search_text.is_empty() {
            return true;
        }
        let needle = self.search_text.to_lowercase();
        [&product.name, &product.description, &product.brand]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    pub fn matches_category(&self, product: &Product) -> bool {
        self.category_slug
            .as_deref()
            .map_or(true, |slug| product.category_slug == slug)
    }

    pub fn matches_brand(&self, product: &Product) -> bool {
        self.brand.as_deref().map_or(true, |brand| product.brand == brand)
    }

    /// Inclusive at both ends. An inverted range matches nothing.
    pub fn matches_price(&self, product: &Product) -> bool {
        let price = product.price.amount_cents;
        self.price_min.amount_cents <= price && price <= self.price_max.amount_cents
    }

    pub fn matches_rating(&self, product: &Product) -> bool {
        self.min_rating <= 0.0 || product.rating >= self.min_rating
    }

    /// Whether any criterion differs from the default. Price bounds are
    /// compared in cents, whatever their currency.
    pub fn is_active(&self) -> bool {
        !self.search_text.is_empty()
            || self.category_slug.is_some()
            || self.brand.is_some()
            || self.price_min.amount_cents != 0
            || self.price_max.amount_cents != DEFAULT_PRICE_MAX_CENTS
            || self.min_rating > 0.0
    }
}

fn selection(value: String) -> Option<String> {
    if value.is_empty() || value == ALL {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::product::fixtures::product;

    #[test]
    fn test_text_matches_any_field_case_insensitively() {
        let mut p = product("1", 10, 4.0);
        p.name = "Galaxy Buds".to_string();
        p.description = "Wireless earbuds".to_string();
        p.brand = "Samsung".to_string();

        assert!(FilterSpec::new().with_search("galaxy").matches_text(&p));
        assert!(FilterSpec::new().with_search("EARBUDS").matches_text(&p));
        assert!(FilterSpec::new().with_search("sung").matches_text(&p));
        assert!(!FilterSpec::new().with_search("pixel").matches_text(&p));
        assert!(FilterSpec::new().matches_text(&p));
    }

    #[test]
    fn test_all_sentinel_clears_restriction() {
        let spec = FilterSpec::new().with_category("all").with_brand("all");
        assert_eq!(spec.category_slug, None);
        assert_eq!(spec.brand, None);
        assert!(!spec.is_active());

        let spec = FilterSpec::new().with_category("audio");
        assert_eq!(spec.category_slug.as_deref(), Some("audio"));
        assert!(spec.is_active());
    }

    #[test]
    fn test_category_and_brand_exact() {
        let p = product("1", 10, 4.0);
        assert!(FilterSpec::new().with_category("gadgets").matches(&p));
        assert!(!FilterSpec::new().with_category("audio").matches(&p));
        assert!(FilterSpec::new().with_brand("Acme").matches(&p));
        assert!(!FilterSpec::new().with_brand("acme").matches(&p));
    }

    #[test]
    fn test_price_bounds_inclusive() {
        let p = product("1", 10, 4.0);
        let at = |min: i64, max: i64| {
            FilterSpec::new().with_price_range(
                Money::new(min, Currency::USD),
                Money::new(max, Currency::USD),
            )
        };
        assert!(at(1000, 1000).matches(&p));
        assert!(at(0, 1000).matches(&p));
        assert!(!at(1001, 5000).matches(&p));
        assert!(!at(0, 999).matches(&p));
        assert!(!at(2000, 500).matches(&p));
    }

    #[test]
    fn test_rating_threshold() {
        let p = product("1", 10, 4.0);
        assert!(FilterSpec::new().with_min_rating(4.0).matches(&p));
        assert!(!FilterSpec::new().with_min_rating(4.5).matches(&p));

        let unrated = product("2", 10, 0.0);
        assert!(FilterSpec::new().matches(&unrated));
    }

    #[test]
    fn test_reset() {
        let mut spec = FilterSpec::new().with_search("x").with_min_rating(3.0);
        spec.reset();
        assert_eq!(spec, FilterSpec::default());
    }

    #[test]
    fn test_non_usd_spec() {
        let mut spec = FilterSpec::for_currency(Currency::EUR);
        assert!(!spec.is_active());
        assert_eq!(spec.price_max.currency, Currency::EUR);

        let mut p = product("1", 10, 4.0);
        p.price = Money::new(1000, Currency::EUR);
        assert!(spec.matches(&p));

        spec = spec.with_search("x").with_price_range(
            Money::new(0, Currency::EUR),
            Money::new(500, Currency::EUR),
        );
        assert!(spec.is_active());
        assert!(!spec.matches(&p));

        spec.reset();
        assert_eq!(spec, FilterSpec::for_currency(Currency::EUR));
        assert!(!spec.is_active());
    }
}
