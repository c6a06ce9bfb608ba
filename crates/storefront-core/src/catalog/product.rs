//! Product types.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// Products are immutable once the catalog is loaded and are shared as
/// `Arc<Product>` between search results and cart lines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// URL-friendly slug (unique).
    pub slug: String,
    /// Product name.
    pub name: String,
    /// Brand name.
    pub brand: String,
    /// Full description.
    pub description: String,
    /// Short description for listings.
    #[serde(default)]
    pub short_description: String,
    /// Image URLs, first is the primary image.
    #[serde(default)]
    pub images: Vec<String>,
    /// Current selling price.
    pub price: Money,
    /// Price before markdown, if the product is on sale.
    #[serde(default)]
    pub original_price: Option<Money>,
    /// Category display name.
    pub category: String,
    /// Category slug used for filtering.
    pub category_slug: String,
    /// Average rating, 0 to 5.
    pub rating: f64,
    /// Number of reviews.
    #[serde(default)]
    pub reviews: u32,
    /// Whether the product can currently be bought.
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    /// Promoted on the home listing.
    #[serde(default)]
    pub featured: bool,
    /// Ordered technical specifications.
    #[serde(default)]
    pub specifications: Vec<ProductSpecification>,
}

fn default_in_stock() -> bool {
    true
}

impl Product {
    /// Check if this product is marked down from its original price.
    pub fn is_on_sale(&self) -> bool {
        self.original_price
            .map(|op| op.amount_cents > self.price.amount_cents)
            .unwrap_or(false)
    }

    /// Markdown as a whole percentage of the original price.
    ///
    /// `None` when there is no original price or it is not above the
    /// current price.
    pub fn discount_percentage(&self) -> Option<u32> {
        self.original_price.and_then(|op| {
            if op.amount_cents > self.price.amount_cents {
                let savings = op.amount_cents - self.price.amount_cents;
                Some(((savings as f64 / op.amount_cents as f64) * 100.0).round() as u32)
            } else {
                None
            }
        })
    }

    /// Primary image, if any.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Look up a specification value by name.
    pub fn specification(&self, name: &str) -> Option<&str> {
        self.specifications
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.value.as_str())
    }
}

/// A named technical specification (e.g., Screen: 6.1 inch).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ProductSpecification {
    /// Specification name (e.g., "Screen").
    pub name: String,
    /// Specification value (e.g., "6.1 inch").
    pub value: String,
}

impl ProductSpecification {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::product;
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_discount_percentage_rounds() {
        let mut p = product("1", 20, 4.0);
        p.original_price = Some(Money::new(3000, Currency::USD));

        assert!(p.is_on_sale());
        assert_eq!(p.discount_percentage(), Some(33));
    }

    #[test]
    fn test_no_discount_without_markdown() {
        let mut p = product("1", 20, 4.0);
        assert_eq!(p.discount_percentage(), None);

        p.original_price = Some(Money::new(2000, Currency::USD));
        assert!(!p.is_on_sale());
        assert_eq!(p.discount_percentage(), None);
    }

    #[test]
    fn test_specification_lookup() {
        let mut p = product("1", 20, 4.0);
        p.specifications.push(ProductSpecification::new("Screen", "6.1 inch"));
        p.specifications.push(ProductSpecification::new("Battery", "3000 mAh"));

        assert_eq!(p.specification("Battery"), Some("3000 mAh"));
        assert_eq!(p.specification("Weight"), None);
        assert_eq!(p.specifications[0].name, "Screen");
    }
}
