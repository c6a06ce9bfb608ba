//! The read-only catalog store.

use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::catalog::{Category, Product};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Currency;

/// Catalog bundled with the crate.
const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

/// On-disk catalog layout.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    categories: Vec<Category>,
    products: Vec<Product>,
}

/// The static set of products and categories.
///
/// Loaded once and never mutated. Products are handed out as `Arc`s so
/// search results and carts share them instead of copying.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Arc<Product>>,
    categories: Vec<Category>,
    currency: Currency,
}

impl Catalog {
    /// Build a catalog from already-loaded records.
    ///
    /// Product ids and slugs must be unique and every price must be in the
    /// same currency.
    pub fn new(products: Vec<Product>, categories: Vec<Category>) -> Result<Self, CommerceError> {
        let currency = products
            .first()
            .map(|p| p.price.currency)
            .unwrap_or_default();
        let mut ids = HashSet::new();
        let mut slugs = HashSet::new();
        for product in &products {
            let mut prices = std::iter::once(product.price).chain(product.original_price);
            if prices.any(|m| m.currency != currency) {
                return Err(CommerceError::InvalidCatalog(format!(
                    "product '{}' is not priced in {}",
                    product.id, currency
                )));
            }
            if !ids.insert(product.id.as_str()) {
                return Err(CommerceError::InvalidCatalog(format!(
                    "duplicate product id '{}'",
                    product.id
                )));
            }
            if !slugs.insert(product.slug.as_str()) {
                return Err(CommerceError::InvalidCatalog(format!(
                    "duplicate product slug '{}'",
                    product.slug
                )));
            }
        }

        Ok(Self {
            products: products.into_iter().map(Arc::new).collect(),
            categories,
            currency,
        })
    }

    /// The catalog bundled with the crate.
    pub fn builtin() -> Result<Self, CommerceError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Parse a catalog from JSON.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::new(file.products, file.categories)
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CommerceError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&content)?;
        info!(
            path = %path.display(),
            products = catalog.products.len(),
            categories = catalog.categories.len(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    /// All products in catalog order.
    pub fn products(&self) -> &[Arc<Product>] {
        &self.products
    }

    /// All categories in catalog order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Currency every product is priced in.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn product_by_id(&self, id: &ProductId) -> Option<&Arc<Product>> {
        self.products.iter().find(|p| &p.id == id)
    }

    pub fn product_by_slug(&self, slug: &str) -> Option<&Arc<Product>> {
        self.products.iter().find(|p| p.slug == slug)
    }

    /// Like [`product_by_slug`](Self::product_by_slug) but reports a miss as an error.
    pub fn require_product(&self, slug: &str) -> Result<&Arc<Product>, CommerceError> {
        self.product_by_slug(slug)
            .ok_or_else(|| CommerceError::ProductNotFound(slug.to_string()))
    }

    pub fn category_by_slug(&self, slug: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.slug == slug)
    }

    pub fn require_category(&self, slug: &str) -> Result<&Category, CommerceError> {
        self.category_by_slug(slug)
            .ok_or_else(|| CommerceError::CategoryNotFound(slug.to_string()))
    }

    /// Distinct brand names, sorted.
    pub fn brands(&self) -> Vec<String> {
        self.products
            .iter()
            .map(|p| p.brand.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Featured products in catalog order, at most `limit`.
    pub fn featured(&self, limit: usize) -> Vec<Arc<Product>> {
        self.products
            .iter()
            .filter(|p| p.featured)
            .take(limit)
            .cloned()
            .collect()
    }

    /// The first `limit` products in catalog order.
    pub fn latest(&self, limit: usize) -> Vec<Arc<Product>> {
        self.products.iter().take(limit).cloned().collect()
    }

    /// Other products in the same category, at most `limit`.
    pub fn related(&self, product: &Product, limit: usize) -> Vec<Arc<Product>> {
        self.products
            .iter()
            .filter(|p| p.category_slug == product.category_slug && p.id != product.id)
            .take(limit)
            .cloned()
            .collect()
    }

    /// Number of products in a category.
    pub fn count_in_category(&self, slug: &str) -> usize {
        self.products
            .iter()
            .filter(|p| p.category_slug == slug)
            .count()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
