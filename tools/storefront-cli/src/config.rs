//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storefront_core::checkout::ShippingRates;
use storefront_core::Currency;

/// Names searched for in the working directory and its parents.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// Storefront configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Store identity.
    #[serde(default)]
    pub store: StoreConfig,

    /// Catalog source.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Checkout settings.
    #[serde(default)]
    pub checkout: CheckoutConfig,

    /// Listing sizes.
    #[serde(default)]
    pub listing: ListingConfig,
}

impl StorefrontConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().map_or(false, |e| e == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Shipping rates in the catalog's currency.
    pub fn shipping_rates(&self, currency: Currency) -> ShippingRates {
        let mut rates = ShippingRates::new(currency, self.checkout.express_shipping_cents);
        rates.standard.amount_cents = self.checkout.standard_shipping_cents;
        rates
    }

    /// Problems that make the config unusable.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.store.name.trim().is_empty() {
            errors.push("store.name must not be empty".to_string());
        }
        if self.checkout.standard_shipping_cents < 0 {
            errors.push("checkout.standard_shipping_cents must not be negative".to_string());
        }
        if self.checkout.express_shipping_cents < 0 {
            errors.push("checkout.express_shipping_cents must not be negative".to_string());
        }
        if self.listing.related_limit == 0 {
            errors.push("listing.related_limit must be at least 1".to_string());
        }

        errors
    }
}

/// Store identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Name shown in headers.
    #[serde(default = "default_store_name")]
    pub name: String,
}

fn default_store_name() -> String {
    "Storefront".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: default_store_name(),
        }
    }
}

/// Catalog source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON catalog to use instead of the bundled one.
    #[serde(default)]
    pub path: Option<String>,
}

/// Checkout settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    #[serde(default)]
    pub standard_shipping_cents: i64,

    #[serde(default = "default_express_shipping_cents")]
    pub express_shipping_cents: i64,

    /// Pause before confirming an order, in milliseconds.
    #[serde(default = "default_simulated_delay_ms")]
    pub simulated_delay_ms: u64,
}

fn default_express_shipping_cents() -> i64 {
    1500
}

fn default_simulated_delay_ms() -> u64 {
    2000
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            standard_shipping_cents: 0,
            express_shipping_cents: default_express_shipping_cents(),
            simulated_delay_ms: default_simulated_delay_ms(),
        }
    }
}

/// How many products the short listings show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingConfig {
    #[serde(default = "default_featured_limit")]
    pub featured_limit: usize,

    #[serde(default = "default_latest_limit")]
    pub latest_limit: usize,

    #[serde(default = "default_related_limit")]
    pub related_limit: usize,
}

fn default_featured_limit() -> usize {
    4
}

fn default_latest_limit() -> usize {
    8
}

fn default_related_limit() -> usize {
    4
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            featured_limit: default_featured_limit(),
            latest_limit: default_latest_limit(),
            related_limit: default_related_limit(),
        }
    }
}

/// Generate a commented default config file.
pub fn generate_default_config(store_name: &str) -> String {
    format!(
        r#"# Storefront configuration

[store]
name = "{store_name}"

[catalog]
# JSON catalog to load instead of the bundled one.
# path = "catalog.json"

[checkout]
standard_shipping_cents = 0
express_shipping_cents = 1500
simulated_delay_ms = 2000

[listing]
featured_limit = 4
latest_limit = 8
related_limit = 4
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: StorefrontConfig = toml::from_str("").unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.checkout.express_shipping_cents, 1500);
        assert_eq!(config.listing.latest_limit, 8);
    }

    #[test]
    fn test_generated_config_parses() {
        let config: StorefrontConfig = toml::from_str(&generate_default_config("Tech Hub")).unwrap();
        assert_eq!(config.store.name, "Tech Hub");
        assert!(config.catalog.path.is_none());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_partial_section() {
        let config: StorefrontConfig = toml::from_str(
            r#"
            [checkout]
            express_shipping_cents = 2500
            "#,
        )
        .unwrap();
        assert_eq!(config.checkout.express_shipping_cents, 2500);
        assert_eq!(config.checkout.simulated_delay_ms, 2000);

        let rates = config.shipping_rates(Currency::USD);
        assert_eq!(rates.express.amount_cents, 2500);
        assert!(rates.standard.is_zero());
    }

    #[test]
    fn test_validate_flags_bad_values() {
        let mut config = StorefrontConfig::default();
        config.checkout.express_shipping_cents = -1;
        config.store.name = " ".to_string();
        assert_eq!(config.validate().len(), 2);
    }

    #[test]
    fn test_load_json_and_toml() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("storefront.toml");
        std::fs::write(&toml_path, "[store]\nname = \"Toml Shop\"\n").unwrap();
        assert_eq!(StorefrontConfig::load(&toml_path).unwrap().store.name, "Toml Shop");

        let json_path = dir.path().join("storefront.json");
        std::fs::write(&json_path, r#"{"store": {"name": "Json Shop"}}"#).unwrap();
        assert_eq!(StorefrontConfig::load(&json_path).unwrap().store.name, "Json Shop");

        assert!(StorefrontConfig::load(&dir.path().join("missing.toml")).is_err());
    }
}
