//! CLI command implementations.

pub mod browse;
pub mod config;
pub mod shop;

use clap::{Args, Subcommand};
use storefront_core::prelude::*;

/// Arguments for the products command.
#[derive(Args, Debug, Default)]
pub struct BrowseArgs {
    /// Text matched against name, description and brand.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Category slug, or "all".
    #[arg(long)]
    pub category: Option<String>,

    /// Brand name, or "all".
    #[arg(short, long)]
    pub brand: Option<String>,

    /// Lowest price, in major units.
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Highest price, in major units.
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Minimum rating (0-5).
    #[arg(short = 'r', long, default_value_t = 0.0)]
    pub min_rating: f64,

    /// Sort order: default, price-low, price-high, rating, newest.
    #[arg(long, default_value = "default")]
    pub sort: SortKey,
}

impl BrowseArgs {
    /// Filter described by the flags, priced in `currency`.
    pub fn filter(&self, currency: Currency) -> FilterSpec {
        let mut spec = FilterSpec::for_currency(currency).with_min_rating(self.min_rating);
        if let Some(ref text) = self.search {
            spec = spec.with_search(text.as_str());
        }
        if let Some(ref category) = self.category {
            spec = spec.with_category(category.as_str());
        }
        if let Some(ref brand) = self.brand {
            spec = spec.with_brand(brand.as_str());
        }

        let min = self
            .min_price
            .map_or(spec.price_min, |p| Money::from_decimal(p, currency));
        let max = self
            .max_price
            .map_or(spec.price_max, |p| Money::from_decimal(p, currency));
        spec.with_price_range(min, max)
    }
}

/// Arguments for the product command.
#[derive(Args, Debug)]
pub struct ProductArgs {
    /// Product slug.
    pub slug: String,
}

/// Arguments for the featured command.
#[derive(Args, Debug)]
pub struct FeaturedArgs {
    /// Override the configured number of featured products.
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the shop command.
#[derive(Args, Debug)]
pub struct ShopArgs {
    /// Read session commands from a file instead of prompting.
    #[arg(long)]
    pub script: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Set a config value.
    Set {
        /// Config key (dot-separated).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Store name (default: directory name).
        #[arg(short, long)]
        name: Option<String>,

        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
