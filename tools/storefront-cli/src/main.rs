//! Storefront CLI - browse the catalog, fill a cart and check out.
//!
//! Commands:
//! - `storefront products` - Filter and sort the catalog
//! - `storefront product` - Show one product with related items
//! - `storefront categories` - List categories with product counts
//! - `storefront brands` - List brands
//! - `storefront featured` - Show featured and latest products
//! - `storefront shop` - Interactive shopping session
//! - `storefront config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BrowseArgs, ConfigArgs, FeaturedArgs, ProductArgs, ShopArgs};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "STOREFRONT_LOG";

/// Storefront CLI - Browse products and place orders from the terminal
#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products matching filters
    Products(BrowseArgs),

    /// Show a product by slug
    Product(ProductArgs),

    /// List categories
    Categories,

    /// List brands
    Brands,

    /// Show featured and latest products
    Featured(FeaturedArgs),

    /// Start an interactive shopping session
    Shop(ShopArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Log to stderr, filtered by `STOREFRONT_LOG` (default `warn`, `debug` with `--verbose`).
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = output::Output::new(cli.verbose, cli.json);

    let ctx = match context::Context::load(cli.config.as_deref(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Products(args) => commands::browse::products(args, &ctx).await,
        Commands::Product(args) => commands::browse::product(args, &ctx).await,
        Commands::Categories => commands::browse::categories(&ctx).await,
        Commands::Brands => commands::browse::brands(&ctx).await,
        Commands::Featured(args) => commands::browse::featured(args, &ctx).await,
        Commands::Shop(args) => commands::shop::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
