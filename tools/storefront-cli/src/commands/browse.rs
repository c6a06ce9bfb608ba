//! Catalog browsing commands.

use std::sync::Arc;

use anyhow::Result;
use serde_json::json;
use storefront_core::prelude::*;
use tracing::debug;

use super::{BrowseArgs, FeaturedArgs, ProductArgs};
use crate::context::Context;
use crate::output::{money, price_label, rating_stars};

/// List products matching the filter flags.
pub async fn products(args: BrowseArgs, ctx: &Context) -> Result<()> {
    let spec = args.filter(ctx.catalog.currency());
    if let Some(ref slug) = spec.category_slug {
        ctx.catalog.require_category(slug)?;
    }
    debug!(?spec, sort = %args.sort, "listing products");
    let results = apply(ctx.catalog.products(), &spec, args.sort);

    if ctx.output.is_json() {
        ctx.output.json(&results);
        return Ok(());
    }

    print_listing(ctx, &results, args.sort);
    Ok(())
}

/// Show one product with related items.
pub async fn product(args: ProductArgs, ctx: &Context) -> Result<()> {
    let product = ctx.catalog.require_product(&args.slug)?;
    let related = ctx.catalog.related(product, ctx.config.listing.related_limit);

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "product": product,
            "discountPercentage": product.discount_percentage(),
            "related": related,
        }));
        return Ok(());
    }

    show_product(ctx, product);
    if !related.is_empty() {
        ctx.output.header("Related products");
        ctx.output.product_table(&related);
    }
    Ok(())
}

/// List categories with product counts.
pub async fn categories(ctx: &Context) -> Result<()> {
    let rows: Vec<_> = ctx
        .catalog
        .categories()
        .iter()
        .map(|c| (c, ctx.catalog.count_in_category(&c.slug)))
        .collect();

    if ctx.output.is_json() {
        let value: Vec<_> = rows
            .iter()
            .map(|(c, count)| json!({ "slug": c.slug, "name": c.name, "products": count }))
            .collect();
        ctx.output.json(&value);
        return Ok(());
    }

    ctx.output.header("Categories");
    const WIDTHS: [usize; 3] = [16, 20, 8];
    ctx.output.table_row(&["SLUG", "NAME", "PRODUCTS"], &WIDTHS);
    for (category, count) in rows {
        let count = count.to_string();
        ctx.output.table_row(
            &[category.slug.as_str(), category.name.as_str(), count.as_str()],
            &WIDTHS,
        );
    }
    Ok(())
}

/// List brands in alphabetical order.
pub async fn brands(ctx: &Context) -> Result<()> {
    let brands = ctx.catalog.brands();

    if ctx.output.is_json() {
        ctx.output.json(&brands);
        return Ok(());
    }

    ctx.output.header("Brands");
    for brand in &brands {
        ctx.output.list_item(brand);
    }
    Ok(())
}

/// Featured products followed by the latest arrivals.
pub async fn featured(args: FeaturedArgs, ctx: &Context) -> Result<()> {
    let listing = &ctx.config.listing;
    let featured = ctx
        .catalog
        .featured(args.limit.unwrap_or(listing.featured_limit));
    let latest = ctx.catalog.latest(listing.latest_limit);

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "featured": featured, "latest": latest }));
        return Ok(());
    }

    ctx.output.header(&format!("{} - Featured", ctx.config.store.name));
    if featured.is_empty() {
        ctx.output.info("No featured products");
    } else {
        ctx.output.product_table(&featured);
    }

    ctx.output.header("Latest products");
    ctx.output.product_table(&latest);
    Ok(())
}

/// Print a result count and the product table.
pub(crate) fn print_listing(ctx: &Context, results: &[Arc<Product>], sort: SortKey) {
    ctx.output.header(&format!(
        "{} product{} ({})",
        results.len(),
        if results.len() == 1 { "" } else { "s" },
        sort.display_name()
    ));

    if results.is_empty() {
        ctx.output.info("No products found. Try adjusting your filters.");
        return;
    }
    ctx.output.product_table(results);
}

/// Print the detail view of a product.
pub(crate) fn show_product(ctx: &Context, product: &Product) {
    ctx.output.header(&product.name);
    ctx.output.kv("brand", &product.brand);
    ctx.output.kv("category", &product.category);
    ctx.output.kv("price", &price_label(product));
    if let (Some(percent), Some(original)) = (product.discount_percentage(), product.original_price) {
        let saved = Money::new(
            original.amount_cents - product.price.amount_cents,
            original.currency,
        );
        ctx.output
            .kv("discount", &format!("-{}% (save {})", percent, money(saved)));
    }
    ctx.output.kv(
        "rating",
        &format!("{} ({} reviews)", rating_stars(product.rating), product.reviews),
    );
    ctx.output.kv(
        "availability",
        if product.in_stock { "In stock" } else { "Out of stock" },
    );
    if let Some(image) = product.primary_image() {
        ctx.output.kv("image", image);
    }

    if !product.short_description.is_empty() {
        ctx.output.line("");
        ctx.output.line(&product.short_description);
    }
    if !product.description.is_empty() {
        ctx.output.line("");
        ctx.output.line(&product.description);
    }

    if !product.specifications.is_empty() {
        ctx.output.header("Specifications");
        for spec in &product.specifications {
            ctx.output.kv(&spec.name, &spec.value);
        }
    }
}
