//! Configuration management commands.

use std::fs;
use std::path::Path;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, StorefrontConfig};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Get { key } => get_config(&key, ctx).await,
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx).await,
        ConfigCommand::Init { name, force } => init_config(name, force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match ctx.config_path {
        Some(ref path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    for (section, rows) in config_sections(ctx) {
        ctx.output.info(&format!("[{}]", section));
        for (key, value) in rows {
            ctx.output.kv(key, &value);
        }
    }

    Ok(())
}

type Section = (&'static str, Vec<(&'static str, String)>);

/// Settings grouped the way they appear in the config file. The currency
/// comes from the loaded catalog and is listed with it.
fn config_sections(ctx: &Context) -> Vec<Section> {
    let config = &ctx.config;
    let rates = ctx.shipping_rates();
    vec![
        ("store", vec![("name", config.store.name.clone())]),
        (
            "catalog",
            vec![
                (
                    "path",
                    config.catalog.path.as_deref().unwrap_or("(bundled)").to_string(),
                ),
                ("products", ctx.catalog.len().to_string()),
                ("currency", ctx.catalog.currency().code().to_string()),
            ],
        ),
        (
            "checkout",
            vec![
                ("standard_shipping", rates.standard.display()),
                ("express_shipping", rates.express.display()),
                (
                    "simulated_delay_ms",
                    config.checkout.simulated_delay_ms.to_string(),
                ),
            ],
        ),
        (
            "listing",
            vec![
                ("featured_limit", config.listing.featured_limit.to_string()),
                ("latest_limit", config.listing.latest_limit.to_string()),
                ("related_limit", config.listing.related_limit.to_string()),
            ],
        ),
    ]
}

async fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

async fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let Some(ref config_path) = ctx.config_path else {
        bail!("No config file found. Run `storefront config init` to create one.");
    };

    let mut config = StorefrontConfig::load(config_path)?;
    set_config_value(&mut config, key, value)?;
    save(&config, config_path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));
    Ok(())
}

async fn init_config(name: Option<String>, force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("storefront.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let name = name.unwrap_or_else(|| {
        ctx.cwd
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("Storefront")
            .to_string()
    });

    fs::write(&config_path, generate_default_config(&name))?;
    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let errors = ctx.config.validate();
    let mut warnings: Vec<String> = Vec::new();

    let listing = &ctx.config.listing;
    if listing.featured_limit == 0 || listing.latest_limit == 0 {
        warnings.push("listing limits of 0 hide the featured or latest sections".to_string());
    }
    if ctx.catalog.featured(usize::MAX).is_empty() {
        warnings.push("catalog has no featured products".to_string());
    }
    if ctx.config.checkout.simulated_delay_ms > 10_000 {
        warnings.push(format!(
            "checkout.simulated_delay_ms of {} makes checkout very slow",
            ctx.config.checkout.simulated_delay_ms
        ));
    }

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

fn save(config: &StorefrontConfig, path: &Path) -> Result<()> {
    let content = if path.extension().map_or(false, |e| e == "json") {
        serde_json::to_string_pretty(config)?
    } else {
        toml::to_string_pretty(config)?
    };
    fs::write(path, content)?;
    Ok(())
}

fn get_config_value(config: &StorefrontConfig, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["store", "name"] => Ok(config.store.name.clone()),
        ["catalog", "path"] => Ok(config.catalog.path.clone().unwrap_or_default()),
        ["checkout", "standard_shipping_cents"] => {
            Ok(config.checkout.standard_shipping_cents.to_string())
        }
        ["checkout", "express_shipping_cents"] => {
            Ok(config.checkout.express_shipping_cents.to_string())
        }
        ["checkout", "simulated_delay_ms"] => Ok(config.checkout.simulated_delay_ms.to_string()),
        ["listing", "featured_limit"] => Ok(config.listing.featured_limit.to_string()),
        ["listing", "latest_limit"] => Ok(config.listing.latest_limit.to_string()),
        ["listing", "related_limit"] => Ok(config.listing.related_limit.to_string()),
        _ => bail!("Unknown config key: {}", key),
    }
}

fn set_config_value(config: &mut StorefrontConfig, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["store", "name"] => config.store.name = value.to_string(),
        ["catalog", "path"] if value.is_empty() => config.catalog.path = None,
        ["catalog", "path"] => config.catalog.path = Some(value.to_string()),
        ["checkout", "standard_shipping_cents"] => {
            config.checkout.standard_shipping_cents = value.parse()?
        }
        ["checkout", "express_shipping_cents"] => {
            config.checkout.express_shipping_cents = value.parse()?
        }
        ["checkout", "simulated_delay_ms"] => config.checkout.simulated_delay_ms = value.parse()?,
        ["listing", "featured_limit"] => config.listing.featured_limit = value.parse()?,
        ["listing", "latest_limit"] => config.listing.latest_limit = value.parse()?,
        ["listing", "related_limit"] => config.listing.related_limit = value.parse()?,
        _ => bail!("Unknown config key: {}", key),
    }

    Ok(())
}
