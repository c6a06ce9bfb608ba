//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use storefront_core::catalog::Catalog;
use storefront_core::checkout::ShippingRates;
use tracing::debug;

use crate::config::{StorefrontConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: StorefrontConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Config file in use, if one was found.
    pub config_path: Option<PathBuf>,
    /// The loaded catalog.
    pub catalog: Catalog,
}

impl Context {
    /// Load config and catalog.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = resolve(&cwd, path);
                (StorefrontConfig::load(&path)?, Some(path))
            }
            None => match find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (StorefrontConfig::default(), None),
            },
        };
        debug!(config = ?config_path, "resolved configuration");
        if let Some(ref path) = config_path {
            output.debug(&format!("Using config: {}", path.display()));
        }

        let catalog = match catalog_path(&config, config_path.as_deref(), &cwd) {
            Some(path) => {
                Catalog::load(&path)
                    .with_context(|| format!("Failed to load catalog: {}", path.display()))?
            }
            None => Catalog::builtin().context("Failed to load bundled catalog")?,
        };

        Ok(Self {
            config,
            output,
            cwd,
            config_path,
            catalog,
        })
    }

    /// Shipping rates in the catalog's currency.
    pub fn shipping_rates(&self) -> ShippingRates {
        self.config.shipping_rates(self.catalog.currency())
    }
}

/// Find a config file in the directory tree.
fn find_config(start: &Path) -> Option<(StorefrontConfig, PathBuf)> {
    let mut current = start.to_path_buf();
    loop {
        for name in CONFIG_FILE_NAMES {
            let path = current.join(name);
            if path.exists() {
                if let Ok(config) = StorefrontConfig::load(&path) {
                    return Some((config, path));
                }
            }
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// The configured catalog file. Relative paths are taken from the config
/// file's directory, or the working directory when no file was found.
fn catalog_path(config: &StorefrontConfig, config_path: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
    let base = config_path.and_then(Path::parent).unwrap_or(cwd);
    config.catalog.path.as_deref().map(|path| resolve(base, path))
}

/// Resolve a path relative to a base directory.
fn resolve(base: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(
            root.path().join("storefront.toml"),
            "[store]\nname = \"Parent Shop\"\n",
        )
        .unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let (config, path) = find_config(&nested).unwrap();
        assert_eq!(config.store.name, "Parent Shop");
        assert_eq!(path, root.path().join("storefront.toml"));
    }

    #[test]
    fn test_catalog_path_relative_to_config_file() {
        let mut config = StorefrontConfig::default();
        let cwd = Path::new("/srv/shop/sub/dir");
        assert_eq!(catalog_path(&config, None, cwd), None);

        config.catalog.path = Some("data/catalog.json".to_string());
        assert_eq!(
            catalog_path(&config, Some(Path::new("/srv/shop/storefront.toml")), cwd),
            Some(PathBuf::from("/srv/shop/data/catalog.json"))
        );
        assert_eq!(
            catalog_path(&config, None, cwd),
            Some(PathBuf::from("/srv/shop/sub/dir/data/catalog.json"))
        );

        config.catalog.path = Some("/data/c.json".to_string());
        assert_eq!(
            catalog_path(&config, Some(Path::new("/srv/shop/storefront.toml")), cwd),
            Some(PathBuf::from("/data/c.json"))
        );
    }

    #[test]
    fn test_catalog_loads_from_parent_config() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(
            root.path().join("storefront.toml"),
            "[catalog]\npath = \"catalog.json\"\n",
        )
        .unwrap();
        let nested = root.path().join("a");
        std::fs::create_dir_all(&nested).unwrap();

        let (config, config_file) = find_config(&nested).unwrap();
        let path = catalog_path(&config, Some(&config_file), &nested).unwrap();
        assert_eq!(path, root.path().join("catalog.json"));
    }

    #[test]
    fn test_resolve() {
        let cwd = Path::new("/srv/shop");
        assert_eq!(resolve(cwd, "catalog.json"), PathBuf::from("/srv/shop/catalog.json"));
        assert_eq!(resolve(cwd, "/data/c.json"), PathBuf::from("/data/c.json"));
    }
}
