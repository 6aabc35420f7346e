#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};

use crate::core::catalog::Catalog;
use crate::utils::error::Result;
use std::path::Path;
use toml_config::CatalogConfig;

/// Loads the catalog file when one is given, otherwise the built-in tables.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => {
            tracing::info!("📁 Loading catalog from: {}", path.display());
            CatalogConfig::from_file(path)?.into_catalog()
        }
        None => {
            tracing::debug!("Using built-in catalog");
            Ok(Catalog::builtin())
        }
    }
}
