//! Catalog Config

use std::path::PathBuf;

use clap::Args;

/// Event catalog settings.
#[derive(Debug, Args)]
pub struct CatalogConfig {
    /// YAML file of events to list instead of the built-in demo catalog
    #[arg(long = "catalog", env = "EVENTIVERSE_CATALOG")]
    pub catalog_path: Option<PathBuf>,
}
