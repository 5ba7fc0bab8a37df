//! Storage Config

use std::path::PathBuf;

use clap::Args;

/// Persistent store settings.
#[derive(Debug, Args)]
pub struct StorageConfig {
    /// Directory holding the JSON store files
    #[arg(long, env = "EVENTIVERSE_DATA_DIR", default_value = ".eventiverse")]
    pub data_dir: PathBuf,
}
