//! Storage Config

use std::path::PathBuf;

use clap::Args;

use crate::settings::DEFAULT_STORAGE_KEY;

/// Where the cart is persisted.
#[derive(Debug, Args)]
pub struct StorageConfig {
    /// Directory holding the persisted cart
    #[arg(long, env = "BEESHOP_STORAGE_DIR", default_value = ".beeshop")]
    pub storage_dir: PathBuf,

    /// Key of the persisted cart slot
    #[arg(long, env = "BEESHOP_STORAGE_KEY", default_value = DEFAULT_STORAGE_KEY)]
    pub storage_key: String,
}
