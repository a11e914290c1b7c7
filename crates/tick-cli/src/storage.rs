use std::path::PathBuf;

use crate::config::Config;
use color_eyre::Result;
use dirs::data_dir;
use tick_store::FileStore;
use tracing::debug;

/// Resolve the default data directory for Tick.
pub fn default_data_dir() -> Result<PathBuf> {
    let base = data_dir().ok_or_else(|| color_eyre::eyre::eyre!("no data dir available"))?;
    Ok(base.join("tick"))
}

/// Build the on-disk store, honoring the config override.
pub fn store_from_config(config: &Config) -> Result<FileStore> {
    if let Some(root) = &config.data_dir {
        debug!(?root, "initializing file store (config override)");
        return Ok(FileStore::new(root.clone()));
    }

    let root = default_data_dir()?;
    debug!(?root, "initializing file store");
    Ok(FileStore::new(root))
}
