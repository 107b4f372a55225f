//! Store directory layout and discovery

use std::path::{Path, PathBuf};

use crate::error::{JotterError, Result};

/// Store directory created by `jotter init`
pub const DEFAULT_STORE_DIR: &str = ".jotter";

/// Config file inside the store directory
pub const CONFIG_FILE: &str = "config.toml";

/// Walk up from `root` looking for a store directory
pub fn discover_store(root: &Path) -> Result<PathBuf> {
    let mut current = Some(root);
    while let Some(dir) = current {
        let candidate = dir.join(DEFAULT_STORE_DIR);
        if candidate.is_dir() {
            tracing::debug!(store = %candidate.display(), "discovered store");
            return Ok(candidate);
        }
        current = dir.parent();
    }

    Err(JotterError::StoreNotFound {
        search_root: root.to_path_buf(),
    })
}
