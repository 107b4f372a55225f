//! Store configuration for jotter
//!
//! Configuration lives in `.jotter/config.toml`; every field has a default,
//! so a missing file or a partial file is fine.

pub mod types;

use std::fs;
use std::path::Path;

use crate::error::{JotterError, Result};
use crate::medium::validate_key;

pub use types::{StoreConfig, STORE_FORMAT_VERSION};

impl StoreConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| JotterError::io_operation("read", path.display(), e))?;
        let config: StoreConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is missing
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| JotterError::Other(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)
            .map_err(|e| JotterError::io_operation("write", path.display(), e))?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.version > STORE_FORMAT_VERSION {
            return Err(JotterError::invalid_value(
                "store version",
                format!("{} (newest supported: {})", self.version, STORE_FORMAT_VERSION),
            ));
        }
        validate_key(&self.storage_key)
    }
}
