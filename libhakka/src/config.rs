//! Hakka-specific configuration that extends the base `Config` from core.
//!
//! This configuration includes:
//! - All generic options from `libbraille_core::Config` (flattened via serde)
//! - The dialect to convert with
//! - An optional data directory whose tables replace the embedded ones
//!
//! # Example
//!
//! ```rust
//! use libhakka::{Dialect, HakkaConfig};
//!
//! let config = HakkaConfig::from_toml_str("dialect = \"hailu\"\nmax_cache_size = 0\n").unwrap();
//! assert_eq!(config.dialect, Dialect::Hailu);
//! assert_eq!(config.base().max_cache_size, 0);
//! ```
use std::path::{Path, PathBuf};

use libbraille_core::{Config, ConfigError};
use serde::{Deserialize, Serialize};

use crate::dialect::Dialect;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct HakkaConfig {
    /// Base configuration fields (cell glyphs, input handling, cache size)
    #[serde(flatten)]
    pub base: Config,

    /// Dialect selector; accepts the Chinese names and ASCII aliases.
    pub dialect: Dialect,

    /// Directory of table files used instead of the embedded tables.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl HakkaConfig {
    /// Default configuration for one dialect.
    pub fn for_dialect(dialect: Dialect) -> Self {
        Self {
            dialect,
            ..Self::default()
        }
    }

    /// Get a reference to the base config
    pub fn base(&self) -> &Config {
        &self.base
    }

    /// Get a mutable reference to the base config
    pub fn base_mut(&mut self) -> &mut Config {
        &mut self.base
    }

    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
