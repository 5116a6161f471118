//! Hakka conversion engine
//!
//! Thin wrapper around the generic `libbraille_core::Engine<HakkaDecomposer>`
//! that knows how to find a dialect's tables. All tokenizing, rendering,
//! spacing and caching lives in core.

use std::path::Path;
use std::sync::Arc;

use libbraille_core::{Config, RenderedUnit, Token, TokenTrace};

use crate::config::HakkaConfig;
use crate::decomposer::HakkaDecomposer;
use crate::dialect::Dialect;
use crate::error::ConvertError;
use crate::registry::TableRegistry;

/// Public engine for libhakka.
///
/// The inner engine is wrapped in Arc so clones share tables and the line
/// cache.
#[derive(Debug, Clone)]
pub struct Engine {
    dialect: Dialect,
    inner: Arc<libbraille_core::Engine<HakkaDecomposer>>,
}

impl Engine {
    /// Engine over the embedded tables with the default config.
    pub fn for_dialect(dialect: Dialect) -> Result<Self, ConvertError> {
        Self::from_registry(TableRegistry::global(), dialect, Config::default())
    }

    /// Engine described by a full config. A configured `data_dir` replaces
    /// the embedded tables.
    pub fn with_config(config: &HakkaConfig) -> Result<Self, ConvertError> {
        match &config.data_dir {
            Some(dir) => {
                tracing::warn!(dir = %dir.display(), "using rule tables from data dir instead of embedded tables");
                let registry = TableRegistry::from_dir(dir);
                Self::from_registry(&registry, config.dialect, config.base.clone())
            }
            None => Self::from_registry(TableRegistry::global(), config.dialect, config.base.clone()),
        }
    }

    /// Load an engine from a directory of table files.
    ///
    /// Expected layout (data-dir):
    ///  - consonants_siian.json, consonants_hpzt.json
    ///  - tones_siian.json, tones_hpzt.json
    ///  - checked_siian.json, checked_hpzt.json
    ///  - vowels.json, punctuation.json
    pub fn from_data_dir<P: AsRef<Path>>(data_dir: P, dialect: Dialect) -> Result<Self, ConvertError> {
        let registry = TableRegistry::from_dir(data_dir.as_ref());
        Self::from_registry(&registry, dialect, Config::default())
    }

    /// Engine over tables resolved from `registry`.
    pub fn from_registry(
        registry: &TableRegistry,
        dialect: Dialect,
        config: Config,
    ) -> Result<Self, ConvertError> {
        let tables = registry.resolve(dialect)?;
        let decomposer = HakkaDecomposer::from_dialect_tables(&tables);
        let inner = libbraille_core::Engine::new(Arc::clone(&tables.tables), decomposer, config)?;
        Ok(Self {
            dialect,
            inner: Arc::new(inner),
        })
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Convert text; lines are converted independently and re-joined with `\n`.
    pub fn convert(&self, text: &str) -> String {
        self.inner.convert(text)
    }

    pub fn convert_line(&self, line: &str) -> String {
        self.inner.convert_line(line)
    }

    pub fn tokenize(&self, line: &str) -> Vec<Token> {
        self.inner.tokenize(line)
    }

    pub fn render_units(&self, line: &str) -> Vec<RenderedUnit> {
        self.inner.render_units(line)
    }

    /// Per-token decomposition dump for diagnostics.
    pub fn explain(&self, line: &str) -> Vec<TokenTrace> {
        self.inner.explain(line)
    }

    /// Get cache statistics (hits, misses, hit rate)
    pub fn cache_stats(&self) -> (usize, usize, f64) {
        let (hits, misses) = self.inner.cache_stats();
        let total = hits + misses;
        let hit_rate = if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        };
        (hits, misses, hit_rate)
    }

    /// Clear the line cache
    pub fn clear_cache(&self) {
        self.inner.clear_cache();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_cache() {
        let engine = Engine::for_dialect(Dialect::Sixian).unwrap();
        let other = engine.clone();
        engine.convert_line("ngai");
        other.convert_line("ngai");
        let (hits, misses, rate) = engine.cache_stats();
        assert_eq!((hits, misses), (1, 1));
        assert!((rate - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn with_config_uses_base_fields() {
        let mut config = HakkaConfig::for_dialect(Dialect::Hailu);
        config.base_mut().blank_cell = " ".into();
        let engine = Engine::with_config(&config).unwrap();
        assert_eq!(engine.dialect(), Dialect::Hailu);
        assert!(engine.convert_line("ngai ngai").contains(' '));
    }

    #[test]
    fn missing_data_dir_is_a_table_load_error() {
        let err = Engine::from_data_dir("/definitely/not/here", Dialect::Dapu).unwrap_err();
        assert!(matches!(err, ConvertError::TableLoad(_)));
    }

    #[test]
    fn debug_output_names_dialect_and_cache() {
        let engine = Engine::for_dialect(Dialect::Zhaoan).unwrap();
        let shown = format!("{engine:?}");
        assert!(shown.contains("Zhaoan"));
        assert!(shown.contains("cache_hits"));
    }

    #[test]
    fn engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Engine>();
    }
}
