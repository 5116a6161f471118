//! libhakka crate root
//!
//! Hakka romanization → six-dot braille for the six Taiwan Hakka dialects.
//! This crate provides the dialect selector, the rule tables (embedded or
//! from a data directory), the lock-the-rime syllable decomposer and a
//! high-level `Engine` over the shared `libbraille-core` pipeline.
//!
//! Public API exported here:
//! - `convert` / `try_convert` - one-shot conversion by selector string
//! - `Dialect` from `dialect`
//! - `Engine` from `engine`
//! - `HakkaDecomposer` from `decomposer`
//! - `TableRegistry` from `registry`
//! - `HakkaConfig` from `config`
//!
//! ```rust
//! assert_eq!(libhakka::convert("ngai", "四縣"), libhakka::convert("ngai", "sixian"));
//! assert_eq!(libhakka::convert("ngai", "xx"), "⚠️ 無效腔調：請選擇有效的客語腔調");
//! ```

pub mod config;
pub mod decomposer;
pub mod dialect;
pub mod engine;
pub mod error;
pub mod registry;

use once_cell::sync::OnceCell;

// Convenience re-exports for common types used by callers.
pub use config::HakkaConfig;
pub use decomposer::HakkaDecomposer;
pub use dialect::{Dialect, DialectRules, TableGroup};
pub use engine::Engine;
pub use error::{ConvertError, UNSUPPORTED_DIALECT_MESSAGE};
pub use registry::{DialectTables, TableRegistry, TableSource};

pub use libbraille_core::{
    Config, ConfigError, DecodeFailure, Decomposition, RenderedUnit, TableLoadError, Token, TokenKind,
    TokenTrace,
};

/// One shared engine per dialect over the embedded tables.
static SHARED: [OnceCell<Engine>; 6] = [
    OnceCell::new(),
    OnceCell::new(),
    OnceCell::new(),
    OnceCell::new(),
    OnceCell::new(),
    OnceCell::new(),
];

/// The process-wide engine for a dialect, built on first use.
pub fn shared_engine(dialect: Dialect) -> Result<&'static Engine, ConvertError> {
    SHARED[dialect.index()].get_or_try_init(|| Engine::for_dialect(dialect))
}

/// Convert romanized text to braille, reporting failures as typed errors.
///
/// Syllables that cannot be parsed render as `⍰` and never fail the call;
/// only an unknown selector or unloadable tables do.
pub fn try_convert(text: &str, selector: &str) -> Result<String, ConvertError> {
    let dialect: Dialect = selector.parse()?;
    Ok(shared_engine(dialect)?.convert(text))
}

/// Convert romanized text to braille. Always returns text: errors come back
/// as a user-facing diagnostic line.
pub fn convert(text: &str, selector: &str) -> String {
    match try_convert(text, selector) {
        Ok(out) => out,
        Err(err) => {
            tracing::debug!(selector, error = %err, "conversion rejected");
            err.to_string()
        }
    }
}
