//! libbraille-core
//!
//! Language-agnostic pieces of the romanization → braille pipeline, shared by
//! language crates (libhakka).
//!
//! Public API:
//! - `RuleTable` / `TableSet` - immutable component → dots tables
//! - `PunctuationTable` - punctuation cells and their spacing classes
//! - `Tokenizer` - splits a line into syllable and punctuation tokens
//! - `SyllableDecomposer` - seam for language-specific syllable parsing
//! - `CellRenderer` - decompositions → braille text
//! - `LineComposer` - blank-cell placement between rendered units
//! - `Engine` - the full pipeline with a line cache
//! - `Config` - cell glyphs and input handling flags
use serde::{Deserialize, Serialize};

pub mod trie;
pub use trie::TrieNode;

pub mod error;
pub use error::{ConfigError, DecodeFailure, TableLoadError};

pub mod table;
pub use table::{RuleTable, TableEntry, TableRole, TableSet};

pub mod punctuation;
pub use punctuation::{PunctClass, PunctuationEntry, PunctuationTable};

pub mod tokenizer;
pub use tokenizer::{Token, TokenKind, Tokenizer};

pub mod decomposition;
pub use decomposition::{Coda, Decomposition, Nucleus, SyllableDecomposer, ToneSlot};

pub mod render;
pub use render::{CellRenderer, RenderedUnit, UnitKind};

pub mod compose;
pub use compose::LineComposer;

pub mod engine;
pub use engine::{Engine, TokenTrace};

/// Braille blank cell, the inter-word separator.
pub const BRAILLE_BLANK: &str = "\u{2800}";

/// Generic configuration for the conversion pipeline.
///
/// Only language-agnostic fields live here. Dialect selection and table
/// locations belong in the language crate's config (`HakkaConfig`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Cell inserted between words and after clause punctuation.
    pub blank_cell: String,
    /// Cell emitted for a syllable that cannot be decomposed.
    pub error_marker: String,
    /// Leading cell for nasalized syllables.
    pub nasal_prefix: String,
    /// Tone cell used when the source has no tone mark and the tone table
    /// has no entry for the empty key.
    pub default_tone_dot: String,

    // Input handling
    /// Lowercase ASCII letters before tokenizing.
    pub fold_case: bool,
    /// Apply canonical decomposition (NFD) so precomposed accented letters
    /// expose their combining tone marks.
    pub decompose_input: bool,

    // Cache Management
    /// Maximum number of converted lines kept in the engine cache (0 disables)
    pub max_cache_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            blank_cell: BRAILLE_BLANK.to_string(),
            error_marker: "⍰".to_string(),
            nasal_prefix: "⠠".to_string(),
            default_tone_dot: "⠤".to_string(),
            fold_case: true,
            decompose_input: true,
            max_cache_size: 1000,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), ConfigError> {
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

/// Utility helpers.
pub mod utils {
    use std::borrow::Cow;

    use unicode_normalization::{is_nfd_quick, IsNormalized, UnicodeNormalization};

    /// Prepare one line for tokenizing: optional NFD, then optional ASCII
    /// lowercasing (so `Á` folds too). Borrows when nothing changes.
    pub fn normalize(s: &str, fold_case: bool, decompose: bool) -> Cow<'_, str> {
        let mut out = Cow::Borrowed(s);

        if decompose && is_nfd_quick(s.chars()) != IsNormalized::Yes {
            out = Cow::Owned(s.nfd().collect());
        }

        if fold_case && out.bytes().any(|b| b.is_ascii_uppercase()) {
            out = Cow::Owned(out.to_ascii_lowercase());
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.blank_cell, "\u{2800}");
        assert_eq!(cfg.error_marker, "⍰");
        assert_eq!(cfg.nasal_prefix, "⠠");
        assert_eq!(cfg.default_tone_dot, "⠤");
        assert!(cfg.fold_case);
        assert!(cfg.decompose_input);
        assert_eq!(cfg.max_cache_size, 1000);
    }

    #[test]
    fn config_toml_roundtrip() {
        let mut cfg = Config::default();
        cfg.max_cache_size = 0;
        cfg.blank_cell = " ".to_string();
        let text = cfg.to_toml_string().unwrap();
        assert_eq!(Config::from_toml_str(&text).unwrap(), cfg);
    }

    #[test]
    fn config_partial_toml_uses_defaults() {
        let cfg = Config::from_toml_str("fold_case = false\n").unwrap();
        assert!(!cfg.fold_case);
        assert_eq!(cfg.error_marker, "⍰");
    }

    #[test]
    fn config_missing_file() {
        let err = Config::load_toml("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn normalize_folds_and_decomposes() {
        assert_eq!(utils::normalize("Ká", true, true), "ka\u{301}");
        assert_eq!(utils::normalize("KÁ", true, true), "ka\u{301}");
        assert_eq!(utils::normalize("Ká", false, false), "Ká");
        assert!(matches!(utils::normalize("ka", true, true), std::borrow::Cow::Borrowed(_)));
    }
}
