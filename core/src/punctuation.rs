//! Punctuation table: source punctuation character → braille cells, plus the
//! spacing classes the line composer needs.

use std::collections::BTreeMap;
use std::path::Path;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::error::TableLoadError;
use crate::table::TableRole;

/// Spacing behaviour of one punctuation mark.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PunctClass {
    /// A blank cell goes before this mark (opening brackets and quotes).
    #[serde(default)]
    pub space_before: bool,
    /// A blank cell goes after this mark (comma, colon, closing brackets).
    #[serde(default)]
    pub space_after: bool,
    /// Ends a sentence. No blank before a following closing mark, and a run
    /// of terminals gets a single trailing blank.
    #[serde(default)]
    pub terminal: bool,
    /// Closes a bracket or quote.
    #[serde(default)]
    pub closing: bool,
}

/// One record of the punctuation file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PunctuationEntry {
    pub dots: String,
    #[serde(flatten)]
    pub class: PunctClass,
}

impl PunctuationEntry {
    pub fn new<S: Into<String>>(dots: S, class: PunctClass) -> Self {
        Self {
            dots: dots.into(),
            class,
        }
    }
}

/// Map from punctuation character to its braille rendering and class.
#[derive(Debug, Clone, Default)]
pub struct PunctuationTable {
    punct_map: AHashMap<char, PunctuationEntry>,
}

impl PunctuationTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a mapping, builder style.
    pub fn with_entry(mut self, ch: char, entry: PunctuationEntry) -> Self {
        self.punct_map.insert(ch, entry);
        self
    }

    /// Parse the JSON punctuation file. Every key must be exactly one char.
    pub fn from_json_str(json: &str, origin: &str) -> Result<Self, TableLoadError> {
        let raw: BTreeMap<String, PunctuationEntry> =
            serde_json::from_str(json).map_err(|source| TableLoadError::Parse {
                role: TableRole::Punctuation,
                origin: origin.to_string(),
                source,
            })?;

        if raw.is_empty() {
            return Err(TableLoadError::EmptyTable {
                role: TableRole::Punctuation,
                origin: origin.to_string(),
            });
        }

        let mut table = Self::new();
        for (key, entry) in raw {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => {
                    table.punct_map.insert(ch, entry);
                }
                _ => {
                    return Err(TableLoadError::InvalidPunctuationKey {
                        key,
                        origin: origin.to_string(),
                    })
                }
            }
        }

        tracing::debug!(origin, keys = table.len(), "loaded punctuation table");
        Ok(table)
    }

    /// Read and parse a punctuation file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TableLoadError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TableLoadError::Io {
            role: TableRole::Punctuation,
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json, &path.display().to_string())
    }

    pub fn len(&self) -> usize {
        self.punct_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.punct_map.is_empty()
    }

    /// Check if a character is handled by this table.
    pub fn contains(&self, ch: char) -> bool {
        self.punct_map.contains_key(&ch)
    }

    pub fn get(&self, ch: char) -> Option<&PunctuationEntry> {
        self.punct_map.get(&ch)
    }

    /// Spacing class of `ch`; unknown characters get the empty class.
    pub fn class(&self, ch: char) -> PunctClass {
        self.get(ch).map(|e| e.class).unwrap_or_default()
    }

    /// All handled characters in code point order.
    pub fn chars(&self) -> Vec<char> {
        let mut chars: Vec<char> = self.punct_map.keys().copied().collect();
        chars.sort_unstable();
        chars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_flags_default_to_false() {
        let json = r#"{
            ",": { "dots": "⠂", "space_after": true },
            ".": { "dots": "⠲", "terminal": true },
            "(": { "dots": "⠦", "space_before": true }
        }"#;
        let table = PunctuationTable::from_json_str(json, "inline").unwrap();
        assert_eq!(table.len(), 3);

        let comma = table.class(',');
        assert!(comma.space_after);
        assert!(!comma.space_before && !comma.terminal && !comma.closing);
        assert!(table.class('.').terminal);
        assert!(table.class('(').space_before);
        assert_eq!(table.class('x'), PunctClass::default());
    }

    #[test]
    fn chars_are_sorted() {
        let table = PunctuationTable::new()
            .with_entry('?', PunctuationEntry::new("⠢", PunctClass::default()))
            .with_entry(',', PunctuationEntry::new("⠂", PunctClass::default()));
        assert_eq!(table.chars(), vec![',', '?']);
    }

    #[test]
    fn error_multi_char_key() {
        let err = PunctuationTable::from_json_str(r#"{ "...": { "dots": "⠲⠲⠲" } }"#, "inline")
            .unwrap_err();
        assert!(matches!(err, TableLoadError::InvalidPunctuationKey { .. }));
    }

    #[test]
    fn error_empty() {
        let err = PunctuationTable::from_json_str("{}", "inline").unwrap_err();
        assert!(matches!(err, TableLoadError::EmptyTable { .. }));
    }
}
