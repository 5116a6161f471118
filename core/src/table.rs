//! Rule tables: romanized component → braille dot string.
//!
//! A table is loaded once from a JSON object of the form
//! `{ "ng": { "dots": "⠛" }, ... }` and never mutated afterwards. Every table
//! precomputes two lookup structures so that matching never sorts keys on the
//! hot path:
//! - a [`TrieNode`] for longest-prefix matching (onsets, rimes, consonant runs)
//! - a longest-first key list for suffix and containment matching
//!   (checked finals, tone marks)

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::error::TableLoadError;
use crate::punctuation::PunctuationTable;
use crate::trie::TrieNode;

/// The role a table plays in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableRole {
    Consonant,
    Vowel,
    Tone,
    CheckedFinal,
    Punctuation,
}

impl fmt::Display for TableRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TableRole::Consonant => "consonant",
            TableRole::Vowel => "vowel",
            TableRole::Tone => "tone",
            TableRole::CheckedFinal => "checked-final",
            TableRole::Punctuation => "punctuation",
        };
        f.write_str(name)
    }
}

/// One record of a table file. Extra fields are ignored.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TableEntry {
    pub dots: String,
}

/// Immutable key → dots mapping with precomputed match orderings.
#[derive(Debug, Clone)]
pub struct RuleTable {
    role: TableRole,
    entries: AHashMap<String, String>,
    trie: TrieNode,
    /// Non-empty keys, longest (in chars) first; ties broken by key text so
    /// the order is deterministic.
    by_length: Vec<String>,
}

impl RuleTable {
    /// Build a table from `(key, dots)` pairs. Later duplicates win.
    pub fn from_entries<I, K, V>(role: TableRole, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries: AHashMap<String, String> = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        let mut by_length: Vec<String> = entries.keys().filter(|k| !k.is_empty()).cloned().collect();
        by_length.sort_by(|a, b| {
            b.chars()
                .count()
                .cmp(&a.chars().count())
                .then_with(|| a.cmp(b))
        });
        let trie = TrieNode::from_keys(by_length.iter());

        Self {
            role,
            entries,
            trie,
            by_length,
        }
    }

    /// Parse a table from JSON text. `origin` names the source in errors.
    pub fn from_json_str(role: TableRole, json: &str, origin: &str) -> Result<Self, TableLoadError> {
        let raw: BTreeMap<String, TableEntry> =
            serde_json::from_str(json).map_err(|source| TableLoadError::Parse {
                role,
                origin: origin.to_string(),
                source,
            })?;

        if raw.is_empty() {
            return Err(TableLoadError::EmptyTable {
                role,
                origin: origin.to_string(),
            });
        }

        let table = Self::from_entries(role, raw.into_iter().map(|(k, e)| (k, e.dots)));
        tracing::debug!(%role, origin, keys = table.len(), "loaded rule table");
        Ok(table)
    }

    /// Read and parse a table file.
    pub fn load<P: AsRef<Path>>(role: TableRole, path: P) -> Result<Self, TableLoadError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TableLoadError::Io {
            role,
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(role, &json, &path.display().to_string())
    }

    pub fn role(&self) -> TableRole {
        self.role
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact-key membership.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Exact-key lookup.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Lenient lookup: a missing key renders as nothing.
    pub fn dots(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    /// Non-empty keys, longest first.
    pub fn keys_longest_first(&self) -> impl Iterator<Item = &str> {
        self.by_length.iter().map(String::as_str)
    }

    /// Longest non-empty key that is a prefix of `input`.
    pub fn longest_prefix(&self, input: &str) -> Option<&str> {
        self.trie.longest_prefix(input)
    }

    /// Keys that are a proper or whole suffix of `input`, longest first,
    /// each paired with the part of `input` before it.
    pub fn suffix_matches<'a>(&'a self, input: &'a str) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.keys_longest_first()
            .filter(move |key| input.ends_with(key))
            .map(move |key| (key, &input[..input.len() - key.len()]))
    }

    /// Longest non-empty key occurring anywhere in `input`.
    pub fn longest_contained(&self, input: &str) -> Option<&str> {
        self.keys_longest_first().find(|key| input.contains(key))
    }

    /// Split `input` entirely into keys, greedily taking the longest key at
    /// each step. Returns `None` when some leftover cannot be matched.
    pub fn split_greedy<'a>(&'a self, input: &str) -> Option<Vec<&'a str>> {
        let mut parts = Vec::new();
        let mut rest = input;
        while !rest.is_empty() {
            let key = self.longest_prefix(rest)?;
            parts.push(key);
            rest = &rest[key.len()..];
        }
        Some(parts)
    }
}

/// The complete set of tables one dialect converts with.
#[derive(Debug, Clone)]
pub struct TableSet {
    pub consonants: RuleTable,
    pub vowels: RuleTable,
    pub tones: RuleTable,
    pub checked: RuleTable,
    pub punctuation: PunctuationTable,
}

impl TableSet {
    /// Dots for "no tone mark": the tone table's empty-key entry when it has
    /// one, otherwise `fallback`.
    pub fn default_tone_dot<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.tones.get("").unwrap_or(fallback)
    }
}
