//! Line tokenizer.
//!
//! Splits one line of romanized text into checked-final syllables, plain
//! syllables and punctuation marks. Matching is a single compiled alternation
//! built once per table set:
//!
//! 1. checked-final keys (tone marks baked in), longest first
//! 2. `[A-Za-z]+` followed by the longest tone-mark key, if any
//! 3. one punctuation character known to the punctuation table
//!
//! Alternation is leftmost-first, so at any position a checked-final key
//! beats the generic syllable pattern. Characters matched by none of the
//! branches (spaces, hyphens, digits) separate tokens and are not emitted;
//! token offsets keep them recoverable.

use regex::Regex;

use crate::error::TableLoadError;
use crate::table::TableSet;

/// Token class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    CheckedFinal,
    Syllable,
    Punctuation,
}

/// A labelled span of the input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// Byte offset of the first character in the line.
    pub start: usize,
    /// Exclusive byte offset after the last character.
    pub end: usize,
}

impl Token {
    pub fn is_syllable(&self) -> bool {
        matches!(self.kind, TokenKind::CheckedFinal | TokenKind::Syllable)
    }

    /// The punctuation character, when this is a punctuation token.
    pub fn punct_char(&self) -> Option<char> {
        match self.kind {
            TokenKind::Punctuation => self.text.chars().next(),
            _ => None,
        }
    }
}

/// Compiled tokenizer for one table set.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    pattern: Regex,
}

impl Tokenizer {
    /// Compile the token pattern from the checked-final, tone and
    /// punctuation tables.
    pub fn new(tables: &TableSet) -> Result<Self, TableLoadError> {
        let mut branches = Vec::with_capacity(3);

        let checked: Vec<String> = tables
            .checked
            .keys_longest_first()
            .map(regex::escape)
            .collect();
        if !checked.is_empty() {
            branches.push(format!("(?P<checked>{})", checked.join("|")));
        }

        let tones: Vec<String> = tables
            .tones
            .keys_longest_first()
            .map(regex::escape)
            .collect();
        if tones.is_empty() {
            branches.push("(?P<syllable>[A-Za-z]+)".to_string());
        } else {
            branches.push(format!("(?P<syllable>[A-Za-z]+(?:{})?)", tones.join("|")));
        }

        let punct: Vec<String> = tables
            .punctuation
            .chars()
            .into_iter()
            .map(|ch| regex::escape(ch.encode_utf8(&mut [0u8; 4])))
            .collect();
        if !punct.is_empty() {
            branches.push(format!("(?P<punct>{})", punct.join("|")));
        }

        let pattern = Regex::new(&branches.join("|"))?;
        Ok(Self { pattern })
    }

    /// Tokenize one line. An empty line yields no tokens.
    pub fn tokenize(&self, line: &str) -> Vec<Token> {
        self.pattern
            .captures_iter(line)
            .filter_map(|caps| {
                let (kind, m) = if let Some(m) = caps.name("checked") {
                    (TokenKind::CheckedFinal, m)
                } else if let Some(m) = caps.name("syllable") {
                    (TokenKind::Syllable, m)
                } else {
                    (TokenKind::Punctuation, caps.name("punct")?)
                };
                Some(Token {
                    kind,
                    text: m.as_str().to_string(),
                    start: m.start(),
                    end: m.end(),
                })
            })
            .collect()
    }
}
