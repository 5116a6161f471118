//! Structured syllable decompositions and the decomposer seam.
//!
//! Language crates implement [`SyllableDecomposer`]; the core renders whatever
//! decomposition they return.

use crate::error::DecodeFailure;

/// Vowel nucleus (or what stands in for it).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nucleus {
    /// A vowel-table key.
    Vowel(String),
    /// The whole syllable (after the onset, if any) is a checked-final key.
    Checked(String),
    /// Bare syllabic `m`, `n` or `ng`.
    Syllabic(String),
    /// Syllabic-nasal spellings carry no vowel cell, only the coda.
    Absent,
}

/// What follows the nucleus.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Coda {
    #[default]
    None,
    /// A checked-final key (already encodes its tone).
    Checked(String),
    /// One or more consonant-table keys.
    Consonants(Vec<String>),
}

/// Which tone cell ends the syllable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToneSlot {
    /// Explicit tone-mark key.
    Mark(String),
    /// No mark in the source: the default tone dot.
    Default,
    /// Checked tones carry no separate tone dot.
    Suppressed,
}

/// A fully parsed syllable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decomposition {
    pub onset: Option<String>,
    pub nucleus: Nucleus,
    pub coda: Coda,
    pub tone: ToneSlot,
    pub nasal: bool,
}

impl Decomposition {
    /// Whole-syllable checked final with no onset.
    pub fn checked(key: impl Into<String>, nasal: bool) -> Self {
        Self {
            onset: None,
            nucleus: Nucleus::Checked(key.into()),
            coda: Coda::None,
            tone: ToneSlot::Suppressed,
            nasal,
        }
    }

    /// Whether the source spelled out a tone mark.
    pub fn has_explicit_tone(&self) -> bool {
        matches!(self.tone, ToneSlot::Mark(_))
    }

    /// Whether the rendering ends in a tone cell.
    pub fn ends_in_tone_dot(&self) -> bool {
        !matches!(self.tone, ToneSlot::Suppressed)
    }
}

/// Converts one syllable token into a [`Decomposition`].
///
/// Implementations hold their own tables and dialect rules and must be pure:
/// the same syllable always yields the same result.
pub trait SyllableDecomposer {
    fn decompose(&self, syllable: &str) -> Result<Decomposition, DecodeFailure>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_constructor_suppresses_tone() {
        let d = Decomposition::checked("ab", false);
        assert_eq!(d.tone, ToneSlot::Suppressed);
        assert!(!d.ends_in_tone_dot());
        assert!(!d.has_explicit_tone());
    }
}
