//! Dialect selector.
//!
//! Six dialects share one romanization but use two families of consonant,
//! tone and checked-final tables:
//! - Siian group: 四縣 (Sixian), 南四縣 (Southern Sixian)
//! - Hpzt group: 海陸 (Hailu), 大埔 (Dapu), 饒平 (Raoping), 詔安 (Zhaoan)
//!
//! Zhaoan additionally spells nasalized syllables with `nn`, which is
//! rendered as a leading sixth-dot cell instead of letters.

use std::fmt;
use std::str::FromStr;

use phf::phf_map;
use serde::{Deserialize, Serialize};

use crate::error::ConvertError;

/// The closed set of supported dialects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Dialect {
    #[default]
    Sixian,
    SouthernSixian,
    Hailu,
    Dapu,
    Raoping,
    Zhaoan,
}

/// Which family of consonant/tone/checked-final tables a dialect reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableGroup {
    Siian,
    Hpzt,
}

impl TableGroup {
    /// File-name suffix of the group's tables.
    pub fn suffix(self) -> &'static str {
        match self {
            TableGroup::Siian => "siian",
            TableGroup::Hpzt => "hpzt",
        }
    }
}

/// Grammar switches that vary by dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DialectRules {
    /// Spelling that marks a nasalized syllable, stripped before parsing.
    pub nasal_marker: Option<&'static str>,
    /// Also strip the marker when it survives as a suffix of the
    /// tone-stripped syllable.
    pub residual_nasal_suffix: bool,
}

/// Accepted selector strings. ASCII aliases are matched after lowercasing.
static SELECTORS: phf::Map<&'static str, Dialect> = phf_map! {
    "四縣" => Dialect::Sixian,
    "sixian" => Dialect::Sixian,
    "南四縣" => Dialect::SouthernSixian,
    "southern-sixian" => Dialect::SouthernSixian,
    "nansixian" => Dialect::SouthernSixian,
    "海陸" => Dialect::Hailu,
    "hailu" => Dialect::Hailu,
    "大埔" => Dialect::Dapu,
    "dapu" => Dialect::Dapu,
    "饒平" => Dialect::Raoping,
    "raoping" => Dialect::Raoping,
    "詔安" => Dialect::Zhaoan,
    "zhaoan" => Dialect::Zhaoan,
};

impl Dialect {
    pub const ALL: [Dialect; 6] = [
        Dialect::Sixian,
        Dialect::SouthernSixian,
        Dialect::Hailu,
        Dialect::Dapu,
        Dialect::Raoping,
        Dialect::Zhaoan,
    ];

    /// Chinese name, the canonical selector.
    pub fn name(self) -> &'static str {
        match self {
            Dialect::Sixian => "四縣",
            Dialect::SouthernSixian => "南四縣",
            Dialect::Hailu => "海陸",
            Dialect::Dapu => "大埔",
            Dialect::Raoping => "饒平",
            Dialect::Zhaoan => "詔安",
        }
    }

    /// Primary ASCII alias.
    pub fn alias(self) -> &'static str {
        match self {
            Dialect::Sixian => "sixian",
            Dialect::SouthernSixian => "southern-sixian",
            Dialect::Hailu => "hailu",
            Dialect::Dapu => "dapu",
            Dialect::Raoping => "raoping",
            Dialect::Zhaoan => "zhaoan",
        }
    }

    /// Every selector string accepted for this dialect, sorted.
    pub fn selectors(self) -> Vec<&'static str> {
        let mut out: Vec<&'static str> = SELECTORS
            .entries()
            .filter(|(_, d)| **d == self)
            .map(|(k, _)| *k)
            .collect();
        out.sort_unstable();
        out
    }

    pub fn group(self) -> TableGroup {
        match self {
            Dialect::Sixian | Dialect::SouthernSixian => TableGroup::Siian,
            Dialect::Hailu | Dialect::Dapu | Dialect::Raoping | Dialect::Zhaoan => TableGroup::Hpzt,
        }
    }

    pub fn rules(self) -> DialectRules {
        match self {
            Dialect::Zhaoan => DialectRules {
                nasal_marker: Some("nn"),
                residual_nasal_suffix: true,
            },
            _ => DialectRules::default(),
        }
    }

    /// Position in [`Dialect::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        SELECTORS
            .get(trimmed)
            .or_else(|| SELECTORS.get(trimmed.to_ascii_lowercase().as_str()))
            .copied()
            .ok_or_else(|| ConvertError::UnsupportedDialect(s.to_string()))
    }
}

impl TryFrom<String> for Dialect {
    type Error = ConvertError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Dialect> for String {
    fn from(d: Dialect) -> Self {
        d.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_chinese_and_ascii_selectors() {
        assert_eq!("四縣".parse::<Dialect>().unwrap(), Dialect::Sixian);
        assert_eq!("南四縣".parse::<Dialect>().unwrap(), Dialect::SouthernSixian);
        assert_eq!(" Hailu ".parse::<Dialect>().unwrap(), Dialect::Hailu);
        assert_eq!("NANSIXIAN".parse::<Dialect>().unwrap(), Dialect::SouthernSixian);
        assert_eq!("詔安".parse::<Dialect>().unwrap(), Dialect::Zhaoan);
    }

    #[test]
    fn unknown_selector_is_rejected() {
        let err = "客家".parse::<Dialect>().unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedDialect(ref s) if s == "客家"));
        assert!("".parse::<Dialect>().is_err());
    }

    #[test]
    fn groups() {
        assert_eq!(Dialect::Sixian.group(), TableGroup::Siian);
        assert_eq!(Dialect::SouthernSixian.group(), TableGroup::Siian);
        for d in [Dialect::Hailu, Dialect::Dapu, Dialect::Raoping, Dialect::Zhaoan] {
            assert_eq!(d.group(), TableGroup::Hpzt);
        }
    }

    #[test]
    fn only_zhaoan_has_nasal_marker() {
        for d in Dialect::ALL {
            assert_eq!(d.rules().nasal_marker.is_some(), d == Dialect::Zhaoan);
        }
    }

    #[test]
    fn index_matches_all_order() {
        for (i, d) in Dialect::ALL.iter().enumerate() {
            assert_eq!(d.index(), i);
        }
    }

    #[test]
    fn every_dialect_accepts_its_name_and_alias() {
        for d in Dialect::ALL {
            assert_eq!(d.name().parse::<Dialect>().unwrap(), d);
            assert_eq!(d.alias().parse::<Dialect>().unwrap(), d);
            assert!(d.selectors().contains(&d.name()));
        }
    }
}
