//! Hakka syllable decomposer.
//!
//! Parsing is greedy and never backtracks: once the longest onset and the
//! longest rime after it are chosen, the rest of the syllable must be a valid
//! coda or the syllable fails ("lock the rime"). Special spellings are peeled
//! off first, in this order:
//!
//! 1. nasalization marker (dialects that have one)
//! 2. whole-syllable checked final, with and without its tone mark
//! 3. tone mark extraction (longest mark found anywhere)
//! 4. syllabic nasals spelled `iim` / `iin`
//! 5. residual nasalization suffix
//! 6. onset + checked final
//! 7. onset + rime, or a bare syllabic `m`/`n`/`ng`
//! 8. coda: nothing, a checked final, or a run of consonants

use std::sync::Arc;

use libbraille_core::{
    Coda, DecodeFailure, Decomposition, Nucleus, SyllableDecomposer, TableSet, ToneSlot,
};

use crate::dialect::DialectRules;
use crate::registry::DialectTables;

/// Spellings of syllabic nasals and the consonant each one renders as.
const SYLLABIC_NASAL_SPELLINGS: [(&str, &str); 2] = [("iim", "m"), ("iin", "n")];

/// Consonants that may stand alone as a syllable.
const SYLLABIC_CONSONANTS: [&str; 3] = ["m", "n", "ng"];

/// Lock-the-rime decomposer for one dialect.
#[derive(Debug, Clone)]
pub struct HakkaDecomposer {
    tables: Arc<TableSet>,
    rules: DialectRules,
}

impl HakkaDecomposer {
    pub fn new(tables: Arc<TableSet>, rules: DialectRules) -> Self {
        Self { tables, rules }
    }

    pub fn from_dialect_tables(dialect_tables: &DialectTables) -> Self {
        Self::new(Arc::clone(&dialect_tables.tables), dialect_tables.rules)
    }
}

fn tone_slot(mark: Option<&str>) -> ToneSlot {
    match mark {
        Some(mark) => ToneSlot::Mark(mark.to_string()),
        None => ToneSlot::Default,
    }
}

impl SyllableDecomposer for HakkaDecomposer {
    fn decompose(&self, syllable: &str) -> Result<Decomposition, DecodeFailure> {
        let t = &*self.tables;
        let mut nasal = false;

        let mut token = syllable.to_string();
        if let Some(marker) = self.rules.nasal_marker {
            if let Some(pos) = token.find(marker) {
                token.replace_range(pos..pos + marker.len(), "");
                nasal = true;
            }
        }

        if t.checked.contains(&token) {
            return Ok(Decomposition::checked(token, nasal));
        }

        let tone_mark = t.tones.longest_contained(&token);
        let mut bare = match tone_mark {
            Some(mark) => token.replace(mark, ""),
            None => token.clone(),
        };

        if tone_mark.is_some() && t.checked.contains(&bare) {
            return Ok(Decomposition::checked(bare, nasal));
        }

        for (spelling, coda) in SYLLABIC_NASAL_SPELLINGS {
            if let Some(lead) = bare.strip_suffix(spelling) {
                let onset = if lead.is_empty() {
                    None
                } else if t.consonants.contains(lead) {
                    Some(lead.to_string())
                } else {
                    return Err(DecodeFailure::InvalidOnset(lead.to_string()));
                };
                return Ok(Decomposition {
                    onset,
                    nucleus: Nucleus::Absent,
                    coda: Coda::Consonants(vec![coda.to_string()]),
                    tone: tone_slot(tone_mark),
                    nasal,
                });
            }
        }

        if self.rules.residual_nasal_suffix {
            if let Some(marker) = self.rules.nasal_marker {
                if let Some(stripped) = bare.strip_suffix(marker) {
                    bare = stripped.to_string();
                    nasal = true;
                }
            }
        }

        // Tone-inclusive spelling first: checked keys may carry their mark.
        for candidate in [token.as_str(), bare.as_str()] {
            for (key, onset) in t.checked.suffix_matches(candidate) {
                if !onset.is_empty() && t.consonants.contains(onset) {
                    return Ok(Decomposition {
                        onset: Some(onset.to_string()),
                        nucleus: Nucleus::Checked(key.to_string()),
                        coda: Coda::None,
                        tone: ToneSlot::Suppressed,
                        nasal,
                    });
                }
            }
        }

        let onset = t.consonants.longest_prefix(&bare);
        let after_onset = &bare[onset.map_or(0, str::len)..];
        let Some(rime) = t.vowels.longest_prefix(after_onset) else {
            if SYLLABIC_CONSONANTS.contains(&bare.as_str()) {
                return Ok(Decomposition {
                    onset: None,
                    nucleus: Nucleus::Syllabic(bare.clone()),
                    coda: Coda::None,
                    tone: tone_slot(tone_mark),
                    nasal,
                });
            }
            return Err(DecodeFailure::NoRime(syllable.to_string()));
        };

        let remainder = &after_onset[rime.len()..];
        let onset = onset.map(str::to_string);
        let nucleus = Nucleus::Vowel(rime.to_string());

        if remainder.is_empty() {
            return Ok(Decomposition {
                onset,
                nucleus,
                coda: Coda::None,
                tone: tone_slot(tone_mark),
                nasal,
            });
        }

        if let Some(mark) = tone_mark {
            let toned = format!("{remainder}{mark}");
            if t.checked.contains(&toned) {
                return Ok(Decomposition {
                    onset,
                    nucleus,
                    coda: Coda::Checked(toned),
                    tone: ToneSlot::Suppressed,
                    nasal,
                });
            }
        }

        if t.checked.contains(remainder) {
            return Ok(Decomposition {
                onset,
                nucleus,
                coda: Coda::Checked(remainder.to_string()),
                tone: ToneSlot::Suppressed,
                nasal,
            });
        }

        match t.consonants.split_greedy(remainder) {
            Some(run) => Ok(Decomposition {
                onset,
                nucleus,
                coda: Coda::Consonants(run.into_iter().map(str::to_string).collect()),
                tone: tone_slot(tone_mark),
                nasal,
            }),
            None => Err(DecodeFailure::UnparsableCoda {
                syllable: syllable.to_string(),
                remainder: remainder.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Dialect;
    use libbraille_core::{PunctuationTable, RuleTable, TableRole};

    fn fixture_tables() -> Arc<TableSet> {
        Arc::new(TableSet {
            consonants: RuleTable::from_entries(
                TableRole::Consonant,
                [
                    ("k", "⠅"),
                    ("s", "⠑"),
                    ("m", "⠍"),
                    ("n", "⠝"),
                    ("ng", "⠛"),
                    ("t", "⠋"),
                ],
            ),
            vowels: RuleTable::from_entries(
                TableRole::Vowel,
                [("a", "⠁"), ("i", "⠊"), ("ai", "⠺"), ("ia", "⠾"), ("ii", "⠪"), ("m", "⠍")],
            ),
            tones: RuleTable::from_entries(
                TableRole::Tone,
                [("", "⠤"), ("\u{301}", "⠈"), ("ˊ", "⠂"), ("ˋ", "⠐")],
            ),
            checked: RuleTable::from_entries(
                TableRole::CheckedFinal,
                [("ak", "⠕"), ("akˋ", "⠗"), ("at", "⠞")],
            ),
            punctuation: PunctuationTable::new(),
        })
    }

    fn decomposer(dialect: Dialect) -> HakkaDecomposer {
        HakkaDecomposer::new(fixture_tables(), dialect.rules())
    }

    fn sixian(s: &str) -> Result<Decomposition, DecodeFailure> {
        decomposer(Dialect::Sixian).decompose(s)
    }

    #[test]
    fn onset_rime_default_tone() {
        let d = sixian("ka").unwrap();
        assert_eq!(d.onset.as_deref(), Some("k"));
        assert_eq!(d.nucleus, Nucleus::Vowel("a".into()));
        assert_eq!(d.coda, Coda::None);
        assert_eq!(d.tone, ToneSlot::Default);
        assert!(!d.nasal);
    }

    #[test]
    fn combining_tone_mark() {
        let d = sixian("ka\u{301}").unwrap();
        assert_eq!(d.tone, ToneSlot::Mark("\u{301}".into()));
    }

    #[test]
    fn whole_checked_final() {
        assert_eq!(sixian("ak").unwrap(), Decomposition::checked("ak", false));
        assert_eq!(sixian("akˋ").unwrap(), Decomposition::checked("akˋ", false));
    }

    #[test]
    fn onset_plus_checked_final_prefers_toned_key() {
        let d = sixian("kakˋ").unwrap();
        assert_eq!(d.onset.as_deref(), Some("k"));
        assert_eq!(d.nucleus, Nucleus::Checked("akˋ".into()));
        assert_eq!(d.tone, ToneSlot::Suppressed);

        let d = sixian("kak").unwrap();
        assert_eq!(d.nucleus, Nucleus::Checked("ak".into()));
    }

    #[test]
    fn checked_final_after_tone_strip() {
        // "ˊ" is not part of any checked key, so the bare spelling matches.
        let d = sixian("katˊ").unwrap();
        assert_eq!(d.nucleus, Nucleus::Checked("at".into()));
        assert!(!d.ends_in_tone_dot());
    }

    #[test]
    fn syllabic_nasal_spellings() {
        let d = sixian("siim").unwrap();
        assert_eq!(d.onset.as_deref(), Some("s"));
        assert_eq!(d.nucleus, Nucleus::Absent);
        assert_eq!(d.coda, Coda::Consonants(vec!["m".into()]));
        assert_eq!(d.tone, ToneSlot::Default);

        let d = sixian("iinˋ").unwrap();
        assert_eq!(d.onset, None);
        assert_eq!(d.coda, Coda::Consonants(vec!["n".into()]));
        assert_eq!(d.tone, ToneSlot::Mark("ˋ".into()));
    }

    #[test]
    fn syllabic_nasal_with_unknown_onset_fails() {
        assert_eq!(sixian("xiim"), Err(DecodeFailure::InvalidOnset("x".into())));
    }

    #[test]
    fn bare_syllabic_consonants() {
        let d = sixian("ng").unwrap();
        assert_eq!(d.nucleus, Nucleus::Syllabic("ng".into()));
        assert_eq!(d.onset, None);

        let d = sixian("mˋ").unwrap();
        assert_eq!(d.nucleus, Nucleus::Syllabic("m".into()));
        assert_eq!(d.tone, ToneSlot::Mark("ˋ".into()));
    }

    #[test]
    fn consonant_coda_run() {
        let d = sixian("kang").unwrap();
        assert_eq!(d.nucleus, Nucleus::Vowel("a".into()));
        assert_eq!(d.coda, Coda::Consonants(vec!["ng".into()]));
        assert_eq!(d.tone, ToneSlot::Default);
    }

    #[test]
    fn longest_rime_is_locked() {
        let d = sixian("kai").unwrap();
        assert_eq!(d.nucleus, Nucleus::Vowel("ai".into()));

        // "a" + "ia" would parse, but "ai" is taken first and "a" is no coda.
        assert_eq!(
            sixian("kaia"),
            Err(DecodeFailure::UnparsableCoda {
                syllable: "kaia".into(),
                remainder: "a".into(),
            })
        );
    }

    /// Stop codas that only exist as standalone checked-final keys, so no
    /// onset + checked-final split applies.
    fn stop_coda_decomposer() -> HakkaDecomposer {
        let tables = TableSet {
            consonants: RuleTable::from_entries(TableRole::Consonant, [("k", "⠅")]),
            vowels: RuleTable::from_entries(TableRole::Vowel, [("a", "⠁"), ("ai", "⠺")]),
            tones: RuleTable::from_entries(TableRole::Tone, [("", "⠤"), ("ˋ", "⠐")]),
            checked: RuleTable::from_entries(TableRole::CheckedFinal, [("p", "⠏"), ("pˋ", "⠯")]),
            punctuation: PunctuationTable::new(),
        };
        HakkaDecomposer::new(Arc::new(tables), Dialect::Sixian.rules())
    }

    #[test]
    fn checked_coda_after_rime() {
        let d = stop_coda_decomposer().decompose("kaip").unwrap();
        assert_eq!(d.onset.as_deref(), Some("k"));
        assert_eq!(d.nucleus, Nucleus::Vowel("ai".into()));
        assert_eq!(d.coda, Coda::Checked("p".into()));
        assert_eq!(d.tone, ToneSlot::Suppressed);
    }

    #[test]
    fn toned_checked_coda_wins_over_bare_one() {
        let d = stop_coda_decomposer().decompose("kaipˋ").unwrap();
        assert_eq!(d.nucleus, Nucleus::Vowel("ai".into()));
        assert_eq!(d.coda, Coda::Checked("pˋ".into()));
        assert_eq!(d.tone, ToneSlot::Suppressed);
    }

    #[test]
    fn no_rime() {
        assert_eq!(sixian("kk"), Err(DecodeFailure::NoRime("kk".into())));
    }

    #[test]
    fn nasal_marker_only_in_zhaoan() {
        let d = decomposer(Dialect::Zhaoan).decompose("kann").unwrap();
        assert!(d.nasal);
        assert_eq!(d.nucleus, Nucleus::Vowel("a".into()));
        assert_eq!(d.coda, Coda::None);

        let d = sixian("kann").unwrap();
        assert!(!d.nasal);
        assert_eq!(d.coda, Coda::Consonants(vec!["n".into(), "n".into()]));
    }

    #[test]
    fn nasal_marker_inside_syllable() {
        let d = decomposer(Dialect::Zhaoan).decompose("nnaˊ").unwrap();
        assert!(d.nasal);
        assert_eq!(d.onset, None);
        assert_eq!(d.tone, ToneSlot::Mark("ˊ".into()));

        assert!(matches!(
            decomposer(Dialect::Zhaoan).decompose("kanna"),
            Err(DecodeFailure::UnparsableCoda { .. })
        ));
    }

    #[test]
    fn embedded_tables_parse_common_syllables() {
        let registry = crate::registry::TableRegistry::embedded();
        for dialect in Dialect::ALL {
            let dt = registry.resolve(dialect).unwrap();
            let dec = HakkaDecomposer::from_dialect_tables(&dt);
            for s in ["ngai", "hagˋ", "gin", "siim", "ng", "vanˇ", "toi"] {
                assert!(dec.decompose(s).is_ok(), "{s} in {dialect}");
            }
        }
    }
}
