//! Cell renderer: decompositions and punctuation → braille text.

use crate::decomposition::{Coda, Decomposition, Nucleus, ToneSlot};
use crate::punctuation::PunctClass;
use crate::table::TableSet;
use crate::Config;

/// What a rendered unit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Syllable,
    Punctuation(PunctClass),
    /// A syllable that failed to decompose; rendered as the error cell.
    Error,
}

/// Braille text for one token plus the facts the line composer needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedUnit {
    pub text: String,
    pub kind: UnitKind,
    /// The source token carried a tone mark.
    pub explicit_tone: bool,
    /// The braille ends in the default or an explicit tone dot.
    pub tone_dot: bool,
}

impl RenderedUnit {
    /// Syllables and error cells both stand for a syllable token.
    pub fn is_syllable(&self) -> bool {
        matches!(self.kind, UnitKind::Syllable | UnitKind::Error)
    }

    pub fn punct_class(&self) -> Option<PunctClass> {
        match self.kind {
            UnitKind::Punctuation(class) => Some(class),
            _ => None,
        }
    }
}

/// Renders units against one table set.
#[derive(Debug, Clone, Copy)]
pub struct CellRenderer<'a> {
    tables: &'a TableSet,
    config: &'a Config,
}

impl<'a> CellRenderer<'a> {
    pub fn new(tables: &'a TableSet, config: &'a Config) -> Self {
        Self { tables, config }
    }

    /// Concatenate, in order: nasal prefix, onset, nucleus, coda, tone.
    pub fn render_decomposition(&self, d: &Decomposition) -> String {
        let t = self.tables;
        let mut out = String::new();

        if d.nasal {
            out.push_str(&self.config.nasal_prefix);
        }
        if let Some(onset) = &d.onset {
            out.push_str(t.consonants.dots(onset));
        }
        match &d.nucleus {
            Nucleus::Vowel(key) => out.push_str(t.vowels.dots(key)),
            Nucleus::Checked(key) => out.push_str(t.checked.dots(key)),
            Nucleus::Syllabic(key) => {
                let dots = t.vowels.get(key).or_else(|| t.consonants.get(key)).unwrap_or("");
                out.push_str(dots);
            }
            Nucleus::Absent => {}
        }
        match &d.coda {
            Coda::None => {}
            Coda::Checked(key) => out.push_str(t.checked.dots(key)),
            Coda::Consonants(keys) => {
                for key in keys {
                    out.push_str(t.consonants.dots(key));
                }
            }
        }
        match &d.tone {
            ToneSlot::Mark(mark) => out.push_str(t.tones.dots(mark)),
            ToneSlot::Default => out.push_str(t.default_tone_dot(&self.config.default_tone_dot)),
            ToneSlot::Suppressed => {}
        }
        out
    }

    /// Render a decomposed syllable as a unit.
    pub fn syllable_unit(&self, d: &Decomposition, explicit_tone: bool) -> RenderedUnit {
        RenderedUnit {
            text: self.render_decomposition(d),
            kind: UnitKind::Syllable,
            explicit_tone,
            tone_dot: d.ends_in_tone_dot(),
        }
    }

    /// The single error cell that replaces an undecodable syllable.
    pub fn error_unit(&self, explicit_tone: bool) -> RenderedUnit {
        RenderedUnit {
            text: self.config.error_marker.clone(),
            kind: UnitKind::Error,
            explicit_tone,
            tone_dot: false,
        }
    }

    /// Punctuation maps straight to its table entry.
    pub fn punctuation_unit(&self, ch: char) -> RenderedUnit {
        let (text, class) = match self.tables.punctuation.get(ch) {
            Some(entry) => (entry.dots.clone(), entry.class),
            None => (String::new(), PunctClass::default()),
        };
        RenderedUnit {
            text,
            kind: UnitKind::Punctuation(class),
            explicit_tone: false,
            tone_dot: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::punctuation::{PunctuationEntry, PunctuationTable};
    use crate::table::{RuleTable, TableRole};

    fn tables() -> TableSet {
        TableSet {
            consonants: RuleTable::from_entries(TableRole::Consonant, [("k", "⠅"), ("m", "⠍")]),
            vowels: RuleTable::from_entries(TableRole::Vowel, [("a", "⠁")]),
            tones: RuleTable::from_entries(TableRole::Tone, [("\u{301}", "⠈")]),
            checked: RuleTable::from_entries(TableRole::CheckedFinal, [("ak", "⠕")]),
            punctuation: PunctuationTable::new().with_entry(
                ',',
                PunctuationEntry::new(
                    "⠂",
                    PunctClass {
                        space_after: true,
                        ..PunctClass::default()
                    },
                ),
            ),
        }
    }

    fn syllable(onset: Option<&str>, nucleus: Nucleus, coda: Coda, tone: ToneSlot) -> Decomposition {
        Decomposition {
            onset: onset.map(str::to_string),
            nucleus,
            coda,
            tone,
            nasal: false,
        }
    }

    #[test]
    fn default_tone_falls_back_to_config() {
        let tables = tables();
        let config = Config::default();
        let r = CellRenderer::new(&tables, &config);
        let d = syllable(Some("k"), Nucleus::Vowel("a".into()), Coda::None, ToneSlot::Default);
        assert_eq!(r.render_decomposition(&d), "⠅⠁⠤");
    }

    #[test]
    fn explicit_tone_and_nasal_prefix() {
        let tables = tables();
        let config = Config::default();
        let r = CellRenderer::new(&tables, &config);
        let mut d = syllable(
            Some("k"),
            Nucleus::Vowel("a".into()),
            Coda::None,
            ToneSlot::Mark("\u{301}".into()),
        );
        d.nasal = true;
        assert_eq!(r.render_decomposition(&d), "⠠⠅⠁⠈");
    }

    #[test]
    fn checked_final_has_no_tone_cell() {
        let tables = tables();
        let config = Config::default();
        let r = CellRenderer::new(&tables, &config);
        let d = syllable(Some("k"), Nucleus::Checked("ak".into()), Coda::None, ToneSlot::Suppressed);
        let unit = r.syllable_unit(&d, false);
        assert_eq!(unit.text, "⠅⠕");
        assert!(!unit.tone_dot);
    }

    #[test]
    fn syllabic_nucleus_falls_back_to_consonant_dots() {
        let tables = tables();
        let config = Config::default();
        let r = CellRenderer::new(&tables, &config);
        let d = syllable(None, Nucleus::Syllabic("m".into()), Coda::None, ToneSlot::Default);
        assert_eq!(r.render_decomposition(&d), "⠍⠤");
    }

    #[test]
    fn punctuation_and_error_units() {
        let tables = tables();
        let config = Config::default();
        let r = CellRenderer::new(&tables, &config);

        let comma = r.punctuation_unit(',');
        assert_eq!(comma.text, "⠂");
        assert!(comma.punct_class().is_some_and(|c| c.space_after));

        let err = r.error_unit(false);
        assert_eq!(err.text, "⍰");
        assert!(err.is_syllable());
    }
}
