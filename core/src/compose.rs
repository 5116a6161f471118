//! Line composer: decides where braille blank cells go between units.
//!
//! Braille has no whitespace of its own, so every word or clause boundary is
//! an explicit blank cell. The decision for the gap after unit `i` looks at
//! the two units, their punctuation classes and whether the source had
//! whitespace between the corresponding tokens. Rules, first match wins:
//!
//! 1. after a sentence terminal: blank, except before a closing mark or
//!    another terminal (runs such as `...` get one trailing blank)
//! 2. after a mark that wants a following blank, unless a terminal follows
//! 3. before a terminal: never, even over source whitespace
//! 4. before a mark that wants a preceding blank
//! 5. toned syllable, source space, syllable: no blank (the tone dot already
//!    separates)
//! 6. source whitespace: blank
//! 7. syllable directly followed by syllable: blank unless the first ends in
//!    a tone dot; anything else: no blank

use crate::render::RenderedUnit;
use crate::tokenizer::Token;

/// Joins rendered units into one braille line.
#[derive(Debug, Clone, Copy)]
pub struct LineComposer<'a> {
    blank: &'a str,
}

impl<'a> LineComposer<'a> {
    pub fn new(blank: &'a str) -> Self {
        Self { blank }
    }

    /// Compose a line. `tokens` and `units` must be parallel (one unit per
    /// token); `line` is the text the tokens were cut from.
    pub fn compose(&self, line: &str, tokens: &[Token], units: &[RenderedUnit]) -> String {
        debug_assert_eq!(tokens.len(), units.len());

        let mut out = String::new();
        for (i, unit) in units.iter().enumerate() {
            if i > 0 {
                let source_space = source_space_between(line, &tokens[i - 1], &tokens[i]);
                if gap_needs_blank(&units[i - 1], unit, source_space, !out.is_empty()) {
                    tracing::trace!(gap = i - 1, "blank cell");
                    out.push_str(self.blank);
                }
            }
            out.push_str(&unit.text);
        }

        if self.blank.is_empty() {
            out
        } else {
            out.trim_start_matches(self.blank)
                .trim_end_matches(self.blank)
                .to_string()
        }
    }
}

/// Whether the source had whitespace between two adjacent tokens.
pub fn source_space_between(line: &str, prev: &Token, next: &Token) -> bool {
    line.get(prev.end..next.start)
        .is_some_and(|gap| gap.chars().any(char::is_whitespace))
}

/// Blank-cell decision for the gap between `cur` and `next`.
pub fn gap_needs_blank(
    cur: &RenderedUnit,
    next: &RenderedUnit,
    source_space: bool,
    output_nonempty: bool,
) -> bool {
    let cur_class = cur.punct_class();
    let next_class = next.punct_class();

    if let Some(class) = cur_class {
        if class.terminal {
            return !next_class.is_some_and(|n| n.closing || n.terminal);
        }
        if class.space_after && !next_class.is_some_and(|n| n.terminal) {
            return true;
        }
    }

    if next_class.is_some_and(|n| n.terminal) {
        return false;
    }

    if output_nonempty && next_class.is_some_and(|n| n.space_before) {
        return true;
    }

    if cur.is_syllable() && next.is_syllable() {
        if source_space {
            return !cur.explicit_tone;
        }
        return !cur.tone_dot;
    }

    source_space
}
