// core/src/engine.rs
//
// Generic conversion engine that works with any syllable decomposer.
// Language crates supply the tables and the decomposer; everything else
// (tokenizing, rendering, spacing, caching) lives here.

use std::borrow::Cow;
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use lru::LruCache;

use crate::compose::LineComposer;
use crate::decomposition::{Decomposition, SyllableDecomposer};
use crate::error::{DecodeFailure, TableLoadError};
use crate::render::{CellRenderer, RenderedUnit};
use crate::table::TableSet;
use crate::tokenizer::{Token, TokenKind, Tokenizer};
use crate::{utils, Config};

/// One token with everything the pipeline decided about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenTrace {
    pub token: Token,
    /// `None` for punctuation.
    pub decomposition: Option<Result<Decomposition, DecodeFailure>>,
    pub unit: RenderedUnit,
}

/// Full pipeline over one table set.
///
/// Type parameter D is the decomposer (e.g. `HakkaDecomposer`).
///
/// Converted lines are kept in an LRU cache keyed by the raw line text; a
/// `max_cache_size` of 0 disables it.
pub struct Engine<D> {
    tables: Arc<TableSet>,
    tokenizer: Tokenizer,
    decomposer: D,
    config: Config,
    cache: Option<Mutex<LruCache<String, String>>>,
    cache_hits: AtomicUsize,
    cache_misses: AtomicUsize,
}

impl<D: fmt::Debug> fmt::Debug for Engine<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("decomposer", &self.decomposer)
            .field("config", &self.config)
            .field("cache_hits", &self.cache_hits.load(Ordering::Relaxed))
            .field("cache_misses", &self.cache_misses.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl<D: SyllableDecomposer> Engine<D> {
    /// Build an engine. Fails only if the token pattern cannot be compiled
    /// from the tables.
    pub fn new(tables: Arc<TableSet>, decomposer: D, config: Config) -> Result<Self, TableLoadError> {
        let tokenizer = Tokenizer::new(&tables)?;
        let cache = NonZeroUsize::new(config.max_cache_size).map(|cap| Mutex::new(LruCache::new(cap)));

        Ok(Self {
            tables,
            tokenizer,
            decomposer,
            config,
            cache,
            cache_hits: AtomicUsize::new(0),
            cache_misses: AtomicUsize::new(0),
        })
    }

    pub fn tables(&self) -> &TableSet {
        &self.tables
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Convert text. Lines are converted independently and re-joined with
    /// `\n`; empty lines stay empty.
    pub fn convert(&self, text: &str) -> String {
        text.split('\n')
            .map(|line| self.convert_line(line.strip_suffix('\r').unwrap_or(line)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Convert a single line.
    pub fn convert_line(&self, line: &str) -> String {
        if let Some(hit) = self.cache_get(line) {
            self.cache_hits.fetch_add(1, Ordering::Relaxed);
            return hit;
        }
        self.cache_misses.fetch_add(1, Ordering::Relaxed);

        let normalized = self.normalize(line);
        let tokens = self.tokenizer.tokenize(&normalized);
        let units = self.units_for(&tokens);
        let out = LineComposer::new(&self.config.blank_cell).compose(&normalized, &tokens, &units);

        self.cache_put(line, &out);
        out
    }

    /// Tokenize a line after input normalization.
    pub fn tokenize(&self, line: &str) -> Vec<Token> {
        self.tokenizer.tokenize(&self.normalize(line))
    }

    /// One rendered unit per token of the line.
    pub fn render_units(&self, line: &str) -> Vec<RenderedUnit> {
        self.units_for(&self.tokenize(line))
    }

    /// Per-token diagnostics: token, decomposition and rendered unit.
    pub fn explain(&self, line: &str) -> Vec<TokenTrace> {
        let renderer = CellRenderer::new(&self.tables, &self.config);
        self.tokenize(line)
            .into_iter()
            .map(|token| {
                let decomposition = token.is_syllable().then(|| self.decomposer.decompose(&token.text));
                let unit = self.render_token(&renderer, &token, decomposition.clone());
                TokenTrace {
                    token,
                    decomposition,
                    unit,
                }
            })
            .collect()
    }

    fn normalize<'a>(&self, line: &'a str) -> Cow<'a, str> {
        utils::normalize(line, self.config.fold_case, self.config.decompose_input)
    }

    fn units_for(&self, tokens: &[Token]) -> Vec<RenderedUnit> {
        let renderer = CellRenderer::new(&self.tables, &self.config);
        tokens
            .iter()
            .map(|token| {
                let decomposition = token.is_syllable().then(|| self.decomposer.decompose(&token.text));
                self.render_token(&renderer, token, decomposition)
            })
            .collect()
    }

    fn render_token(
        &self,
        renderer: &CellRenderer<'_>,
        token: &Token,
        decomposition: Option<Result<Decomposition, DecodeFailure>>,
    ) -> RenderedUnit {
        if token.kind == TokenKind::Punctuation {
            return match token.punct_char() {
                Some(ch) => renderer.punctuation_unit(ch),
                None => renderer.error_unit(false),
            };
        }

        let explicit_tone = self.tables.tones.longest_contained(&token.text).is_some();
        match decomposition {
            Some(Ok(d)) => {
                tracing::trace!(token = %token.text, ?d, "decomposed");
                renderer.syllable_unit(&d, explicit_tone)
            }
            Some(Err(reason)) => {
                tracing::debug!(token = %token.text, %reason, "decode failure");
                renderer.error_unit(explicit_tone)
            }
            None => renderer.error_unit(explicit_tone),
        }
    }

    fn cache_get(&self, line: &str) -> Option<String> {
        let cache = self.cache.as_ref()?;
        let mut guard = cache.lock().ok()?;
        guard.get(line).cloned()
    }

    fn cache_put(&self, line: &str, out: &str) {
        if let Some(cache) = &self.cache {
            if let Ok(mut guard) = cache.lock() {
                guard.put(line.to_string(), out.to_string());
            }
        }
    }

    /// Get cache statistics for monitoring.
    ///
    /// Returns (hits, misses) tuple.
    pub fn cache_stats(&self) -> (usize, usize) {
        (
            self.cache_hits.load(Ordering::Relaxed),
            self.cache_misses.load(Ordering::Relaxed),
        )
    }

    /// Get cache hit rate as a percentage (0.0 to 100.0).
    ///
    /// Returns None if no cache accesses have been made yet.
    pub fn cache_hit_rate(&self) -> Option<f32> {
        let (hits, misses) = self.cache_stats();
        let total = hits + misses;

        if total == 0 {
            None
        } else {
            Some((hits as f32 / total as f32) * 100.0)
        }
    }

    /// Get current cache size (number of entries).
    pub fn cache_size(&self) -> usize {
        self.cache
            .as_ref()
            .and_then(|c| c.lock().ok().map(|g| g.len()))
            .unwrap_or(0)
    }

    /// Get cache capacity (0 when caching is disabled).
    pub fn cache_capacity(&self) -> usize {
        self.cache
            .as_ref()
            .and_then(|c| c.lock().ok().map(|g| g.cap().get()))
            .unwrap_or(0)
    }

    /// Clear the cache and reset its counters.
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            if let Ok(mut guard) = cache.lock() {
                guard.clear();
            }
        }
        self.cache_hits.store(0, Ordering::Relaxed);
        self.cache_misses.store(0, Ordering::Relaxed);
    }
}
