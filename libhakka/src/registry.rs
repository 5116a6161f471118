//! Table registry: dialect → rule tables.
//!
//! Each dialect's tables are loaded at most once per registry and shared as
//! `Arc`s afterwards. Dialects of the same group load separate copies; tables
//! are never merged across dialects.
//!
//! Two sources are supported:
//! - embedded JSON compiled into the binary (the default)
//! - a data directory holding the same file names, for replacing the tables
//!   without rebuilding

use std::path::{Path, PathBuf};
use std::sync::Arc;

use libbraille_core::{PunctuationTable, RuleTable, TableLoadError, TableRole, TableSet};
use once_cell::sync::{Lazy, OnceCell};

use crate::dialect::{Dialect, DialectRules, TableGroup};

pub const VOWELS_FILE: &str = "vowels.json";
pub const PUNCTUATION_FILE: &str = "punctuation.json";

/// Embedded table files, by file name.
static EMBEDDED_FILES: &[(&str, &str)] = &[
    ("consonants_siian.json", include_str!("../data/consonants_siian.json")),
    ("consonants_hpzt.json", include_str!("../data/consonants_hpzt.json")),
    ("vowels.json", include_str!("../data/vowels.json")),
    ("tones_siian.json", include_str!("../data/tones_siian.json")),
    ("tones_hpzt.json", include_str!("../data/tones_hpzt.json")),
    ("checked_siian.json", include_str!("../data/checked_siian.json")),
    ("checked_hpzt.json", include_str!("../data/checked_hpzt.json")),
    ("punctuation.json", include_str!("../data/punctuation.json")),
];

static EMBEDDED: Lazy<TableRegistry> = Lazy::new(TableRegistry::embedded);

/// Where table files come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSource {
    Embedded,
    Dir(PathBuf),
}

/// Everything one dialect converts with.
#[derive(Debug)]
pub struct DialectTables {
    pub dialect: Dialect,
    pub rules: DialectRules,
    pub tables: Arc<TableSet>,
}

/// File names of the group-specific tables, in consonant, tone,
/// checked-final order.
pub fn group_files(group: TableGroup) -> [(TableRole, String); 3] {
    let suffix = group.suffix();
    [
        (TableRole::Consonant, format!("consonants_{suffix}.json")),
        (TableRole::Tone, format!("tones_{suffix}.json")),
        (TableRole::CheckedFinal, format!("checked_{suffix}.json")),
    ]
}

/// Every file name a data directory must provide.
pub fn required_files() -> Vec<String> {
    let mut files: Vec<String> = [TableGroup::Siian, TableGroup::Hpzt]
        .into_iter()
        .flat_map(group_files)
        .map(|(_, name)| name)
        .collect();
    files.push(VOWELS_FILE.to_string());
    files.push(PUNCTUATION_FILE.to_string());
    files.sort();
    files
}

/// Raw text of an embedded table file.
pub fn embedded_file(name: &str) -> Option<&'static str> {
    EMBEDDED_FILES
        .iter()
        .find(|(file, _)| *file == name)
        .map(|(_, text)| *text)
}

/// Per-dialect lazily loaded tables.
#[derive(Debug)]
pub struct TableRegistry {
    source: TableSource,
    cells: [OnceCell<Arc<DialectTables>>; 6],
}

impl TableRegistry {
    /// Registry over the tables compiled into the binary.
    pub fn embedded() -> Self {
        Self {
            source: TableSource::Embedded,
            cells: Default::default(),
        }
    }

    /// Registry over a data directory. Nothing is read until first use.
    pub fn from_dir<P: Into<PathBuf>>(dir: P) -> Self {
        Self {
            source: TableSource::Dir(dir.into()),
            cells: Default::default(),
        }
    }

    /// Process-wide registry over the embedded tables.
    pub fn global() -> &'static TableRegistry {
        &EMBEDDED
    }

    pub fn source(&self) -> &TableSource {
        &self.source
    }

    /// Tables for `dialect`, loading them on first use.
    pub fn resolve(&self, dialect: Dialect) -> Result<Arc<DialectTables>, TableLoadError> {
        self.cells[dialect.index()]
            .get_or_try_init(|| self.load(dialect).map(Arc::new))
            .cloned()
    }

    /// Resolve every dialect, failing on the first table that does not load.
    pub fn preload_all(&self) -> Result<(), TableLoadError> {
        for dialect in Dialect::ALL {
            self.resolve(dialect)?;
        }
        Ok(())
    }

    fn load(&self, dialect: Dialect) -> Result<DialectTables, TableLoadError> {
        let [consonants, tones, checked] = group_files(dialect.group());

        let tables = TableSet {
            consonants: self.rule_table(consonants.0, &consonants.1)?,
            vowels: self.rule_table(TableRole::Vowel, VOWELS_FILE)?,
            tones: self.rule_table(tones.0, &tones.1)?,
            checked: self.rule_table(checked.0, &checked.1)?,
            punctuation: self.punctuation_table()?,
        };

        tracing::debug!(
            dialect = dialect.name(),
            consonants = tables.consonants.len(),
            vowels = tables.vowels.len(),
            tones = tables.tones.len(),
            checked = tables.checked.len(),
            punctuation = tables.punctuation.len(),
            "loaded dialect tables"
        );

        Ok(DialectTables {
            dialect,
            rules: dialect.rules(),
            tables: Arc::new(tables),
        })
    }

    fn rule_table(&self, role: TableRole, name: &str) -> Result<RuleTable, TableLoadError> {
        match &self.source {
            TableSource::Embedded => {
                RuleTable::from_json_str(role, embedded_text(role, name)?, &format!("embedded:{name}"))
            }
            TableSource::Dir(dir) => RuleTable::load(role, dir.join(name)),
        }
    }

    fn punctuation_table(&self) -> Result<PunctuationTable, TableLoadError> {
        match &self.source {
            TableSource::Embedded => PunctuationTable::from_json_str(
                embedded_text(TableRole::Punctuation, PUNCTUATION_FILE)?,
                &format!("embedded:{PUNCTUATION_FILE}"),
            ),
            TableSource::Dir(dir) => PunctuationTable::load(dir.join(PUNCTUATION_FILE)),
        }
    }
}

fn embedded_text(role: TableRole, name: &str) -> Result<&'static str, TableLoadError> {
    embedded_file(name).ok_or_else(|| TableLoadError::Io {
        role,
        path: Path::new(name).to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "no embedded table with this name"),
    })
}
