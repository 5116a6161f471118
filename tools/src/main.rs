use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use libbraille_core::RuleTable;
use libhakka::registry::{self, TableRegistry, TableSource};
use libhakka::Dialect;
use serde_json::json;

/// Sanity checks over a set of rule tables.
#[derive(Parser)]
struct Args {
    /// Table directory; the embedded tables are checked when omitted
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn empty_dots(table: &RuleTable) -> Vec<String> {
    table
        .keys_longest_first()
        .filter(|k| table.dots(k).is_empty())
        .map(str::to_string)
        .collect()
}

fn check_dialect(registry: &TableRegistry, dialect: Dialect) -> Result<(serde_json::Value, Vec<String>)> {
    let resolved = registry
        .resolve(dialect)
        .with_context(|| format!("loading tables for {dialect}"))?;
    let t = &resolved.tables;
    let mut problems = Vec::new();

    for (name, table) in [
        ("consonants", &t.consonants),
        ("vowels", &t.vowels),
        ("tones", &t.tones),
        ("checked", &t.checked),
    ] {
        for key in empty_dots(table) {
            problems.push(format!("{dialect}: {name} key {key:?} has no dots"));
        }
    }

    // The tokenizer tries checked finals first, so a vowel key that starts
    // with one can never be reached at the start of a token.
    for vowel in t.vowels.keys_longest_first() {
        for checked in t.checked.keys_longest_first() {
            if vowel.starts_with(checked) {
                problems.push(format!("{dialect}: vowel {vowel:?} is shadowed by checked final {checked:?}"));
            }
        }
    }

    if let Some(default) = t.tones.get("") {
        for key in t.checked.keys_longest_first() {
            if !default.is_empty() && t.checked.dots(key).ends_with(default) {
                problems.push(format!("{dialect}: checked final {key:?} ends in the default tone dot"));
            }
        }
    } else {
        problems.push(format!("{dialect}: tone table has no default (\"\") entry"));
    }

    let report = json!({
        "dialect": dialect.name(),
        "group": dialect.group().suffix(),
        "consonants": t.consonants.len(),
        "vowels": t.vowels.len(),
        "tones": t.tones.len(),
        "checked": t.checked.len(),
        "punctuation": t.punctuation.len(),
    });
    Ok((report, problems))
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let mut problems = Vec::new();
    let registry = match &args.data_dir {
        Some(dir) => {
            for name in registry::required_files() {
                let path = dir.join(&name);
                if !path.is_file() {
                    problems.push(format!("missing {}", path.display()));
                }
            }
            TableRegistry::from_dir(dir)
        }
        None => TableRegistry::embedded(),
    };
    if !problems.is_empty() {
        for p in &problems {
            eprintln!("{p}");
        }
        return Ok(ExitCode::FAILURE);
    }

    let mut reports = Vec::new();
    for dialect in Dialect::ALL {
        // Load failures (including multi-character punctuation keys) are
        // reported per dialect rather than aborting the run.
        match check_dialect(&registry, dialect) {
            Ok((report, mut found)) => {
                reports.push(report);
                problems.append(&mut found);
            }
            Err(err) => problems.push(format!("{err:#}")),
        }
    }

    let source = match registry.source() {
        TableSource::Embedded => "embedded".to_string(),
        TableSource::Dir(dir) => dir.display().to_string(),
    };
    if args.json {
        let out = json!({ "source": source, "dialects": reports, "problems": problems });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("tables: {source}");
        for r in &reports {
            println!(
                "{} ({}): {} consonants, {} vowels, {} tones, {} checked finals, {} punctuation",
                r["dialect"].as_str().unwrap_or_default(),
                r["group"].as_str().unwrap_or_default(),
                r["consonants"],
                r["vowels"],
                r["tones"],
                r["checked"],
                r["punctuation"],
            );
        }
        for p in &problems {
            println!("problem: {p}");
        }
    }

    if problems.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("{} problem(s) found", problems.len());
        Ok(ExitCode::FAILURE)
    }
}
