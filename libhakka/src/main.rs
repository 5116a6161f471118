use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use libhakka::{Decomposition, Dialect, Engine, HakkaConfig, TokenTrace};
use tracing_subscriber::EnvFilter;

/// Convert Hakka romanization to six-dot braille.
#[derive(Parser)]
#[command(name = "hakka-braille", version)]
struct Cli {
    /// Dialect selector (四縣, hailu, ...); overrides the config file
    #[arg(short, long, global = true)]
    dialect: Option<String>,

    /// TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory of rule-table JSON files replacing the embedded tables
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,

    /// Text to convert; read from stdin line by line when omitted
    text: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Print each token with its decomposition and braille
    Explain { text: String },
    /// List supported dialects and their selectors
    Dialects,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
}

fn load_config(cli: &Cli) -> Result<HakkaConfig> {
    let mut config = match &cli.config {
        Some(path) => HakkaConfig::load_toml(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => HakkaConfig::default(),
    };
    if let Some(selector) = &cli.dialect {
        config.dialect = selector
            .parse::<Dialect>()
            .with_context(|| format!("unsupported dialect selector {selector:?}"))?;
    }
    if let Some(dir) = &cli.data_dir {
        config.data_dir = Some(dir.clone());
    }
    Ok(config)
}

fn describe(d: &Decomposition) -> String {
    let mut parts = Vec::new();
    if d.nasal {
        parts.push("nasal".to_string());
    }
    if let Some(onset) = &d.onset {
        parts.push(format!("onset={onset}"));
    }
    parts.push(format!("nucleus={:?}", d.nucleus));
    parts.push(format!("coda={:?}", d.coda));
    parts.push(format!("tone={:?}", d.tone));
    parts.join(" ")
}

fn print_trace(out: &mut impl Write, trace: &[TokenTrace]) -> io::Result<()> {
    for t in trace {
        let detail = match &t.decomposition {
            None => "punctuation".to_string(),
            Some(Ok(d)) => describe(d),
            Some(Err(reason)) => format!("error: {reason}"),
        };
        writeln!(
            out,
            "{:>4}..{:<4} {:<10} {:<10} {}",
            t.token.start, t.token.end, t.token.text, t.unit.text, detail
        )?;
    }
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    if let Some(Command::Dialects) = &cli.command {
        for d in Dialect::ALL {
            println!("{}\t{:?}\t{}", d.name(), d.group(), d.selectors().join(", "));
        }
        return Ok(());
    }

    let config = load_config(&cli)?;
    let engine = Engine::with_config(&config).context("failed to build engine")?;
    tracing::debug!(dialect = %engine.dialect(), "engine ready");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match (&cli.command, &cli.text) {
        (Some(Command::Explain { text }), _) => {
            for line in text.lines() {
                print_trace(&mut out, &engine.explain(line))?;
            }
        }
        (_, Some(text)) => writeln!(out, "{}", engine.convert(text))?,
        (_, None) => {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let line = line.context("failed to read stdin")?;
                writeln!(out, "{}", engine.convert_line(&line))?;
            }
        }
    }

    Ok(())
}
