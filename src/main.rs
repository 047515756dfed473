//! predrank CLI - rank indices by cross-model average error.
//!
//! This is the command-line entry point for predrank. It runs the full
//! pipeline:
//!
//! 1. Load: parse the nested JSON document (model -> target -> record)
//! 2. Rank: average each index's error across models, stable-sort ascending
//! 3. Write: pretty-print the per-target orderings to the output path
//!
//! Design philosophy:
//! - Fail fast with the offending path, model, or target in the message
//! - Never write a partial output file
//! - Deterministic output: same input, byte-identical result

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;

use predrank::{load_document, store_document, PredictabilityRanker, RankerConfig};

/// Rank indices by cross-model average error
///
/// Reads a JSON document keyed by model name, then target name, where each
/// record's first element is a per-index error series. Writes, per target,
/// the first 500 indices ordered ascending by their error averaged across
/// all models. Indices that every model predicts cheaply tend to carry
/// information all of them learned.
///
/// Examples:
///   predrank errors.json ranking.json
///   predrank --verbose errors.json ranking.json
#[derive(Parser, Debug)]
#[command(name = "predrank")]
#[command(version)]
#[command(about, long_about = None)]
pub struct Cli {
    /// Path to the input JSON document (model -> target -> record)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Path the ranking document is written to (overwritten if present)
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Verbose output
    ///
    /// Shows progress on stderr: model and target counts plus per-stage
    /// timing. Never changes the output document.
    #[arg(short, long)]
    pub verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(&cli)
}

/// Execute the full pipeline: load, rank, write.
fn run(cli: &Cli) -> Result<()> {
    let start = Instant::now();

    let document = load_document(&cli.input)?;

    if cli.verbose {
        let target_count = document.values().next().map(|m| m.len()).unwrap_or(0);
        eprintln!(
            "✓ Loaded {} models x {} targets ({:.2?})",
            document.len(),
            target_count,
            start.elapsed()
        );
    }

    let rank_start = Instant::now();
    let ranker = PredictabilityRanker::new(RankerConfig::default());
    let ranking = ranker.rank(&document)?;

    if cli.verbose {
        eprintln!(
            "✓ Ranked {} targets ({:.2?})",
            ranking.len(),
            rank_start.elapsed()
        );
    }

    store_document(&cli.output, &ranking)?;

    if cli.verbose {
        eprintln!(
            "✓ Wrote {} ({:.2?} total)",
            cli.output.display(),
            start.elapsed()
        );
    }

    Ok(())
}
