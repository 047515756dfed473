//! predrank-matrix CLI - cross-model summary matrix.
//!
//! Collapses each (source, target) error series to two scalars, the
//! geometric mean and the differential entropy in nats, and writes them as
//! a nested source -> target matrix. Feeds comparison tables and heatmaps
//! where one number per model pair is enough.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;

use predrank::{load_document, store_document, summarize};

/// Summarize each (source, target) error series to one row of scalars
///
/// Pairs where the source name equals the target name are skipped.
///
/// Examples:
///   predrank-matrix errors.json matrix.json
#[derive(Parser, Debug)]
#[command(name = "predrank-matrix")]
#[command(version)]
#[command(about, long_about = None)]
pub struct Cli {
    /// Path to the input JSON document (model -> target -> record)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Path the summary matrix is written to (overwritten if present)
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let start = Instant::now();

    let document = load_document(&cli.input)?;
    let matrix = summarize(&document)?;

    if cli.verbose {
        let pairs: usize = matrix.values().map(|row| row.len()).sum();
        eprintln!(
            "✓ Summarized {} pairs across {} models ({:.2?})",
            pairs,
            matrix.len(),
            start.elapsed()
        );
    }

    store_document(&cli.output, &matrix)?;

    if cli.verbose {
        eprintln!("✓ Wrote {}", cli.output.display());
    }

    Ok(())
}
