//! Command-line parsing for the review sentiment tagger.
//!
//! Argument parsing and command dispatch stay here; the pipeline itself only
//! ever sees a resolved `RunConfig`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{DEFAULT_INPUT, DEFAULT_OUTPUT, DispatchMode, ErrorPolicy};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "sentiment", version, about = "Tag review CSVs with rating-based sentiment")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Read reviews, enrich them concurrently, and write the tagged CSV.
    Run(RunArgs),
    /// Print the rating → sentiment lookup table.
    Rules,
}

/// Options for `sentiment run`.
#[derive(Debug, Parser, Clone)]
pub struct RunArgs {
    /// Input CSV (header row, then `Content,Rating` rows).
    #[arg(
        short,
        long,
        value_name = "CSV",
        env = "SENTIMENT_INPUT",
        default_value = DEFAULT_INPUT
    )]
    pub input: PathBuf,

    /// Output CSV, created or truncated.
    #[arg(
        short,
        long,
        value_name = "CSV",
        env = "SENTIMENT_OUTPUT",
        default_value = DEFAULT_OUTPUT
    )]
    pub output: PathBuf,

    /// Number of enrichment workers (defaults to the CPUs available to the process).
    #[arg(short, long, env = "SENTIMENT_WORKERS")]
    pub workers: Option<usize>,

    /// How rows are assigned to workers.
    #[arg(long, value_enum, env = "SENTIMENT_DISPATCH", default_value_t = DispatchMode::Partition)]
    pub dispatch: DispatchMode,

    /// What to do with malformed rows and unknown rating codes.
    #[arg(
        long = "on-error",
        value_enum,
        env = "SENTIMENT_ON_ERROR",
        default_value_t = ErrorPolicy::Abort
    )]
    pub on_error: ErrorPolicy,

    /// Output channel capacity (0 = unbuffered).
    #[arg(long, env = "SENTIMENT_CHANNEL_CAPACITY", default_value_t = 0)]
    pub channel_capacity: usize,
}
