//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and installs the tracing subscriber
//! - parses CLI arguments into a `RunConfig`
//! - runs the pipeline and prints the summary

use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::cli::{Command, RunArgs};
use crate::domain::{RunConfig, default_workers};
use crate::error::AppError;

pub mod pipeline;

const DEFAULT_LOG_FILTER: &str = "review_sentiment=info";

/// Entry point for the `sentiment` binary.
pub fn run() -> Result<(), AppError> {
    // Values from `.env` only fill in variables that are not already set.
    dotenvy::dotenv().ok();
    init_tracing();

    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Run(args) => handle_run(args),
        Command::Rules => {
            println!("{}", crate::report::format_rules(crate::lookup::rules()));
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    // Logs go to stderr so stdout carries only the summary.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn handle_run(args: RunArgs) -> Result<(), AppError> {
    let config = run_config_from_args(&args)?;
    let run = pipeline::run_pipeline(&config)?;
    println!("{}", crate::report::format_run_summary(&run, &config));
    Ok(())
}

pub fn run_config_from_args(args: &RunArgs) -> Result<RunConfig, AppError> {
    let workers = match args.workers {
        Some(0) => return Err(AppError::internal("--workers must be at least 1.")),
        Some(n) => n,
        None => default_workers(),
    };

    Ok(RunConfig {
        input: args.input.clone(),
        output: args.output.clone(),
        workers,
        dispatch: args.dispatch,
        on_error: args.on_error,
        channel_capacity: args.channel_capacity,
    })
}

/// Rewrite argv so `sentiment` defaults to `sentiment run`.
///
/// Rules:
/// - `sentiment`                      -> `sentiment run`
/// - `sentiment -i reviews.csv ...`   -> `sentiment run -i reviews.csv ...`
/// - `sentiment --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("run".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "run".to_string());
    }

    argv
}
