//! The read → enrich → write workflow behind `sentiment run`.
//!
//! The writer runs on the calling thread while the enrichment pool fills the
//! channel, so the stages overlap instead of running back to back.

use std::time::{Duration, Instant};

use tracing::info;

use crate::domain::RunConfig;
use crate::enrich::{self, EnrichOptions, PipelineStats};
use crate::error::AppError;
use crate::io::{read_reviews, write_reviews};

/// Everything a single run produced.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Data rows in the input, header excluded.
    pub rows_read: usize,
    /// Rows dropped by the reader under `ErrorPolicy::Skip`.
    pub rows_malformed: usize,
    pub stats: PipelineStats,
    pub rows_written: usize,
    pub elapsed: Duration,
}

/// Execute the full pipeline for `config`.
pub fn run_pipeline(config: &RunConfig) -> Result<RunOutput, AppError> {
    let start = Instant::now();

    // 1) Load all rows.
    let ingest = read_reviews(&config.input, config.on_error)?;
    let rows_read = ingest.rows_read;
    let rows_malformed = ingest.row_errors.len();

    // 2) Fan out to the worker pool.
    let (rx, handle) = enrich::spawn(ingest.reviews, EnrichOptions::from(config))?;

    // 3) Drain into the output file. The receiver moves into the writer so a
    //    write failure disconnects it and unblocks the workers.
    let written = write_reviews(&config.output, rx);
    let joined = handle.join();

    let rows_written = written?;
    let stats = joined?;

    let elapsed = start.elapsed();
    info!(rows_written, "Done in: {elapsed:?}");

    Ok(RunOutput {
        rows_read,
        rows_malformed,
        stats,
        rows_written,
        elapsed,
    })
}
