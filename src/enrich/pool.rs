//! Worker pool + coordinator.
//!
//! Thread layout for one run:
//!
//! - `W` rayon pool threads, one worker each, reading the shared input slice
//! - one coordinator thread that runs every worker inside a single rayon scope
//!   and drops the last `Sender` once that scope returns
//! - the caller, which drains the `Receiver` (normally into the CSV writer)
//!
//! The coordinator never blocks the caller, so a zero-capacity channel cannot
//! deadlock: workers rendezvous with the reader on every send, and the channel
//! disconnects only after the scope barrier is satisfied.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender};
use rayon::{ThreadPool, ThreadPoolBuilder};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::{DispatchMode, ErrorPolicy, RawReview, Review, RunConfig};

/// Knobs for a single pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrichOptions {
    pub workers: usize,
    pub dispatch: DispatchMode,
    pub on_error: ErrorPolicy,
    pub channel_capacity: usize,
}

impl From<&RunConfig> for EnrichOptions {
    fn from(config: &RunConfig) -> Self {
        Self {
            workers: config.workers,
            dispatch: config.dispatch,
            on_error: config.on_error,
            channel_capacity: config.channel_capacity,
        }
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Worker count must be at least 1.")]
    NoWorkers,
    #[error("Failed to build worker pool: {0}")]
    PoolBuild(#[from] rayon::ThreadPoolBuildError),
    #[error("Failed to spawn pipeline coordinator: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("Unknown rating code '{code}' at line {line}")]
    UnknownRating { line: usize, code: String },
    #[error("An enrichment worker panicked.")]
    WorkerPanicked,
}

/// Counters reported once the pipeline has drained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineStats {
    pub workers: usize,
    pub dispatch: DispatchMode,
    /// Reviews sent to the channel (and accepted by the receiver).
    pub emitted: usize,
    /// Lookup failures dropped under `ErrorPolicy::Skip`, counted per worker visit.
    pub skipped: usize,
}

/// Join side of a running pipeline.
#[derive(Debug)]
pub struct PipelineHandle {
    coordinator: JoinHandle<Result<PipelineStats, PipelineError>>,
}

impl PipelineHandle {
    /// Wait for the coordinator. Call after the receiver has been drained or dropped.
    pub fn join(self) -> Result<PipelineStats, PipelineError> {
        self.coordinator
            .join()
            .map_err(|_| PipelineError::WorkerPanicked)?
    }
}

#[derive(Default)]
struct Shared {
    abort: AtomicBool,
    emitted: AtomicUsize,
    skipped: AtomicUsize,
    failure: OnceLock<PipelineError>,
}

impl Shared {
    fn aborted(&self) -> bool {
        self.abort.load(Ordering::Acquire)
    }

    /// First failure wins; later ones are dropped.
    fn fail(&self, err: PipelineError) {
        let _ = self.failure.set(err);
        self.abort.store(true, Ordering::Release);
    }
}

/// Start enriching `reviews` in the background.
///
/// Returns the output stream and a handle to join once the stream is exhausted.
pub fn spawn(
    reviews: Vec<RawReview>,
    options: EnrichOptions,
) -> Result<(Receiver<Review>, PipelineHandle), PipelineError> {
    if options.workers == 0 {
        return Err(PipelineError::NoWorkers);
    }

    let pool = ThreadPoolBuilder::new()
        .num_threads(options.workers)
        .thread_name(|i| format!("enrich-{i}"))
        .build()?;

    let (tx, rx) = crossbeam_channel::bounded(options.channel_capacity);
    let input: Arc<[RawReview]> = reviews.into();

    info!(
        workers = options.workers,
        dispatch = options.dispatch.display_name(),
        rows = input.len(),
        "starting enrichment"
    );

    let coordinator = thread::Builder::new()
        .name("enrich-coordinator".to_string())
        .spawn(move || coordinate(pool, input, options, tx))
        .map_err(PipelineError::Spawn)?;

    Ok((rx, PipelineHandle { coordinator }))
}

fn coordinate(
    pool: ThreadPool,
    input: Arc<[RawReview]>,
    options: EnrichOptions,
    tx: Sender<Review>,
) -> Result<PipelineStats, PipelineError> {
    let shared = Shared::default();

    // The scope returns only when every spawned worker has returned.
    pool.scope(|scope| {
        for worker in 0..options.workers {
            let tx = tx.clone();
            let input = &input;
            let shared = &shared;
            scope.spawn(move |_| run_worker(worker, input, options, tx, shared));
        }
    });

    // Last sender: dropping it disconnects the channel.
    drop(tx);
    debug!("all workers finished; output channel closed");

    let Shared {
        emitted,
        skipped,
        failure,
        ..
    } = shared;

    if let Some(err) = failure.into_inner() {
        return Err(err);
    }

    Ok(PipelineStats {
        workers: options.workers,
        dispatch: options.dispatch,
        emitted: emitted.into_inner(),
        skipped: skipped.into_inner(),
    })
}

fn run_worker(
    worker: usize,
    input: &[RawReview],
    options: EnrichOptions,
    tx: Sender<Review>,
    shared: &Shared,
) {
    let mut emitted = 0usize;
    let mut skipped = 0usize;

    for idx in options.dispatch.indices(worker, options.workers, input.len()) {
        if shared.aborted() {
            break;
        }

        let raw = &input[idx];
        // Each worker enriches its own copy; the shared slice is never mutated.
        let review = match Review::enrich(raw.clone()) {
            Ok(review) => review,
            Err(err) => match options.on_error {
                ErrorPolicy::Skip => {
                    warn!(worker, line = raw.line, "skipping review: {err}");
                    skipped += 1;
                    continue;
                }
                ErrorPolicy::Abort => {
                    shared.fail(PipelineError::UnknownRating {
                        line: raw.line,
                        code: err.code,
                    });
                    break;
                }
            },
        };

        if tx.send(review).is_err() {
            debug!(worker, "output receiver dropped; stopping");
            break;
        }
        emitted += 1;
    }

    shared.emitted.fetch_add(emitted, Ordering::Relaxed);
    shared.skipped.fetch_add(skipped, Ordering::Relaxed);
    debug!(worker, emitted, skipped, "worker finished");
}
