//! Shared domain types.
//!
//! The enrichment invariant lives in the types: a `RawReview` has no sentiment
//! fields at all, and a `Review` can only be built by resolving a raw rating
//! against the lookup table.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::ValueEnum;

/// Default input file name.
pub const DEFAULT_INPUT: &str = "threads_app_reviews.csv";
/// Default output file name.
pub const DEFAULT_OUTPUT: &str = "output.csv";

/// Sentiment class attached to a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Negative,
    Neutral,
    Positive,
}

impl Label {
    /// Name written to the `Category` column.
    pub fn display_name(self) -> &'static str {
        match self {
            Label::Negative => "Negatif",
            Label::Neutral => "Netral",
            Label::Positive => "Positif",
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One input row as read from the CSV, before enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReview {
    /// 1-based source line where the row starts.
    pub line: usize,
    pub content: String,
    /// Raw rating code, not validated on read.
    pub rating: String,
}

/// A review that has been resolved against the lookup table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Review {
    pub line: usize,
    pub content: String,
    pub rating: String,
    /// -1, 0 or 1.
    pub polarity: i8,
    pub label: Label,
}

/// How input rows are assigned to workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DispatchMode {
    /// Worker `i` of `W` takes rows `i, i+W, i+2W, ...`; each row is emitted once.
    Partition,
    /// Every worker walks the full input; each row is emitted once per worker.
    Broadcast,
}

impl DispatchMode {
    pub fn display_name(self) -> &'static str {
        match self {
            DispatchMode::Partition => "partition",
            DispatchMode::Broadcast => "broadcast",
        }
    }

    /// Row indices handled by `worker` out of `workers` for an input of `len` rows.
    ///
    /// `workers` must be at least 1.
    pub fn indices(
        self,
        worker: usize,
        workers: usize,
        len: usize,
    ) -> std::iter::StepBy<std::ops::Range<usize>> {
        let (start, step) = match self {
            DispatchMode::Partition => (worker, workers.max(1)),
            DispatchMode::Broadcast => (0, 1),
        };
        (start.min(len)..len).step_by(step)
    }
}

/// What to do with a malformed row or an unknown rating code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ErrorPolicy {
    /// Fail the whole run on the first bad row.
    Abort,
    /// Log the row, count it, and carry on without it.
    Skip,
}

impl ErrorPolicy {
    pub fn display_name(self) -> &'static str {
        match self {
            ErrorPolicy::Abort => "abort",
            ErrorPolicy::Skip => "skip",
        }
    }
}

/// Available parallelism at startup, or 1 when the platform cannot report it.
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Resolved configuration for a single `sentiment run`.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub workers: usize,
    pub dispatch: DispatchMode,
    pub on_error: ErrorPolicy,
    /// Output channel capacity; 0 makes every send a rendezvous with the writer.
    pub channel_capacity: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            workers: default_workers(),
            dispatch: DispatchMode::Partition,
            on_error: ErrorPolicy::Abort,
            channel_capacity: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_indices_cover_every_row_once() {
        let workers = 3;
        let len = 10;
        let mut seen: Vec<usize> = (0..workers)
            .flat_map(|w| DispatchMode::Partition.indices(w, workers, len))
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..len).collect::<Vec<_>>());
    }

    #[test]
    fn partition_indices_with_more_workers_than_rows() {
        let workers = 8;
        let len = 3;
        let counts: Vec<usize> = (0..workers)
            .map(|w| DispatchMode::Partition.indices(w, workers, len).count())
            .collect();
        assert_eq!(counts, vec![1, 1, 1, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn broadcast_indices_repeat_full_input_per_worker() {
        for w in 0..4 {
            let idx: Vec<usize> = DispatchMode::Broadcast.indices(w, 4, 5).collect();
            assert_eq!(idx, vec![0, 1, 2, 3, 4]);
        }
    }

    #[test]
    fn default_workers_is_at_least_one() {
        assert!(default_workers() >= 1);
        assert_eq!(RunConfig::default().workers, default_workers());
    }

    #[test]
    fn label_display_names() {
        assert_eq!(Label::Negative.to_string(), "Negatif");
        assert_eq!(Label::Neutral.to_string(), "Netral");
        assert_eq!(Label::Positive.to_string(), "Positif");
    }
}
