//! CSV ingest.
//!
//! Turns the review CSV into an ordered list of `RawReview`s held in memory.
//!
//! - the first record is a header and is discarded unread
//! - every data record must have exactly two fields (`content`, `rating`)
//! - malformed records are either fatal or skipped, per `ErrorPolicy`
//! - ratings are not checked here; that happens at lookup time

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::{debug, warn};

use crate::domain::{ErrorPolicy, RawReview};
use crate::error::AppError;

/// A row that could not be decoded into a `RawReview`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: decoded rows in file order plus any skipped rows.
#[derive(Debug, Clone, Default)]
pub struct IngestedReviews {
    pub reviews: Vec<RawReview>,
    pub row_errors: Vec<RowError>,
    /// Data records seen, header excluded.
    pub rows_read: usize,
}

/// Load every review from the CSV at `path`.
pub fn read_reviews(path: &Path, on_error: ErrorPolicy) -> Result<IngestedReviews, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open CSV '{}': {e}", path.display())))?;

    let ingested = read_reviews_from(file, on_error)?;
    debug!(
        path = %path.display(),
        rows_read = ingested.rows_read,
        rows_skipped = ingested.row_errors.len(),
        "input loaded"
    );
    Ok(ingested)
}

/// Same as [`read_reviews`] but over any reader.
pub fn read_reviews_from<R: Read>(
    source: R,
    on_error: ErrorPolicy,
) -> Result<IngestedReviews, AppError> {
    // `flexible` lets short/long rows through so they are reported by line
    // instead of as an opaque length mismatch.
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let header_len = reader
        .byte_headers()
        .map_err(|e| AppError::io(format!("Failed to read CSV header: {e}")))?
        .len();
    if header_len == 0 {
        return Err(AppError::io("Input CSV is missing its header row."));
    }

    let mut out = IngestedReviews::default();

    for (idx, result) in reader.records().enumerate() {
        // +2: records() starts after the header, and lines are 1-based.
        let fallback_line = idx + 2;
        out.rows_read += 1;

        let decoded = match result {
            Ok(record) => {
                let line = record_line(&record).unwrap_or(fallback_line);
                parse_row(&record, line).map_err(|message| RowError { line, message })
            }
            Err(e) => {
                let line = e
                    .position()
                    .map(|p| p.line() as usize)
                    .unwrap_or(fallback_line);
                // A failing source is never a bad row, whatever the policy.
                if let csv::ErrorKind::Io(io_err) = e.kind() {
                    return Err(AppError::io(format!(
                        "Failed to read CSV near line {line}: {io_err}"
                    )));
                }
                Err(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                })
            }
        };

        match decoded {
            Ok(review) => out.reviews.push(review),
            Err(row_error) => match on_error {
                ErrorPolicy::Abort => {
                    return Err(AppError::decode(format!(
                        "Malformed row at line {}: {}",
                        row_error.line, row_error.message
                    )));
                }
                ErrorPolicy::Skip => {
                    warn!(
                        line = row_error.line,
                        "skipping malformed row: {}", row_error.message
                    );
                    out.row_errors.push(row_error);
                }
            },
        }
    }

    Ok(out)
}

fn record_line(record: &StringRecord) -> Option<usize> {
    record.position().map(|p| p.line() as usize)
}

fn parse_row(record: &StringRecord, line: usize) -> Result<RawReview, String> {
    if record.len() != 2 {
        return Err(format!("expected 2 fields (content, rating), found {}", record.len()));
    }
    let content = record.get(0).unwrap_or_default().to_string();
    let rating = record.get(1).unwrap_or_default().to_string();
    Ok(RawReview { line, content, rating })
}
