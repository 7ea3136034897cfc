//! Write enriched reviews to CSV.
//!
//! Rows are written in the order the iterator yields them. When fed from the
//! pipeline channel that is arrival order, which is not input order.

use std::fs::File;
use std::path::Path;

use serde::Serialize;

use crate::domain::Review;
use crate::error::AppError;

/// Fixed output header.
pub const OUTPUT_HEADER: [&str; 4] = ["Content", "Rating", "Category Level", "Category"];

#[derive(Debug, Serialize)]
struct OutputRow<'a> {
    content: &'a str,
    rating: &'a str,
    category_level: i8,
    category: &'static str,
}

impl<'a> From<&'a Review> for OutputRow<'a> {
    fn from(review: &'a Review) -> Self {
        Self {
            content: &review.content,
            rating: &review.rating,
            category_level: review.polarity,
            category: review.label.display_name(),
        }
    }
}

/// Write all reviews to `path`, returning the number of data rows written.
///
/// `reviews` is taken by value: on an early error it is dropped, which is what
/// disconnects a channel receiver and releases blocked producers.
pub fn write_reviews<I>(path: &Path, reviews: I) -> Result<usize, AppError>
where
    I: IntoIterator<Item = Review>,
{
    let file = File::create(path).map_err(|e| {
        AppError::io(format!("Failed to create output CSV '{}': {e}", path.display()))
    })?;
    write_reviews_to(file, reviews)
}

/// Same as [`write_reviews`] but over any writer.
pub fn write_reviews_to<W, I>(sink: W, reviews: I) -> Result<usize, AppError>
where
    W: std::io::Write,
    I: IntoIterator<Item = Review>,
{
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(sink);

    writer
        .write_record(OUTPUT_HEADER)
        .map_err(|e| AppError::io(format!("Failed to write output CSV header: {e}")))?;

    let mut written = 0usize;
    for review in reviews {
        writer
            .serialize(OutputRow::from(&review))
            .map_err(|e| AppError::io(format!("Failed to write output CSV row: {e}")))?;
        written += 1;
    }

    writer
        .flush()
        .map_err(|e| AppError::io(format!("Failed to flush output CSV: {e}")))?;

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawReview;
    use crate::error::EXIT_IO;

    fn review(content: &str, rating: &str) -> Review {
        Review::enrich(RawReview {
            line: 2,
            content: content.to_string(),
            rating: rating.to_string(),
        })
        .unwrap()
    }

    fn render(reviews: Vec<Review>) -> String {
        let mut buf = Vec::new();
        write_reviews_to(&mut buf, reviews).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn writes_header_and_rows_in_iteration_order() {
        let out = render(vec![
            review("Great app", "5"),
            review("Bad app", "1"),
            review("Meh", "3"),
        ]);
        assert_eq!(
            out,
            "Content,Rating,Category Level,Category\n\
             Great app,5,1,Positif\n\
             Bad app,1,-1,Negatif\n\
             Meh,3,0,Netral\n"
        );
    }

    #[test]
    fn empty_stream_writes_only_header() {
        assert_eq!(render(Vec::new()), "Content,Rating,Category Level,Category\n");
    }

    #[test]
    fn content_with_delimiters_is_quoted() {
        let out = render(vec![review("fast, \"mostly\"\nstable", "4")]);
        assert_eq!(
            out,
            "Content,Rating,Category Level,Category\n\"fast, \"\"mostly\"\"\nstable\",4,1,Positif\n"
        );
    }

    #[test]
    fn write_reviews_creates_file_and_counts_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let n = write_reviews(&path, vec![review("a", "2"), review("b", "4")]).unwrap();
        assert_eq!(n, 2);
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.ends_with("a,2,-1,Negatif\nb,4,1,Positif\n"));
    }

    /// Accepts `limit` bytes, then fails every write.
    struct FullDisk {
        accepted: Vec<u8>,
        limit: usize,
    }

    impl std::io::Write for FullDisk {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            let room = self.limit - self.accepted.len();
            if room == 0 {
                return Err(std::io::Error::other("no space left on device"));
            }
            let n = room.min(buf.len());
            self.accepted.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure_aborts_and_keeps_earlier_output() {
        // Enough rows to overflow the csv writer's internal buffer several times.
        let rows = || (0..2000).map(|i| review(&format!("review number {i}"), "3"));
        let full = render(rows().collect());

        let mut sink = FullDisk {
            accepted: Vec::new(),
            limit: 10_000,
        };
        let err = write_reviews_to(&mut sink, rows()).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_IO);
        assert!(err.message().contains("no space left"), "{}", err.message());

        assert_eq!(sink.accepted.len(), 10_000);
        assert!(full.as_bytes().starts_with(&sink.accepted));
        let head: &[u8] = b"Content,Rating,Category Level,Category\nreview number 0,3,0,Netral\n";
        assert!(sink.accepted.starts_with(head));
    }

    #[test]
    fn unwritable_destination_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("out.csv");
        let err = write_reviews(&path, Vec::new()).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_IO);
    }
}
