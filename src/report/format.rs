//! Formatted terminal output.
//!
//! Formatting lives in one place so pipeline code never builds display strings.

use crate::app::pipeline::RunOutput;
use crate::domain::RunConfig;
use crate::lookup::SentimentRule;

/// Format the end-of-run summary.
pub fn format_run_summary(run: &RunOutput, config: &RunConfig) -> String {
    let mut out = String::new();

    out.push_str("=== sentiment - review tagging ===\n");
    out.push_str(&format!("Input: {}\n", config.input.display()));
    out.push_str(&format!(
        "Rows: read={} | malformed={} | unknown rating={}\n",
        run.rows_read, run.rows_malformed, run.stats.skipped,
    ));
    out.push_str(&format!(
        "Workers: {} ({}) | on error: {}\n",
        run.stats.workers,
        run.stats.dispatch.display_name(),
        config.on_error.display_name(),
    ));
    out.push_str(&format!(
        "Output: {} ({} rows)\n",
        config.output.display(),
        run.rows_written,
    ));
    out.push_str(&format!("Done in: {:?}", run.elapsed));

    out
}

/// Format the lookup table as an aligned listing.
pub fn format_rules(rules: &[SentimentRule]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<8}{:<16}{}\n", "Rating", "Category Level", "Category"));
    for rule in rules {
        out.push_str(&format!(
            "{:<8}{:<16}{}\n",
            rule.code,
            rule.polarity,
            rule.label.display_name()
        ));
    }
    out.pop();
    out
}
