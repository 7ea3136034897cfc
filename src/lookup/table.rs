use thiserror::Error;

use crate::domain::{Label, RawReview, Review};

/// One row of the lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentimentRule {
    pub code: &'static str,
    pub polarity: i8,
    pub label: Label,
}

/// Rating code with no entry in the table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown rating code '{code}'")]
pub struct UnknownRating {
    pub code: String,
}

static RULES: [SentimentRule; 5] = [
    SentimentRule { code: "1", polarity: -1, label: Label::Negative },
    SentimentRule { code: "2", polarity: -1, label: Label::Negative },
    SentimentRule { code: "3", polarity: 0, label: Label::Neutral },
    SentimentRule { code: "4", polarity: 1, label: Label::Positive },
    SentimentRule { code: "5", polarity: 1, label: Label::Positive },
];

/// All rules, in code order.
pub fn rules() -> &'static [SentimentRule] {
    &RULES
}

/// Resolve a raw rating code. Matching is exact: no trimming, no numeric parsing.
pub fn resolve(code: &str) -> Result<&'static SentimentRule, UnknownRating> {
    RULES
        .iter()
        .find(|rule| rule.code == code)
        .ok_or_else(|| UnknownRating { code: code.to_string() })
}

impl Review {
    /// Build an enriched review from a raw row.
    pub fn enrich(raw: RawReview) -> Result<Self, UnknownRating> {
        let rule = resolve(&raw.rating)?;
        Ok(Self {
            line: raw.line,
            content: raw.content,
            rating: raw.rating,
            polarity: rule.polarity,
            label: rule.label,
        })
    }
}
