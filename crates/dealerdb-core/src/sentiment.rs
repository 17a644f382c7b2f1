use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Categorical outcome of classifying a review's text.
///
/// Stored alongside each review at insert time and never recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown sentiment label: '{0}'")]
pub struct ParseLabelError(pub String);

impl FromStr for SentimentLabel {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(SentimentLabel::Positive),
            "negative" => Ok(SentimentLabel::Negative),
            "neutral" => Ok(SentimentLabel::Neutral),
            other => Err(ParseLabelError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&SentimentLabel::Positive).expect("serialize");
        assert_eq!(json, "\"positive\"");
    }

    #[test]
    fn deserializes_lowercase() {
        let label: SentimentLabel = serde_json::from_str("\"negative\"").expect("deserialize");
        assert_eq!(label, SentimentLabel::Negative);
    }

    #[test]
    fn rejects_capitalized_label() {
        assert!(serde_json::from_str::<SentimentLabel>("\"Neutral\"").is_err());
        assert_eq!(
            "Neutral".parse::<SentimentLabel>(),
            Err(ParseLabelError("Neutral".to_string()))
        );
    }

    #[test]
    fn from_str_matches_display() {
        for label in [
            SentimentLabel::Positive,
            SentimentLabel::Negative,
            SentimentLabel::Neutral,
        ] {
            assert_eq!(label.to_string().parse::<SentimentLabel>(), Ok(label));
        }
    }
}
