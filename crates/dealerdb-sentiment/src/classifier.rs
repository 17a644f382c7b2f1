//! Keyword sentiment classifier for dealership reviews.

use std::sync::{Arc, LazyLock};

use dealerdb_core::SentimentLabel;

use crate::vocabulary::Vocabulary;

static BUILTIN: LazyLock<Classifier> =
    LazyLock::new(|| Classifier::new(Vocabulary::builtin()));

/// Vocabulary hit counts for one piece of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub positive: usize,
    pub negative: usize,
}

impl Score {
    /// Majority label; ties (including `0/0`) are neutral.
    #[must_use]
    pub fn label(self) -> SentimentLabel {
        match self.positive.cmp(&self.negative) {
            std::cmp::Ordering::Greater => SentimentLabel::Positive,
            std::cmp::Ordering::Less => SentimentLabel::Negative,
            std::cmp::Ordering::Equal => SentimentLabel::Neutral,
        }
    }
}

/// Classifies text by counting vocabulary terms.
///
/// Cheap to clone; the vocabulary is shared.
#[derive(Debug, Clone)]
pub struct Classifier {
    vocabulary: Arc<Vocabulary>,
}

impl Classifier {
    #[must_use]
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self {
            vocabulary: Arc::new(vocabulary),
        }
    }

    /// Count positive and negative tokens in `text`.
    ///
    /// Text is lowercased and every character that is neither alphanumeric
    /// nor whitespace becomes a space, so `"great!"` matches `great` and
    /// `"well-made"` yields two tokens. Membership is exact: `"awesomeness"`
    /// does not match `awesome`.
    #[must_use]
    pub fn score(&self, text: &str) -> Score {
        let mut score = Score::default();
        for token in normalize(text).split_whitespace() {
            if self.vocabulary.is_positive(token) {
                score.positive += 1;
            } else if self.vocabulary.is_negative(token) {
                score.negative += 1;
            }
        }
        score
    }

    #[must_use]
    pub fn classify(&self, text: &str) -> SentimentLabel {
        if text.is_empty() {
            return SentimentLabel::Neutral;
        }
        self.score(text).label()
    }

    /// Absent text is neutral, same as empty text.
    #[must_use]
    pub fn classify_optional(&self, text: Option<&str>) -> SentimentLabel {
        text.map_or(SentimentLabel::Neutral, |t| self.classify(t))
    }
}

impl Default for Classifier {
    fn default() -> Self {
        BUILTIN.clone()
    }
}

/// Classify `text` with the built-in vocabulary.
#[must_use]
pub fn classify(text: &str) -> SentimentLabel {
    BUILTIN.classify(text)
}

fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect()
}
