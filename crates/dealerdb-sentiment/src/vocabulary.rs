//! Fixed positive/negative term sets used by the classifier.

use std::collections::{BTreeSet, HashSet};

use thiserror::Error;

/// Terms that count toward a positive label.
pub const POSITIVE_TERMS: &[&str] = &[
    "excellent",
    "amazing",
    "fantastic",
    "great",
    "wonderful",
    "awesome",
    "outstanding",
    "superb",
    "brilliant",
    "perfect",
    "love",
    "best",
    "good",
    "nice",
    "happy",
    "satisfied",
    "pleased",
    "recommend",
    "professional",
    "friendly",
    "helpful",
    "quality",
    "fast",
    "efficient",
];

/// Terms that count toward a negative label.
pub const NEGATIVE_TERMS: &[&str] = &[
    "terrible",
    "awful",
    "horrible",
    "bad",
    "worst",
    "hate",
    "disappointed",
    "poor",
    "slow",
    "rude",
    "unprofessional",
    "expensive",
    "overpriced",
    "broken",
    "defective",
    "problem",
    "issue",
    "complaint",
    "unsatisfied",
    "angry",
    "frustrated",
    "waste",
    "regret",
    "never",
    "avoid",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VocabularyError {
    /// A term is empty or would not survive tokenization as a single token.
    #[error("invalid vocabulary term '{0}': must be a single alphanumeric word")]
    InvalidTerm(String),

    /// Terms listed as both positive and negative, sorted.
    #[error("terms appear in both positive and negative sets: {}", .0.join(", "))]
    Overlap(Vec<String>),
}

/// Two disjoint sets of lowercase tokens.
///
/// Immutable once built; share it behind an `Arc` rather than mutating.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    positive: HashSet<String>,
    negative: HashSet<String>,
}

impl Vocabulary {
    /// Build a vocabulary, lowercasing every term.
    ///
    /// # Errors
    ///
    /// - [`VocabularyError::InvalidTerm`] if a term is empty or contains
    ///   anything other than alphanumeric characters.
    /// - [`VocabularyError::Overlap`] if a term lands in both sets.
    pub fn new<P, N, S>(positive: P, negative: N) -> Result<Self, VocabularyError>
    where
        P: IntoIterator<Item = S>,
        N: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let positive = normalize_terms(positive)?;
        let negative = normalize_terms(negative)?;

        let overlap: BTreeSet<&String> = positive.intersection(&negative).collect();
        if !overlap.is_empty() {
            return Err(VocabularyError::Overlap(
                overlap.into_iter().cloned().collect(),
            ));
        }

        Ok(Self { positive, negative })
    }

    /// The vocabulary compiled into the binary.
    #[must_use]
    pub fn builtin() -> Self {
        // The built-in tables are already lowercase and disjoint; a unit test
        // runs them through `new` to keep it that way.
        Self {
            positive: POSITIVE_TERMS.iter().map(|t| (*t).to_owned()).collect(),
            negative: NEGATIVE_TERMS.iter().map(|t| (*t).to_owned()).collect(),
        }
    }

    #[must_use]
    pub fn is_positive(&self, token: &str) -> bool {
        self.positive.contains(token)
    }

    #[must_use]
    pub fn is_negative(&self, token: &str) -> bool {
        self.negative.contains(token)
    }

    #[must_use]
    pub fn positive_len(&self) -> usize {
        self.positive.len()
    }

    #[must_use]
    pub fn negative_len(&self) -> usize {
        self.negative.len()
    }
}

fn normalize_terms<I, S>(terms: I) -> Result<HashSet<String>, VocabularyError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    terms
        .into_iter()
        .map(|term| {
            let raw = term.as_ref();
            let lower = raw.to_lowercase();
            if lower.is_empty() || !lower.chars().all(char::is_alphanumeric) {
                Err(VocabularyError::InvalidTerm(raw.to_owned()))
            } else {
                Ok(lower)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_terms_pass_validation() {
        let checked = Vocabulary::new(POSITIVE_TERMS, NEGATIVE_TERMS)
            .expect("built-in vocabulary must be valid and disjoint");
        let builtin = Vocabulary::builtin();
        assert_eq!(checked.positive, builtin.positive);
        assert_eq!(checked.negative, builtin.negative);
    }

    #[test]
    fn builtin_sizes_match_tables() {
        let vocab = Vocabulary::builtin();
        assert_eq!(vocab.positive_len(), POSITIVE_TERMS.len());
        assert_eq!(vocab.negative_len(), NEGATIVE_TERMS.len());
    }

    #[test]
    fn overlap_is_rejected_with_sorted_terms() {
        let err = Vocabulary::new(["fine", "good", "cheap"], ["cheap", "bad", "fine"]).unwrap_err();
        assert_eq!(
            err,
            VocabularyError::Overlap(vec!["cheap".to_string(), "fine".to_string()])
        );
    }

    #[test]
    fn overlap_detected_after_lowercasing() {
        let err = Vocabulary::new(["Cheap"], ["cheap"]).unwrap_err();
        assert!(matches!(err, VocabularyError::Overlap(ref t) if t == &["cheap".to_string()]));
    }

    #[test]
    fn terms_are_lowercased() {
        let vocab = Vocabulary::new(["GREAT"], ["Bad"]).expect("valid");
        assert!(vocab.is_positive("great"));
        assert!(vocab.is_negative("bad"));
        assert!(!vocab.is_positive("GREAT"));
    }

    #[test]
    fn multi_word_term_is_rejected() {
        let err = Vocabulary::new(["well done"], Vec::<&str>::new()).unwrap_err();
        assert_eq!(err, VocabularyError::InvalidTerm("well done".to_string()));
    }

    #[test]
    fn punctuated_term_is_rejected() {
        let err = Vocabulary::new(Vec::<&str>::new(), ["don't"]).unwrap_err();
        assert_eq!(err, VocabularyError::InvalidTerm("don't".to_string()));
    }

    #[test]
    fn empty_term_is_rejected() {
        let err = Vocabulary::new([""], ["bad"]).unwrap_err();
        assert_eq!(err, VocabularyError::InvalidTerm(String::new()));
    }

    #[test]
    fn duplicate_terms_within_one_set_are_fine() {
        let vocab = Vocabulary::new(["good", "good"], ["bad"]).expect("valid");
        assert_eq!(vocab.positive_len(), 1);
    }
}
