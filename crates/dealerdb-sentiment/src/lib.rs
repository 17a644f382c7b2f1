//! Review sentiment for dealerdb.
//!
//! A fixed-vocabulary keyword classifier, plus the HTTP client the review
//! backend uses to reach the standalone analyzer service.

pub mod classifier;
pub mod client;
pub mod error;
pub mod vocabulary;

pub use classifier::{classify, Classifier, Score};
pub use client::{AnalyzeResponse, SentimentClient, ANALYZE_PATH, DEFAULT_TIMEOUT};
pub use error::ClassifyError;
pub use vocabulary::{Vocabulary, VocabularyError, NEGATIVE_TERMS, POSITIVE_TERMS};
