//! HTTP client for the sentiment analyzer service.
//!
//! One bounded attempt per call, no retries. Callers decide what a failure
//! means: review ingestion falls back to neutral, the analyze-only route
//! reports it.

use std::time::Duration;

use dealerdb_core::SentimentLabel;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::error::ClassifyError;

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Path of the classification endpoint on the analyzer.
pub const ANALYZE_PATH: &str = "analyzereview";

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    review: &'a str,
}

/// Success body of `POST /analyzereview`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub sentiment: SentimentLabel,
    /// The submitted text, echoed back; `null` when the caller sent `null`.
    pub review: Option<String>,
}

/// Client for the analyzer's `/analyzereview` endpoint.
#[derive(Debug, Clone)]
pub struct SentimentClient {
    client: Client,
    endpoint: Url,
    timeout: Duration,
}

impl SentimentClient {
    /// Creates a client with the default five-second timeout.
    ///
    /// # Errors
    ///
    /// See [`SentimentClient::with_timeout`].
    pub fn new(base_url: &str) -> Result<Self, ClassifyError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Creates a client whose every request is bounded by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::InvalidBaseUrl`] if `base_url` does not parse,
    /// or [`ClassifyError::Http`] if the `reqwest::Client` cannot be built.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ClassifyError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent("dealerdb/0.1 (review-ingestion)")
            .build()?;

        // Exactly one trailing slash so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join(ANALYZE_PATH))
            .map_err(|e| ClassifyError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            endpoint,
            timeout,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Classify `text` remotely.
    ///
    /// # Errors
    ///
    /// - [`ClassifyError::Timeout`] if no complete answer arrives in time.
    /// - [`ClassifyError::Http`] on connection or transport failure.
    /// - [`ClassifyError::Status`] on any non-2xx response.
    /// - [`ClassifyError::MalformedResponse`] if the body is not a valid
    ///   [`AnalyzeResponse`].
    pub async fn analyze(&self, text: &str) -> Result<SentimentLabel, ClassifyError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&AnalyzeRequest { review: text })
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "sentiment service rejected request");
            return Err(ClassifyError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;

        let parsed: AnalyzeResponse = serde_json::from_slice(&body)
            .map_err(|e| ClassifyError::MalformedResponse(e.to_string()))?;

        Ok(parsed.sentiment)
    }

    /// Like [`analyze`](Self::analyze), but absent text is a caller error
    /// rather than a neutral review.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::InvalidRequest`] when `text` is `None`,
    /// otherwise whatever [`analyze`](Self::analyze) returns.
    pub async fn analyze_required(
        &self,
        text: Option<&str>,
    ) -> Result<SentimentLabel, ClassifyError> {
        let text = text.ok_or(ClassifyError::InvalidRequest)?;
        self.analyze(text).await
    }

    fn transport_error(&self, e: reqwest::Error) -> ClassifyError {
        if e.is_timeout() {
            ClassifyError::Timeout(self.timeout)
        } else {
            ClassifyError::Http(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_analyze_path() {
        let client = SentimentClient::new("http://localhost:5000").expect("client");
        assert_eq!(
            client.endpoint().as_str(),
            "http://localhost:5000/analyzereview"
        );
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let client = SentimentClient::new("http://gateway/sentiment/").expect("client");
        assert_eq!(
            client.endpoint().as_str(),
            "http://gateway/sentiment/analyzereview"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = SentimentClient::new("not a url").unwrap_err();
        assert!(matches!(err, ClassifyError::InvalidBaseUrl { .. }));
        assert!(!err.is_unavailable());
    }

    #[test]
    fn default_timeout_is_five_seconds() {
        let client = SentimentClient::new("http://localhost:5000").expect("client");
        assert_eq!(client.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn response_deserializes_null_review() {
        let parsed: AnalyzeResponse =
            serde_json::from_str(r#"{"sentiment":"neutral","review":null}"#).expect("parse");
        assert_eq!(parsed.sentiment, SentimentLabel::Neutral);
        assert!(parsed.review.is_none());
    }
}
