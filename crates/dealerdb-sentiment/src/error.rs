use std::time::Duration;

use thiserror::Error;

/// Failures of a remote classification call.
///
/// Review ingestion collapses every variant to a neutral label; the
/// analyze-only route surfaces them to the caller.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// The caller supplied no review text at all.
    #[error("Review text is required")]
    InvalidRequest,

    #[error("invalid sentiment service URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("sentiment service did not answer within {0:?}")]
    Timeout(Duration),

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("sentiment service returned status {0}")]
    Status(u16),

    #[error("malformed sentiment response: {0}")]
    MalformedResponse(String),
}

impl ClassifyError {
    /// True when the service could not produce a label, as opposed to the
    /// request itself being wrong.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            ClassifyError::Timeout(_)
                | ClassifyError::Http(_)
                | ClassifyError::Status(_)
                | ClassifyError::MalformedResponse(_)
        )
    }
}
