//! Review ingestion: validate a submitted review, label it once through the
//! sentiment service, persist it.
//!
//! The sentiment call is best-effort. Any failure of the remote classifier is
//! logged and the review is stored as `neutral`; only validation, a missing
//! dealer, or a store failure reject the submission.

use std::future::Future;

use chrono::NaiveDate;
use dealerdb_core::{SentimentLabel, MAX_CAR_YEAR, MIN_CAR_YEAR};
use dealerdb_db::{DbError, DealerRow, NewReview, ReviewRow};
use dealerdb_sentiment::SentimentClient;
use serde::{Deserialize, Deserializer};
use sqlx::PgPool;
use thiserror::Error;

pub const MAX_NAME_CHARS: usize = 100;

// ---------------------------------------------------------------------------
// Store seam
// ---------------------------------------------------------------------------

/// Persistence operations ingestion depends on.
pub trait ReviewStore: Send + Sync {
    fn get_dealer(
        &self,
        dealer_id: i64,
    ) -> impl Future<Output = Result<Option<DealerRow>, DbError>> + Send;

    fn create_review(&self, review: NewReview)
        -> impl Future<Output = Result<i64, DbError>> + Send;

    fn list_reviews_by_dealer(
        &self,
        dealer_id: i64,
    ) -> impl Future<Output = Result<Vec<ReviewRow>, DbError>> + Send;
}

impl ReviewStore for PgPool {
    async fn get_dealer(&self, dealer_id: i64) -> Result<Option<DealerRow>, DbError> {
        dealerdb_db::get_dealer(self, dealer_id).await
    }

    async fn create_review(&self, review: NewReview) -> Result<i64, DbError> {
        dealerdb_db::insert_review(self, &review).await
    }

    async fn list_reviews_by_dealer(&self, dealer_id: i64) -> Result<Vec<ReviewRow>, DbError> {
        dealerdb_db::list_reviews_by_dealer(self, dealer_id).await
    }
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Body of `POST /api/v1/reviews`.
///
/// The web form posts `""` for untouched optional inputs, so empty strings in
/// `purchase_date`, `car_make`, `car_model` and `car_year` read as absent.
#[derive(Debug, Clone, Deserialize)]
pub struct NewReviewRequest {
    pub name: String,
    pub dealership: i64,
    pub review: String,
    #[serde(default)]
    pub purchase: bool,
    #[serde(default, deserialize_with = "empty_date_as_none")]
    pub purchase_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "empty_str_as_none")]
    pub car_make: Option<String>,
    #[serde(default, deserialize_with = "empty_str_as_none")]
    pub car_model: Option<String>,
    #[serde(default, deserialize_with = "loose_year")]
    pub car_year: Option<i32>,
}

fn empty_str_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty()))
}

fn empty_date_as_none<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match empty_str_as_none(deserializer)? {
        None => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("purchase_date '{raw}': {e}"))),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum YearInput {
    Number(i32),
    Text(String),
}

fn loose_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<YearInput>::deserialize(deserializer)? {
        None => Ok(None),
        Some(YearInput::Number(year)) => Ok(Some(year)),
        Some(YearInput::Text(raw)) => {
            let raw = raw.trim();
            if raw.is_empty() {
                return Ok(None);
            }
            raw.parse()
                .map(Some)
                .map_err(|_| serde::de::Error::custom(format!("car_year '{raw}' is not a year")))
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("{0}")]
    InvalidRequest(String),
    #[error("dealer {0} not found")]
    NotFound(i64),
    #[error("failed to store review: {0}")]
    Internal(#[from] DbError),
}

impl IngestError {
    /// Error code used in the API error envelope.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            IngestError::InvalidRequest(_) => "invalid_request",
            IngestError::NotFound(_) => "not_found",
            IngestError::Internal(_) => "internal_error",
        }
    }
}

// ---------------------------------------------------------------------------
// Ingestion
// ---------------------------------------------------------------------------

/// A stored review's id together with the label it was stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmittedReview {
    pub id: i64,
    pub sentiment: SentimentLabel,
}

fn validate(request: &NewReviewRequest) -> Result<String, IngestError> {
    // Postgres TEXT cannot hold NUL.
    let text_fields = [
        ("name", Some(request.name.as_str())),
        ("review", Some(request.review.as_str())),
        ("car_make", request.car_make.as_deref()),
        ("car_model", request.car_model.as_deref()),
    ];
    if let Some((field, _)) = text_fields
        .iter()
        .find(|(_, value)| value.is_some_and(|v| v.contains('\0')))
    {
        return Err(IngestError::InvalidRequest(format!(
            "{field} must not contain NUL characters"
        )));
    }

    let name = request.name.trim();
    let name_chars = name.chars().count();
    if name_chars == 0 || name_chars > MAX_NAME_CHARS {
        return Err(IngestError::InvalidRequest(format!(
            "name must be 1-{MAX_NAME_CHARS} characters"
        )));
    }

    if let Some(year) = request.car_year {
        if !(MIN_CAR_YEAR..=MAX_CAR_YEAR).contains(&year) {
            return Err(IngestError::InvalidRequest(format!(
                "car_year must be between {MIN_CAR_YEAR} and {MAX_CAR_YEAR}, got {year}"
            )));
        }
    }

    Ok(name.to_owned())
}

/// Label the review through `client` and persist it through `store`.
///
/// # Errors
///
/// - [`IngestError::InvalidRequest`] when the name or car year is out of range,
///   or a text field contains a NUL character.
/// - [`IngestError::NotFound`] when the referenced dealer does not exist.
/// - [`IngestError::Internal`] when the store fails.
///
/// A failing sentiment service is never an error here.
pub async fn submit_review<S>(
    store: &S,
    client: &SentimentClient,
    request: NewReviewRequest,
) -> Result<SubmittedReview, IngestError>
where
    S: ReviewStore,
{
    let name = validate(&request)?;

    if store.get_dealer(request.dealership).await?.is_none() {
        return Err(IngestError::NotFound(request.dealership));
    }

    let sentiment = match client.analyze(&request.review).await {
        Ok(label) => label,
        Err(e) => {
            tracing::warn!(
                error = %e,
                dealer_id = request.dealership,
                "sentiment service failed; storing review as neutral"
            );
            SentimentLabel::Neutral
        }
    };

    let id = store
        .create_review(NewReview {
            dealer_id: request.dealership,
            name,
            review: request.review,
            purchase: request.purchase,
            purchase_date: request.purchase_date,
            car_make: request.car_make,
            car_model: request.car_model,
            car_year: request.car_year,
            sentiment,
        })
        .await?;

    tracing::info!(review_id = id, %sentiment, "review stored");
    Ok(SubmittedReview { id, sentiment })
}

#[cfg(test)]
#[path = "ingest_test.rs"]
mod tests;
