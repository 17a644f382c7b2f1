//! Database operations for the `dealer_reviews` table.
//!
//! There is deliberately no update query: a review's sentiment is written
//! once by [`insert_review`] and a trigger rejects later changes.

use chrono::{DateTime, NaiveDate, Utc};
use dealerdb_core::SentimentLabel;
use sqlx::PgPool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `dealer_reviews` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReviewRow {
    pub id: i64,
    pub dealer_id: i64,
    pub name: String,
    pub review: String,
    pub purchase: bool,
    pub purchase_date: Option<NaiveDate>,
    pub car_make: Option<String>,
    pub car_model: Option<String>,
    pub car_year: Option<i32>,
    pub sentiment: String,
    pub created_at: DateTime<Utc>,
}

impl ReviewRow {
    /// Parse the stored `sentiment` column.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::InvalidData`] if the column holds an unknown label.
    pub fn sentiment_label(&self) -> Result<SentimentLabel, DbError> {
        self.sentiment
            .parse()
            .map_err(|e: dealerdb_core::ParseLabelError| DbError::InvalidData(e.to_string()))
    }
}

/// Fields for a new review, with its sentiment already resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub dealer_id: i64,
    pub name: String,
    pub review: String,
    pub purchase: bool,
    pub purchase_date: Option<NaiveDate>,
    pub car_make: Option<String>,
    pub car_model: Option<String>,
    pub car_year: Option<i32>,
    pub sentiment: SentimentLabel,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Insert a review and return its generated id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails (including a foreign-key
/// violation when `dealer_id` does not exist).
pub async fn insert_review(pool: &PgPool, review: &NewReview) -> Result<i64, DbError> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO dealer_reviews \
             (dealer_id, name, review, purchase, purchase_date, car_make, car_model, car_year, sentiment) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
         RETURNING id",
    )
    .bind(review.dealer_id)
    .bind(&review.name)
    .bind(&review.review)
    .bind(review.purchase)
    .bind(review.purchase_date)
    .bind(&review.car_make)
    .bind(&review.car_model)
    .bind(review.car_year)
    .bind(review.sentiment.as_str())
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// List a dealer's reviews, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_reviews_by_dealer(
    pool: &PgPool,
    dealer_id: i64,
) -> Result<Vec<ReviewRow>, DbError> {
    let rows = sqlx::query_as::<_, ReviewRow>(
        "SELECT id, dealer_id, name, review, purchase, purchase_date, car_make, car_model, \
                car_year, sentiment, created_at \
         FROM dealer_reviews \
         WHERE dealer_id = $1 \
         ORDER BY created_at DESC, id DESC",
    )
    .bind(dealer_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
