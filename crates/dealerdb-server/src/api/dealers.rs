//! Dealer read handlers: list (optionally by state), detail, reviews.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use dealerdb_db::{DealerRow, ReviewRow};
use serde::{Deserialize, Serialize};

use crate::ingest::ReviewStore;
use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState};

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(super) struct DealersQuery {
    pub state: Option<String>,
}

/// Resolve the `state` filter. Absent, blank and `All` mean no filter;
/// anything else must be a two-letter abbreviation.
fn state_filter(req_id: &str, raw: Option<&str>) -> Result<Option<String>, ApiError> {
    let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    if value.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    if value.len() == 2 && value.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(Some(value.to_ascii_uppercase()))
    } else {
        Err(ApiError::new(
            req_id,
            "invalid_request",
            format!("state must be a two-letter abbreviation, got '{value}'"),
        ))
    }
}

// ---------------------------------------------------------------------------
// Response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(super) struct DealerItem {
    pub id: i64,
    pub city: String,
    pub state: String,
    pub st: String,
    pub address: String,
    pub zip: String,
    pub lat: f64,
    pub long: f64,
    pub short_name: String,
    pub full_name: String,
}

impl From<DealerRow> for DealerItem {
    fn from(row: DealerRow) -> Self {
        Self {
            id: row.id,
            city: row.city,
            state: row.state,
            st: row.st,
            address: row.address,
            zip: row.zip,
            lat: row.lat,
            long: row.long,
            short_name: row.short_name,
            full_name: row.full_name,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct ReviewItem {
    pub id: i64,
    pub dealership: i64,
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

impl From<ReviewRow> for ReviewItem {
    fn from(row: ReviewRow) -> Self {
        Self {
            id: row.id,
            dealership: row.dealer_id,
            name: row.name,
            review: row.review,
            purchase: row.purchase,
            purchase_date: row.purchase_date,
            car_make: row.car_make,
            car_model: row.car_model,
            car_year: row.car_year,
            sentiment: row.sentiment,
            created_at: row.created_at,
        }
    }
}

fn dealer_not_found(req_id: String, id: i64) -> ApiError {
    ApiError::new(req_id, "not_found", format!("dealer {id} not found"))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/dealers
pub(super) async fn list_dealers(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<DealersQuery>,
) -> Result<Json<ApiResponse<Vec<DealerItem>>>, ApiError> {
    let filter = state_filter(&req_id.0, params.state.as_deref())?;

    let rows = match filter {
        Some(st) => dealerdb_db::list_dealers_by_state(&state.pool, &st).await,
        None => dealerdb_db::list_dealers(&state.pool).await,
    }
    .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let data = rows.into_iter().map(DealerItem::from).collect();
    Ok(Json(ApiResponse::new(req_id.0, data)))
}

/// GET /api/v1/dealers/{id}
pub(super) async fn get_dealer(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<DealerItem>>, ApiError> {
    let row = state
        .pool
        .get_dealer(id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?
        .ok_or_else(|| dealer_not_found(req_id.0.clone(), id))?;

    Ok(Json(ApiResponse::new(req_id.0, DealerItem::from(row))))
}

/// GET /api/v1/dealers/{id}/reviews: newest first.
pub(super) async fn list_dealer_reviews(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<ReviewItem>>>, ApiError> {
    let dealer = state
        .pool
        .get_dealer(id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;
    if dealer.is_none() {
        return Err(dealer_not_found(req_id.0, id));
    }

    let rows = state
        .pool
        .list_reviews_by_dealer(id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let data = rows.into_iter().map(ReviewItem::from).collect();
    Ok(Json(ApiResponse::new(req_id.0, data)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_filter_treats_blank_and_all_as_unfiltered() {
        assert_eq!(state_filter("r", None).expect("none"), None);
        assert_eq!(state_filter("r", Some("  ")).expect("blank"), None);
        assert_eq!(state_filter("r", Some("All")).expect("all"), None);
    }

    #[test]
    fn state_filter_uppercases_abbreviation() {
        assert_eq!(
            state_filter("r", Some("ks")).expect("ks"),
            Some("KS".to_string())
        );
    }

    #[test]
    fn state_filter_rejects_full_state_names() {
        let err = state_filter("r", Some("Kansas")).expect_err("not an abbreviation");
        assert_eq!(err.error.code, "invalid_request");
    }
}
