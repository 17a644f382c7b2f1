//! Review write handlers: ingestion and analyze-only classification.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Extension, Json,
};
use dealerdb_core::SentimentLabel;
use dealerdb_sentiment::{AnalyzeResponse, ClassifyError};
use serde::{Deserialize, Serialize};

use crate::ingest::{self, IngestError, NewReviewRequest};
use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState};

// ---------------------------------------------------------------------------
// Bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(super) struct AnalyzeRequest {
    #[serde(default)]
    pub review: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct CreatedReview {
    pub id: i64,
    pub sentiment: SentimentLabel,
}

fn rejection_error(req_id: &str, rejection: &JsonRejection) -> ApiError {
    ApiError::new(req_id, "invalid_request", rejection.body_text())
}

fn map_ingest_error(req_id: String, error: IngestError) -> ApiError {
    match &error {
        IngestError::InvalidRequest(_) | IngestError::NotFound(_) => {
            ApiError::new(req_id, error.code(), error.to_string())
        }
        IngestError::Internal(e) => super::map_db_error(req_id, e),
    }
}

fn map_classify_error(req_id: String, error: &ClassifyError) -> ApiError {
    if error.is_unavailable() {
        tracing::warn!(error = %error, "analyze-only request: sentiment service unavailable");
        return ApiError::new(req_id, "unavailable", "sentiment service unavailable");
    }
    match error {
        ClassifyError::InvalidRequest => ApiError::new(req_id, "invalid_request", error.to_string()),
        _ => {
            tracing::error!(error = %error, "analyze-only request failed");
            ApiError::new(req_id, "internal_error", "sentiment analysis failed")
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/reviews: label and store a review.
pub(super) async fn add_review(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<NewReviewRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedReview>>), ApiError> {
    let Json(body) = payload.map_err(|e| rejection_error(&req_id.0, &e))?;

    let submitted = ingest::submit_review(&state.pool, &state.sentiment, body)
        .await
        .map_err(|e| map_ingest_error(req_id.0.clone(), e))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(
            req_id.0,
            CreatedReview {
                id: submitted.id,
                sentiment: submitted.sentiment,
            },
        )),
    ))
}

/// POST /api/v1/analyzereview: classify without storing. Service failures
/// surface as 503 here; nothing falls back to neutral.
pub(super) async fn analyze_review(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<AnalyzeResponse>>, ApiError> {
    let Json(body) = payload.map_err(|e| rejection_error(&req_id.0, &e))?;

    let sentiment = state
        .sentiment
        .analyze_required(body.review.as_deref())
        .await
        .map_err(|e| map_classify_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse::new(
        req_id.0,
        AnalyzeResponse {
            sentiment,
            review: body.review,
        },
    )))
}
