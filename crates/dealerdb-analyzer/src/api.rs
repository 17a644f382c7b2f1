//! HTTP surface of the sentiment analyzer.
//!
//! Bodies are bare JSON objects (no envelope) because other services consume
//! `/analyzereview` directly.

use std::any::Any;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use dealerdb_sentiment::{AnalyzeResponse, Classifier};
use serde::{Deserialize, Deserializer, Serialize};
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

pub(crate) const SERVICE_NAME: &str = "sentiment-analyzer";
const SERVICE_TITLE: &str = "Sentiment Analysis Microservice";
const SERVICE_VERSION: &str = "1.0.0";
const MISSING_REVIEW: &str = "Review text is required";

#[derive(Clone, Default)]
pub struct AppState {
    pub classifier: Classifier,
}

// ---------------------------------------------------------------------------
// Request / response bodies
// ---------------------------------------------------------------------------

// Outer None = key missing (rejected), Some(None) = explicit null (neutral).
#[allow(clippy::option_option)]
#[derive(Debug, Deserialize)]
pub(crate) struct AnalyzeBody {
    #[serde(default, deserialize_with = "present")]
    review: Option<Option<String>>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize)]
pub(crate) struct ErrorBody {
    error: String,
}

impl ErrorBody {
    fn response(status: StatusCode, message: impl Into<String>) -> Response {
        (
            status,
            Json(Self {
                error: message.into(),
            }),
        )
            .into_response()
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    service: &'static str,
}

#[derive(Debug, Serialize)]
struct Endpoints {
    #[serde(rename = "/analyzereview")]
    analyze: &'static str,
    #[serde(rename = "/health")]
    health: &'static str,
}

#[derive(Debug, Serialize)]
struct ServiceInfo {
    service: &'static str,
    version: &'static str,
    endpoints: Endpoints,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health))
        .route("/analyzereview", post(analyze_review))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(panic_response))
                .layer(build_cors()),
        )
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /analyzereview: classify one review's text.
async fn analyze_review(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeBody>, JsonRejection>,
) -> Response {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "rejected analyze request body");
            // Body problems (syntax or shape) are all 400; a wrong media type keeps 415.
            let status = match &rejection {
                JsonRejection::MissingJsonContentType(_) => rejection.status(),
                _ => StatusCode::BAD_REQUEST,
            };
            return ErrorBody::response(status, rejection.body_text());
        }
    };

    let Some(review) = body.review else {
        return ErrorBody::response(StatusCode::BAD_REQUEST, MISSING_REVIEW);
    };

    let sentiment = state.classifier.classify_optional(review.as_deref());
    tracing::debug!(%sentiment, "classified review");

    (StatusCode::OK, Json(AnalyzeResponse { sentiment, review })).into_response()
}

/// GET /health: static liveness check.
async fn health() -> impl IntoResponse {
    Json(HealthData {
        status: "healthy",
        service: SERVICE_NAME,
    })
}

/// GET /: describes the service and its endpoints.
async fn service_info() -> impl IntoResponse {
    Json(ServiceInfo {
        service: SERVICE_TITLE,
        version: SERVICE_VERSION,
        endpoints: Endpoints {
            analyze: "POST - Analyze sentiment of review text",
            health: "GET - Health check",
        },
    })
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "internal error".to_string()
    };
    tracing::error!(error = %message, "analyzer handler panicked");
    ErrorBody::response(StatusCode::INTERNAL_SERVER_ERROR, message)
}
