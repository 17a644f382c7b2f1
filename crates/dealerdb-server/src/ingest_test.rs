use std::sync::Mutex;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

#[derive(Default)]
struct MemoryStore {
    dealers: Vec<DealerRow>,
    reviews: Mutex<Vec<NewReview>>,
    fail_writes: bool,
}

impl MemoryStore {
    fn with_dealer(id: i64) -> Self {
        Self {
            dealers: vec![dealer(id)],
            ..Self::default()
        }
    }

    fn stored(&self) -> Vec<NewReview> {
        self.reviews.lock().expect("store lock").clone()
    }
}

impl ReviewStore for MemoryStore {
    async fn get_dealer(&self, dealer_id: i64) -> Result<Option<DealerRow>, DbError> {
        Ok(self.dealers.iter().find(|d| d.id == dealer_id).cloned())
    }

    async fn create_review(&self, review: NewReview) -> Result<i64, DbError> {
        if self.fail_writes {
            return Err(DbError::InvalidData("write refused".to_string()));
        }
        let mut reviews = self.reviews.lock().expect("store lock");
        reviews.push(review);
        Ok(i64::try_from(reviews.len()).expect("review count fits i64"))
    }

    async fn list_reviews_by_dealer(&self, _dealer_id: i64) -> Result<Vec<ReviewRow>, DbError> {
        Ok(Vec::new())
    }
}

fn dealer(id: i64) -> DealerRow {
    DealerRow {
        id,
        city: "Wichita".to_string(),
        state: "Kansas".to_string(),
        st: "KS".to_string(),
        address: "555 Douglas Ave".to_string(),
        zip: "67202".to_string(),
        lat: 37.6872,
        long: -97.3301,
        short_name: "Wichita Auto".to_string(),
        full_name: "Wichita Auto Sales".to_string(),
    }
}

fn request(dealership: i64, review: &str) -> NewReviewRequest {
    serde_json::from_value(json!({
        "name": "Jane Doe",
        "dealership": dealership,
        "review": review,
    }))
    .expect("valid request")
}

async fn service_answering(label: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyzereview"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "sentiment": label, "review": "x" })),
        )
        .mount(&server)
        .await;
    server
}

async fn unreachable_client() -> SentimentClient {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);
    SentimentClient::with_timeout(&uri, Duration::from_millis(500)).expect("client")
}

// ---------------------------------------------------------------------------
// Degrade-to-neutral
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unreachable_service_still_stores_review_as_neutral() {
    let store = MemoryStore::with_dealer(5);
    let client = unreachable_client().await;

    let submitted = submit_review(&store, &client, request(5, "Excellent!"))
        .await
        .expect("ingestion must not fail when the service is down");

    assert_eq!(submitted.sentiment, SentimentLabel::Neutral);
    let stored = store.stored();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].sentiment, SentimentLabel::Neutral);
    assert_eq!(stored[0].review, "Excellent!");
}

#[tokio::test]
async fn service_error_status_stores_neutral() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyzereview"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let store = MemoryStore::with_dealer(5);
    let client = SentimentClient::new(&server.uri()).expect("client");

    let submitted = submit_review(&store, &client, request(5, "Excellent!"))
        .await
        .expect("ingest");

    assert_eq!(submitted.sentiment, SentimentLabel::Neutral);
}

#[tokio::test]
async fn slow_service_stores_neutral_after_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyzereview"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "sentiment": "positive", "review": "x" }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;
    let store = MemoryStore::with_dealer(5);
    let client =
        SentimentClient::with_timeout(&server.uri(), Duration::from_millis(300)).expect("client");

    let submitted = submit_review(&store, &client, request(5, "Excellent!"))
        .await
        .expect("ingest");

    assert_eq!(submitted.sentiment, SentimentLabel::Neutral);
}

#[tokio::test]
async fn malformed_service_body_stores_neutral() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyzereview"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;
    let store = MemoryStore::with_dealer(5);
    let client = SentimentClient::new(&server.uri()).expect("client");

    let submitted = submit_review(&store, &client, request(5, "Excellent!"))
        .await
        .expect("ingest");

    assert_eq!(submitted.sentiment, SentimentLabel::Neutral);
}

// ---------------------------------------------------------------------------
// Happy path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn service_label_is_stored_with_review() {
    let server = service_answering("positive").await;
    let store = MemoryStore::with_dealer(5);
    let client = SentimentClient::new(&server.uri()).expect("client");

    let mut req = request(5, "Excellent and friendly staff");
    req.name = "  Jane Doe  ".to_string();
    req.car_year = Some(2023);

    let submitted = submit_review(&store, &client, req).await.expect("ingest");

    assert_eq!(submitted.id, 1);
    assert_eq!(submitted.sentiment, SentimentLabel::Positive);
    let stored = store.stored();
    assert_eq!(stored[0].dealer_id, 5);
    assert_eq!(stored[0].name, "Jane Doe");
    assert_eq!(stored[0].car_year, Some(2023));
    assert_eq!(stored[0].sentiment, SentimentLabel::Positive);
}

// ---------------------------------------------------------------------------
// Rejections
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_dealer_is_not_found_and_skips_service() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyzereview"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let store = MemoryStore::with_dealer(5);
    let client = SentimentClient::new(&server.uri()).expect("client");

    let err = submit_review(&store, &client, request(404, "Excellent!"))
        .await
        .expect_err("unknown dealer");

    assert!(matches!(err, IngestError::NotFound(404)));
    assert_eq!(err.code(), "not_found");
    assert!(store.stored().is_empty());
}

#[tokio::test]
async fn blank_name_is_invalid_request() {
    let store = MemoryStore::with_dealer(5);
    let client = unreachable_client().await;
    let mut req = request(5, "fine");
    req.name = "   ".to_string();

    let err = submit_review(&store, &client, req)
        .await
        .expect_err("blank name");

    assert!(matches!(err, IngestError::InvalidRequest(_)));
    assert_eq!(err.code(), "invalid_request");
}

#[tokio::test]
async fn name_limit_counts_characters_not_bytes() {
    let server = service_answering("neutral").await;
    let store = MemoryStore::with_dealer(5);
    let client = SentimentClient::new(&server.uri()).expect("client");

    let mut at_limit = request(5, "fine");
    at_limit.name = "é".repeat(MAX_NAME_CHARS);
    submit_review(&store, &client, at_limit)
        .await
        .expect("100 characters is allowed");

    let mut over_limit = request(5, "fine");
    over_limit.name = "a".repeat(MAX_NAME_CHARS + 1);
    let err = submit_review(&store, &client, over_limit)
        .await
        .expect_err("101 characters");
    assert!(matches!(err, IngestError::InvalidRequest(_)));
}

#[tokio::test]
async fn car_year_out_of_range_is_invalid_request() {
    let store = MemoryStore::with_dealer(5);
    let client = unreachable_client().await;
    let mut req = request(5, "fine");
    req.car_year = Some(1800);

    let err = submit_review(&store, &client, req)
        .await
        .expect_err("year too early");

    assert!(matches!(err, IngestError::InvalidRequest(msg) if msg.contains("1800")));
}

#[tokio::test]
async fn nul_in_review_is_invalid_request_and_skips_service() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyzereview"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let store = MemoryStore::with_dealer(5);
    let client = SentimentClient::new(&server.uri()).expect("client");

    let err = submit_review(&store, &client, request(5, "great\u{0}car"))
        .await
        .expect_err("NUL in review");

    assert!(matches!(err, IngestError::InvalidRequest(msg) if msg.starts_with("review")));
    assert!(store.stored().is_empty());
}

#[tokio::test]
async fn nul_in_optional_car_model_is_invalid_request() {
    let store = MemoryStore::with_dealer(5);
    let client = unreachable_client().await;
    let mut req = request(5, "fine");
    req.car_model = Some("Cam\u{0}ry".to_string());

    let err = submit_review(&store, &client, req)
        .await
        .expect_err("NUL in car model");

    assert!(matches!(err, IngestError::InvalidRequest(msg) if msg.starts_with("car_model")));
}

#[tokio::test]
async fn store_failure_is_internal_error() {
    let server = service_answering("negative").await;
    let store = MemoryStore {
        dealers: vec![dealer(5)],
        fail_writes: true,
        ..MemoryStore::default()
    };
    let client = SentimentClient::new(&server.uri()).expect("client");

    let err = submit_review(&store, &client, request(5, "Terrible"))
        .await
        .expect_err("store refused");

    assert!(matches!(err, IngestError::Internal(_)));
    assert_eq!(err.code(), "internal_error");
}

// ---------------------------------------------------------------------------
// Request parsing
// ---------------------------------------------------------------------------

#[test]
fn empty_optional_strings_read_as_absent() {
    let req: NewReviewRequest = serde_json::from_value(json!({
        "name": "Jane",
        "dealership": 1,
        "review": "ok",
        "purchase": true,
        "purchase_date": "",
        "car_make": "",
        "car_model": "  ",
        "car_year": "",
    }))
    .expect("parse");

    assert!(req.purchase);
    assert_eq!(req.purchase_date, None);
    assert_eq!(req.car_make, None);
    assert_eq!(req.car_model, None);
    assert_eq!(req.car_year, None);
}

#[test]
fn populated_optional_fields_parse() {
    let req: NewReviewRequest = serde_json::from_value(json!({
        "name": "Jane",
        "dealership": 1,
        "review": "ok",
        "purchase_date": "2024-02-29",
        "car_make": "Toyota",
        "car_model": "Camry",
        "car_year": "2023",
    }))
    .expect("parse");

    assert_eq!(req.purchase_date, NaiveDate::from_ymd_opt(2024, 2, 29));
    assert_eq!(req.car_make.as_deref(), Some("Toyota"));
    assert_eq!(req.car_model.as_deref(), Some("Camry"));
    assert_eq!(req.car_year, Some(2023));
}

#[test]
fn numeric_car_year_and_missing_optionals_parse() {
    let req: NewReviewRequest = serde_json::from_value(json!({
        "name": "Jane",
        "dealership": 1,
        "review": "ok",
        "car_year": 2021,
    }))
    .expect("parse");

    assert!(!req.purchase);
    assert_eq!(req.car_year, Some(2021));
    assert_eq!(req.purchase_date, None);
}

#[test]
fn bad_purchase_date_is_rejected() {
    let result: Result<NewReviewRequest, _> = serde_json::from_value(json!({
        "name": "Jane",
        "dealership": 1,
        "review": "ok",
        "purchase_date": "02/29/2024",
    }));

    assert!(result.is_err());
}
