//! HTTP API integration harness.
//!
//! Requests are driven through the axum router in-process with
//! `tower::ServiceExt::oneshot`; no socket is bound.
//!
//! # What this covers
//!
//! - **`GET /api/drugs`**: defaults, pagination, the company filter
//!   (including percent-encoded names) and lenient page/limit parsing.
//! - **`GET /api/companies`**: distinct and ascending.
//! - **`GET /api/table-config`**: the served layout, pinned by snapshot.
//! - **`GET /api/health`**: status and timestamp.
//! - **`POST /api/ingest`**: summary on success; `400` with an `error` body on
//!   malformed input, `413` with an `error` body above the body limit, leaving
//!   the table as it was in both cases.
//! - **Out-of-range numbers**: `page` is capped at `u32::MAX` and numbers
//!   beyond `i64` saturate instead of falling back to the default.
//!
//! # What this does NOT cover
//!
//! - Graceful shutdown on Ctrl-C
//! - Listener binding (see `client_harness`)
//!
//! # Running
//!
//! ```sh
//! cargo test --test api_harness
//! ```

mod common;
use common::*;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use druglist::server;
use druglist_core::{DrugPage, IngestSummary, Store, TableConfig};
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

fn app(store: Store) -> (Router, Arc<Store>) {
    let store = Arc::new(store);
    (server::router(Arc::clone(&store), server::DEFAULT_BODY_LIMIT), store)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post(app: Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

fn page(body: Value) -> DrugPage {
    serde_json::from_value(body).unwrap()
}

// ---------------------------------------------------------------------------
// GET /api/drugs
// ---------------------------------------------------------------------------

#[tokio::test]
async fn drugs_defaults_to_first_page_of_fifty() {
    let (app, _) = app(seeded_store(&fake_records(75, 3)));
    let (status, body) = get(app, "/api/drugs").await;

    assert_eq!(status, StatusCode::OK);
    let page = page(body);
    assert_eq!(page.data.len(), 50);
    assert_eq!(page.pagination.limit, 50);
    assert_pagination!(page, current = 1, pages = 2, total = 75);
    assert_launch_desc!(page.data);
}

#[tokio::test]
async fn drugs_envelope_uses_camel_case() {
    let (app, _) = app(seeded_store(&[record("c1", "Acme", "2020-02-02")]));
    let (_, body) = get(app, "/api/drugs").await;

    assert_eq!(body["data"][0]["launchDate"], "2020-02-02");
    assert_eq!(body["data"][0]["name"], "c1-generic (C1-BRAND)");
    assert_eq!(body["pagination"]["currentPage"], 1);
    assert_eq!(body["pagination"]["totalRecords"], 1);
    assert_eq!(body["pagination"]["hasNextPage"], false);
}

#[rstest]
#[case::second_page("/api/drugs?page=2&limit=10", 2, 10, 10)]
#[case::last_partial("/api/drugs?page=3&limit=10", 3, 10, 5)]
#[case::non_numeric_page("/api/drugs?page=abc&limit=10", 1, 10, 10)]
#[case::non_numeric_limit("/api/drugs?limit=lots", 1, 50, 25)]
#[case::numeric_prefix("/api/drugs?page=2nd&limit=10px", 2, 10, 10)]
#[case::zero_page("/api/drugs?page=0&limit=5", 1, 5, 5)]
#[case::limit_over_max("/api/drugs?limit=500", 1, 100, 25)]
#[case::limit_zero("/api/drugs?limit=0", 1, 1, 1)]
#[tokio::test]
async fn drugs_query_parameters(
    #[case] uri: &str,
    #[case] current: u32,
    #[case] limit: u32,
    #[case] rows: usize,
) {
    let (app, _) = app(seeded_store(&fake_records(25, 2)));
    let (status, body) = get(app, uri).await;

    assert_eq!(status, StatusCode::OK);
    let page = page(body);
    assert_eq!(page.pagination.current_page, current);
    assert_eq!(page.pagination.limit, limit);
    assert_eq!(page.data.len(), rows);
}

#[tokio::test]
async fn drugs_filters_by_percent_encoded_company() {
    let store = seeded_store(&[
        record("a", "Merck Sharp & Dohme Corp.", "2004-02-14"),
        record("b", "Genentech, Inc.", "1998-09-25"),
        record("c", "Merck Sharp & Dohme Corp.", "2010-01-01"),
    ]);
    let (app, _) = app(store);
    let (status, body) = get(app, "/api/drugs?company=Merck%20Sharp%20%26%20Dohme%20Corp.").await;

    assert_eq!(status, StatusCode::OK);
    let page = page(body);
    let codes: Vec<&str> = page.data.iter().map(|r| r.code.as_str()).collect();
    assert_eq!(codes, ["c", "a"]);
    assert_pagination!(page, current = 1, pages = 1, total = 2);
}

#[tokio::test]
async fn drugs_with_empty_company_is_unfiltered() {
    let (app, _) = app(seeded_store(&fake_records(12, 3)));
    let (_, body) = get(app, "/api/drugs?company=").await;
    assert_eq!(page(body).pagination.total_records, 12);
}

#[tokio::test]
async fn drugs_for_unknown_company_is_empty() {
    let (app, _) = app(seeded_store(&fake_records(12, 3)));
    let (status, body) = get(app, "/api/drugs?company=Nobody").await;

    assert_eq!(status, StatusCode::OK);
    let page = page(body);
    assert!(page.data.is_empty());
    assert_pagination!(page, current = 1, pages = 0, total = 0);
}

// ---------------------------------------------------------------------------
// GET /api/companies, /api/table-config, /api/health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn companies_are_distinct_and_sorted() {
    let store = seeded_store(&[
        record("a", "Globex", "2001-01-01"),
        record("b", "Acme", "2002-01-01"),
        record("c", "Globex", "2003-01-01"),
    ]);
    let (app, _) = app(store);
    let (status, body) = get(app, "/api/companies").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!(["Acme", "Globex"]));
}

#[tokio::test]
async fn companies_of_empty_store() {
    let (app, _) = app(Store::in_memory().unwrap());
    let (_, body) = get(app, "/api/companies").await;
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn table_config_snapshot() {
    let (app, _) = app(Store::in_memory().unwrap());
    let (status, body) = get(app, "/api/table-config").await;

    assert_eq!(status, StatusCode::OK);
    let config: TableConfig = serde_json::from_value(body).unwrap();
    assert_eq!(config, TableConfig::default());
    insta::assert_json_snapshot!("table_config", config);
}

#[tokio::test]
async fn health_reports_ok_with_timestamp() {
    let (app, _) = app(Store::in_memory().unwrap());
    let (status, body) = get(app, "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    let stamp = body["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(stamp).is_ok(), "bad timestamp {stamp}");
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (app, _) = app(Store::in_memory().unwrap());
    let (status, _) = get(app, "/api/nothing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// POST /api/ingest
// ---------------------------------------------------------------------------

#[tokio::test]
async fn ingest_replaces_table_and_returns_summary() {
    let (app, store) = app(seeded_store(&fake_records(9, 3)));
    let (status, body) = post(app.clone(), "/api/ingest", &wrapped("data", WITH_INVALID)).await;

    assert_eq!(status, StatusCode::OK);
    let summary: IngestSummary = serde_json::from_value(body).unwrap();
    assert_eq!(summary.valid_count, 2);
    assert_eq!(summary.invalid_count, 2);
    assert_eq!(store.count().unwrap(), 2);

    let (_, body) = get(app, "/api/companies").await;
    assert_eq!(body, serde_json::json!(["Celgene Corporation", "Incyte Corporation"]));
}

#[rstest]
#[case::not_json(NOT_JSON)]
#[case::no_record_array(NO_RECORD_ARRAY)]
#[tokio::test]
async fn ingest_rejects_malformed_payload(#[case] payload: &str) {
    let (app, store) = app(seeded_store(&fake_records(4, 1)));
    let (status, body) = post(app, "/api/ingest", payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("malformed input"), "{message}");
    assert_eq!(store.count().unwrap(), 4);
}

#[tokio::test]
async fn oversized_ingest_is_rejected_with_json_error() {
    let store = Arc::new(seeded_store(&fake_records(4, 1)));
    let app = server::router(Arc::clone(&store), 64);
    let (status, body) = post(app, "/api/ingest", &wrapped("drugs", BARE_ARRAY)).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(body["error"].is_string(), "expected a JSON error body, got {body}");
    assert_eq!(store.count().unwrap(), 4);
}

#[tokio::test]
async fn ingest_within_configured_limit_is_accepted() {
    let store = Arc::new(seeded_store(&fake_records(4, 1)));
    let app = server::router(Arc::clone(&store), 64 * 1024);
    let (status, _) = post(app, "/api/ingest", BARE_ARRAY).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(store.count().unwrap(), 3);
}

// ---------------------------------------------------------------------------
// Out-of-range numbers
// ---------------------------------------------------------------------------

#[rstest]
#[case::beyond_u32("/api/drugs?page=5000000000")]
#[case::beyond_i64("/api/drugs?page=99999999999999999999")]
#[tokio::test]
async fn huge_page_is_capped_at_u32_max(#[case] uri: &str) {
    let (app, _) = app(seeded_store(&fake_records(5, 1)));
    let (status, body) = get(app, uri).await;

    assert_eq!(status, StatusCode::OK);
    let page = page(body);
    assert_eq!(page.pagination.current_page, u32::MAX);
    assert!(page.data.is_empty());
    assert!(!page.pagination.has_next_page);
}

#[tokio::test]
async fn overflowing_limit_saturates_to_max() {
    let (app, _) = app(seeded_store(&fake_records(120, 2)));
    let (_, body) = get(app, "/api/drugs?limit=99999999999999999999").await;
    assert_eq!(page(body).pagination.limit, 100);
}
