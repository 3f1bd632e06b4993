//! HTTP API: axum routes over the drug [`Store`].
//!
//! | Route | Handler |
//! |-------|---------|
//! | `GET /api/table-config` | column layout and paging defaults |
//! | `GET /api/companies` | distinct companies, ascending |
//! | `GET /api/drugs?company=&page=&limit=` | one page of the listing |
//! | `GET /api/health` | liveness probe |
//! | `POST /api/ingest` | replace the table from a raw JSON payload |
//!
//! Store calls run on the blocking pool; the store's own mutex serialises
//! them. Request bodies are capped by [`DEFAULT_BODY_LIMIT`] unless the caller
//! passes another limit; an oversized ingest is answered with `413` and the
//! usual `{ "error": ... }` body.

use anyhow::Context;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use druglist_core::{query, DrugPage, DrugQuery, Health, IngestSummary, Store, TableConfig};
use serde::Deserialize;
use std::sync::Arc;
use tokio::net::TcpListener;

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Largest request body accepted when the configuration does not say
/// otherwise (50 MiB).
pub const DEFAULT_BODY_LIMIT: usize = 50 * 1024 * 1024;

/// Build the API router over `store`, accepting bodies up to `body_limit`
/// bytes.
pub fn router(store: Arc<Store>, body_limit: usize) -> Router {
    Router::new()
        .route("/api/table-config", get(table_config))
        .route("/api/companies", get(companies))
        .route("/api/drugs", get(drugs))
        .route("/api/health", get(health))
        .route("/api/ingest", post(ingest))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(store)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(store: Arc<Store>, addr: &str, body_limit: usize) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(addr = %listener.local_addr()?, "server is running");

    axum::serve(listener, router(store, body_limit))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl-C");
        return;
    }
    tracing::info!("shutdown requested");
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn table_config() -> Json<TableConfig> {
    Json(TableConfig::default())
}

async fn companies(State(store): State<Arc<Store>>) -> Result<Json<Vec<String>>, ApiError> {
    blocking(&store, query::companies).await.map(Json)
}

/// Raw query string of `/api/drugs`. Numbers are parsed leniently: text that
/// does not start with an integer falls back to the default.
#[derive(Debug, Default, Deserialize)]
struct DrugsParams {
    company: Option<String>,
    page: Option<String>,
    limit: Option<String>,
}

impl From<DrugsParams> for DrugQuery {
    fn from(params: DrugsParams) -> Self {
        DrugQuery {
            company: params.company,
            page: params.page.as_deref().and_then(parse_leading_int),
            limit: params.limit.as_deref().and_then(parse_leading_int),
        }
    }
}

async fn drugs(
    State(store): State<Arc<Store>>,
    Query(params): Query<DrugsParams>,
) -> Result<Json<DrugPage>, ApiError> {
    let request = DrugQuery::from(params);
    tracing::debug!(?request, "drug listing request");
    blocking(&store, move |store| query::query_drugs(store, &request))
        .await
        .map(Json)
}

async fn health() -> Json<Health> {
    Json(Health::ok())
}

async fn ingest(
    State(store): State<Arc<Store>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<IngestSummary>, ApiError> {
    let body = body.map_err(ApiError::Body)?;
    let payload: serde_json::Value =
        serde_json::from_slice(&body).map_err(|e| ApiError::Core(druglist_core::Error::InvalidJson(e)))?;
    let summary = blocking(&store, move |store| query::ingest_and_load(store, &payload)).await?;
    tracing::info!(
        valid = summary.valid_count,
        invalid = summary.invalid_count,
        "ingested drug payload over HTTP"
    );
    Ok(Json(summary))
}

/// Run `f` against the store on the blocking pool.
async fn blocking<T, F>(store: &Arc<Store>, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&Store) -> druglist_core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let store = Arc::clone(store);
    tokio::task::spawn_blocking(move || f(&store))
        .await
        .map_err(ApiError::Join)?
        .map_err(ApiError::Core)
}

/// Integer prefix of `s`: optional sign, then digits. Trailing text is ignored.
/// Values outside `i64` saturate.
fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let negative = s.starts_with('-');
    let sign_len = usize::from(s.starts_with(['-', '+']));
    let digits = s[sign_len..].chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    match s[..sign_len + digits].parse() {
        Ok(n) => Some(n),
        Err(_) if negative => Some(i64::MIN),
        Err(_) => Some(i64::MAX),
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Handler failure rendered as `{ "error": "..." }`.
#[derive(Debug)]
pub enum ApiError {
    Core(druglist_core::Error),
    /// The request body could not be read (too large, aborted).
    Body(BytesRejection),
    Join(tokio::task::JoinError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Core(e) if e.is_malformed_input() => (StatusCode::BAD_REQUEST, e.to_string()),
            ApiError::Core(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            ApiError::Body(e) => (e.status(), e.body_text()),
            ApiError::Join(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("handler task failed: {e}")),
        };
        if status.is_server_error() {
            tracing::error!(error = %message, "request failed");
        } else {
            tracing::warn!(error = %message, "rejected request");
        }
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
