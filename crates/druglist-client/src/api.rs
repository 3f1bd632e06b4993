//! [`ApiClient`]: hyper-util client for the druglist REST API.

use crate::{ClientError, DrugSource};
use bytes::Bytes;
use druglist_core::{DrugPage, DrugQuery, Health, IngestSummary, TableConfig};
use http::header::{ACCEPT, CONTENT_TYPE};
use http::Method;
use http_body_util::{BodyExt, Full};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Per-request timeout unless overridden with [`ApiClient::with_timeout`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for a running druglist API server.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client<HttpConnector, Full<Bytes>>,
    timeout: Duration,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client for the API at `base_url` (e.g. `http://127.0.0.1:5000`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if let Err(source) = base_url.parse::<http::Uri>() {
            return Err(ClientError::InvalidUri { url: base_url, source });
        }

        let http = Client::builder(TokioExecutor::new()).build_http();
        Ok(Self { base_url, http, timeout: DEFAULT_TIMEOUT })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /api/ingest`: replace the server's table with `payload`.
    pub async fn ingest(&self, payload: &serde_json::Value) -> Result<IngestSummary, ClientError> {
        self.call(Method::POST, "/api/ingest", Bytes::from(payload.to_string()))
            .await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.call(Method::GET, path, Bytes::new()).await
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Bytes,
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let uri: http::Uri = url
            .parse()
            .map_err(|source| ClientError::InvalidUri { url: url.clone(), source })?;

        let mut builder = http::Request::builder()
            .method(method)
            .uri(uri)
            .header(ACCEPT, "application/json");
        if !body.is_empty() {
            builder = builder.header(CONTENT_TYPE, "application/json");
        }
        let request = builder.body(Full::new(body))?;

        tracing::debug!(%url, "api request");
        let response = tokio::time::timeout(self.timeout, self.http.request(request))
            .await
            .map_err(|_| ClientError::Timeout { url: url.clone(), timeout: self.timeout })??;

        let status = response.status();
        let bytes = response.into_body().collect().await?.to_bytes();

        if !status.is_success() {
            return Err(ClientError::Status {
                url,
                status,
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        serde_json::from_slice(&bytes).map_err(|source| ClientError::Decode { url, source })
    }
}

impl DrugSource for ApiClient {
    async fn table_config(&self) -> Result<TableConfig, ClientError> {
        self.get("/api/table-config").await
    }

    async fn companies(&self) -> Result<Vec<String>, ClientError> {
        self.get("/api/companies").await
    }

    async fn drugs(&self, query: &DrugQuery) -> Result<DrugPage, ClientError> {
        self.get(&drugs_path(query)).await
    }

    async fn health(&self) -> Result<Health, ClientError> {
        self.get("/api/health").await
    }
}

/// Path and query string for a drug listing request. An empty company
/// filter is left out.
pub fn drugs_path(query: &DrugQuery) -> String {
    let mut params = url::form_urlencoded::Serializer::new(String::new());
    if let Some(company) = query.company_filter() {
        params.append_pair("company", company);
    }
    if let Some(page) = query.page {
        params.append_pair("page", &page.to_string());
    }
    if let Some(limit) = query.limit {
        params.append_pair("limit", &limit.to_string());
    }

    let params = params.finish();
    if params.is_empty() {
        "/api/drugs".to_string()
    } else {
        format!("/api/drugs?{params}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn drugs_path_encodes_company() {
        let q = DrugQuery::new().company("Merck Sharp & Dohme Corp.").page(2).limit(25);
        assert_eq!(
            drugs_path(&q),
            "/api/drugs?company=Merck+Sharp+%26+Dohme+Corp.&page=2&limit=25"
        );
    }

    #[test]
    fn drugs_path_without_params() {
        assert_eq!(drugs_path(&DrugQuery::new()), "/api/drugs");
        assert_eq!(drugs_path(&DrugQuery::new().company("")), "/api/drugs");
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://127.0.0.1:5000/").unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:5000");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(
            ApiClient::new("http://exa mple.com"),
            Err(ClientError::InvalidUri { .. })
        ));
    }

    #[tokio::test]
    async fn closed_port_is_unreachable() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ApiClient::new(format!("http://{addr}")).unwrap();
        let err = client.health().await.unwrap_err();
        assert!(err.is_unreachable(), "unexpected error: {err}");
    }
}
