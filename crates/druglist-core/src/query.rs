//! Query service: turns listing requests into store calls and shapes the
//! paginated response.
//!
//! Request parameters are lenient: a missing or out-of-range `page` becomes
//! 1, a missing `limit` becomes [`DEFAULT_LIMIT`], and any `limit` is clamped
//! to `1..=100`. An empty company string means "no filter".

use crate::error::Result;
use crate::ingestor::{self, IngestSummary};
use crate::store::{Store, MAX_PAGE_SIZE};
use crate::types::{DrugPage, DrugRow, Pagination};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Page size used when a request does not name one.
pub const DEFAULT_LIMIT: u32 = 50;

/// A drug listing request, as received from the HTTP layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrugQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

impl DrugQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn page(mut self, page: i64) -> Self {
        self.page = Some(page);
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// The company filter, with an empty string treated as absent.
    pub fn company_filter(&self) -> Option<&str> {
        self.company.as_deref().filter(|c| !c.is_empty())
    }

    /// Requested page, at least 1. Pages past `u32::MAX` are capped there;
    /// such a page is always empty.
    pub fn effective_page(&self) -> u32 {
        self.page
            .map(|p| u32::try_from(p.max(1)).unwrap_or(u32::MAX))
            .unwrap_or(1)
    }

    /// Requested page size, clamped to `1..=100`.
    pub fn effective_limit(&self) -> u32 {
        self.limit
            .map(|l| l.clamp(1, i64::from(MAX_PAGE_SIZE)) as u32)
            .unwrap_or(DEFAULT_LIMIT)
    }
}

/// Run `query` against `store` and build the response envelope.
pub fn query_drugs(store: &Store, query: &DrugQuery) -> Result<DrugPage> {
    let page = query.effective_page();
    let limit = query.effective_limit();
    let (rows, total) = store.query(query.company_filter(), page, limit)?;

    Ok(DrugPage {
        data: rows.into_iter().map(DrugRow::from).collect(),
        pagination: Pagination::new(page, limit, total),
    })
}

/// Distinct companies in ascending order.
pub fn companies(store: &Store) -> Result<Vec<String>> {
    store.list_companies()
}

/// Ingest `payload` and, when it is well-formed, replace the table with the
/// valid records. A malformed payload leaves the table untouched.
pub fn ingest_and_load(store: &Store, payload: &Value) -> Result<IngestSummary> {
    let report = ingestor::ingest_value(payload)?;
    let summary = report.summary();
    store.replace_all(&report.into_valid())?;
    Ok(summary)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
