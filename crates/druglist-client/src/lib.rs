//! druglist-client: HTTP client for the druglist API.
//!
//! [`ApiClient`] talks to a running `druglist serve` over plain HTTP/1.1.
//! The [`DrugSource`] trait abstracts the read operations so the terminal
//! browser can be driven by a fake in tests.

pub mod api;
pub mod error;

pub use api::ApiClient;
pub use error::ClientError;

use druglist_core::{DrugPage, DrugQuery, Health, TableConfig};
use std::future::Future;

/// Read-side operations the presentation layer needs.
pub trait DrugSource {
    /// `GET /api/table-config`
    fn table_config(&self) -> impl Future<Output = Result<TableConfig, ClientError>>;
    /// `GET /api/companies`
    fn companies(&self) -> impl Future<Output = Result<Vec<String>, ClientError>>;
    /// `GET /api/drugs`
    fn drugs(&self, query: &DrugQuery) -> impl Future<Output = Result<DrugPage, ClientError>>;
    /// `GET /api/health`
    fn health(&self) -> impl Future<Output = Result<Health, ClientError>>;
}
