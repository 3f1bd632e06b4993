//! druglist: drug reference listing.
//!
//! Ingests heterogeneous JSON drug records into a canonical SQLite table and
//! serves a paginated, company-filterable listing over HTTP. This crate holds
//! the HTTP layer and the batch commands so that integration tests can import
//! them directly; the pipeline itself lives in `druglist-core`.
//!
//! # Architecture
//!
//! ```text
//! raw JSON ──► Ingestor ──► Store ──► Query ──► server (axum) ──► client ──► TUI
//! ```

pub mod commands;
pub mod server;

pub use druglist_core::{DrugPage, DrugQuery, DrugRecord, DrugRow, Pagination, Store};
