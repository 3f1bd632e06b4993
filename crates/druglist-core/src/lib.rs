//! druglist-core: drug reference listing core library.
//!
//! This crate exposes the pipeline layers as public modules, plus the shared
//! types used across all layers.
//!
//! # Architecture
//!
//! ```text
//! raw JSON ──► Ingestor ──► Normalizer (per record) ──► Store ──► Query ──► API / UI
//!                 │
//!                 └──► IngestReport (invalid-record diagnostics)
//! ```
//!
//! Normalizer and ingestor are pure, synchronous transformations. The store
//! owns the only SQLite connection and is passed around explicitly.

pub mod config;
pub mod error;
pub mod ingestor;
pub mod normalizer;
pub mod query;
pub mod store;
pub mod table;
pub mod types;

pub use error::{Error, Result};
pub use ingestor::{IngestReport, IngestSummary, InvalidRecord};
pub use query::DrugQuery;
pub use store::Store;
pub use table::TableConfig;
pub use types::{DrugPage, DrugRecord, DrugRow, Health, Pagination, StoredDrug};
