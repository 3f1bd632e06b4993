//! Ingestor: locates the record array in a raw payload and normalises it.
//!
//! A payload is classified into one of four shapes, checked in order:
//!
//! 1. a bare array,
//! 2. an object whose `drugs` property is an array,
//! 3. an object whose `data` property is an array,
//! 4. anything else, which fails the run with [`Error::NoRecordArray`].
//!
//! Every element is normalised with its positional index and partitioned
//! into valid records and invalid-record diagnostics. Ingestion has no side
//! effects beyond logging; loading the valid set into the store is a
//! separate step.

use crate::error::{Error, Result};
use crate::normalizer::{iso_now, normalize};
use crate::types::DrugRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

// ---------------------------------------------------------------------------
// Payload classification
// ---------------------------------------------------------------------------

/// The recognised top-level shapes of a drug payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payload<'a> {
    /// `[ {...}, ... ]`
    Bare(&'a [Value]),
    /// `{ "drugs": [ ... ] }`
    Drugs(&'a [Value]),
    /// `{ "data": [ ... ] }`
    Data(&'a [Value]),
    /// No recognisable array.
    Unrecognized,
}

impl<'a> Payload<'a> {
    /// Classify a parsed JSON value.
    pub fn classify(value: &'a Value) -> Self {
        if let Value::Array(items) = value {
            return Payload::Bare(items);
        }
        if let Some(Value::Array(items)) = value.get("drugs") {
            return Payload::Drugs(items);
        }
        if let Some(Value::Array(items)) = value.get("data") {
            return Payload::Data(items);
        }
        Payload::Unrecognized
    }

    /// The located record array, or [`Error::NoRecordArray`].
    pub fn records(self) -> Result<&'a [Value]> {
        match self {
            Payload::Bare(items) | Payload::Drugs(items) | Payload::Data(items) => Ok(items),
            Payload::Unrecognized => Err(Error::NoRecordArray),
        }
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// A record that normalised to something missing a required field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvalidRecord {
    /// Zero-based position in the source array.
    pub index: usize,
    /// The raw element as it appeared in the payload.
    pub original: Value,
    /// What the normalizer made of it.
    pub normalized: DrugRecord,
}

/// Outcome of one ingestion run.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestReport {
    /// Number of elements in the located array.
    pub total: usize,
    /// Valid records, in source order.
    pub valid: Vec<DrugRecord>,
    /// Invalid records with diagnostics, in source order.
    pub invalid: Vec<InvalidRecord>,
}

/// Serializable summary of an [`IngestReport`], as returned over HTTP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestSummary {
    pub valid_count: usize,
    pub invalid_count: usize,
    pub invalid_diagnostics: Vec<InvalidRecord>,
}

impl IngestReport {
    pub fn valid_count(&self) -> usize {
        self.valid.len()
    }

    pub fn invalid_count(&self) -> usize {
        self.invalid.len()
    }

    pub fn summary(&self) -> IngestSummary {
        IngestSummary {
            valid_count: self.valid_count(),
            invalid_count: self.invalid_count(),
            invalid_diagnostics: self.invalid.clone(),
        }
    }

    /// Consume the report, keeping only the valid records.
    pub fn into_valid(self) -> Vec<DrugRecord> {
        self.valid
    }
}

// ---------------------------------------------------------------------------
// Ingestion entry points
// ---------------------------------------------------------------------------

/// Ingest an already-parsed payload.
pub fn ingest_value(payload: &Value) -> Result<IngestReport> {
    let shape = Payload::classify(payload);
    let items = shape.records()?;
    tracing::info!(records = items.len(), shape = shape_name(shape), "found drug records");

    let now = iso_now();
    let mut valid = Vec::with_capacity(items.len());
    let mut invalid = Vec::new();

    for (index, raw) in items.iter().enumerate() {
        let normalized = normalize(raw, index, &now);
        if normalized.is_valid() {
            valid.push(normalized);
        } else {
            tracing::warn!(
                index,
                missing = ?normalized.missing_fields(),
                original = %raw,
                "record missing required fields"
            );
            invalid.push(InvalidRecord { index, original: raw.clone(), normalized });
        }
    }

    tracing::info!(
        total = items.len(),
        valid = valid.len(),
        invalid = invalid.len(),
        "normalised drug records"
    );

    Ok(IngestReport { total: items.len(), valid, invalid })
}

/// Parse `bytes` as JSON and ingest the result.
pub fn ingest_slice(bytes: &[u8]) -> Result<IngestReport> {
    let payload: Value = serde_json::from_slice(bytes).map_err(Error::InvalidJson)?;
    ingest_value(&payload)
}

/// Read and ingest the JSON file at `path`.
pub fn ingest_path(path: &Path) -> Result<IngestReport> {
    tracing::info!(path = %path.display(), "reading drug data");
    let bytes = std::fs::read(path)?;
    ingest_slice(&bytes)
}

fn shape_name(shape: Payload<'_>) -> &'static str {
    match shape {
        Payload::Bare(_) => "array",
        Payload::Drugs(_) => "drugs",
        Payload::Data(_) => "data",
        Payload::Unrecognized => "unrecognized",
    }
}

// ---------------------------------------------------------------------------
// Sample data
// ---------------------------------------------------------------------------

/// Built-in records used to seed a fresh install when no data file exists.
pub fn sample_drugs() -> Vec<DrugRecord> {
    [
        ("0006-0568", "vorinostat", "ZOLINZA", "Merck Sharp & Dohme Corp.", "2004-02-14T23:01:10Z"),
        ("0006-1234", "imatinib", "GLEEVEC", "Novartis Pharmaceuticals Corporation", "2001-05-10T00:00:00Z"),
        ("0006-5678", "trastuzumab", "HERCEPTIN", "Genentech, Inc.", "1998-09-25T00:00:00Z"),
    ]
    .into_iter()
    .map(|(code, generic, brand, company, launch)| DrugRecord {
        code: code.to_string(),
        generic_name: generic.to_string(),
        brand_name: brand.to_string(),
        company: company.to_string(),
        launch_date: launch.to_string(),
    })
    .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
