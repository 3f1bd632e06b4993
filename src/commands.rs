//! Batch flows behind the `ingest` and `convert` subcommands.
//!
//! `ingest` loads a drug data file into the store, replacing every existing
//! row. When the file does not exist it can seed the store with the built-in
//! sample records instead. `convert` only normalises: it writes the valid
//! records of its input as canonical JSON and leaves the store alone.

use anyhow::{bail, Context};
use druglist_core::{
    ingestor::{self, sample_drugs},
    DrugRecord, IngestReport, Store,
};
use std::path::{Path, PathBuf};

/// Number of rows echoed back after a load or conversion.
const SAMPLE_ROWS: usize = 3;

/// Where the records of an ingest run came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestSource {
    File(PathBuf),
    /// The data file was missing; the built-in samples were used.
    Sample,
}

/// Result of [`run_ingest`].
#[derive(Debug)]
pub struct IngestRun {
    pub source: IngestSource,
    /// Records handed to the store (or that would have been, on a dry run).
    pub records: Vec<DrugRecord>,
    /// Ingestion diagnostics; `None` for sample data.
    pub report: Option<IngestReport>,
    /// Rows in the store afterwards; `None` on a dry run.
    pub stored: Option<u64>,
}

/// Read the records for an ingest run from `path`, falling back to the
/// sample records when the file is missing and `seed_sample` is set.
///
/// A file that exists but is malformed is always an error.
pub fn collect_records(path: &Path, seed_sample: bool) -> anyhow::Result<(IngestSource, Vec<DrugRecord>, Option<IngestReport>)> {
    if !path.exists() {
        if !seed_sample {
            bail!("drug data file {} not found", path.display());
        }
        tracing::info!(path = %path.display(), "no drug data file found, using sample data");
        return Ok((IngestSource::Sample, sample_drugs(), None));
    }

    let report = ingestor::ingest_path(path)
        .with_context(|| format!("failed to ingest {}", path.display()))?;
    let records = report.valid.clone();
    Ok((IngestSource::File(path.to_path_buf()), records, Some(report)))
}

/// Ingest `path` and replace the store's contents with the valid records.
/// With `dry_run` the store is not touched.
pub fn run_ingest(store: &Store, path: &Path, seed_sample: bool, dry_run: bool) -> anyhow::Result<IngestRun> {
    let (source, records, report) = collect_records(path, seed_sample)?;
    tracing::info!(records = records.len(), "validated drug records");

    if dry_run {
        tracing::info!("dry run: store left untouched");
        return Ok(IngestRun { source, records, report, stored: None });
    }

    store
        .replace_all(&records)
        .context("failed to load drug records into the store")?;
    let stored = store.count().context("failed to count stored drug records")?;
    tracing::info!(rows = stored, "successfully inserted drug records");

    let (sample, _) = store.query(None, 1, SAMPLE_ROWS as u32)?;
    for drug in &sample {
        tracing::info!("- {} - {}", drug.record.display_name(), drug.record.company);
    }

    Ok(IngestRun { source, records, report, stored: Some(stored) })
}

/// Normalise `input` and write its valid records to `output` as pretty JSON.
pub fn run_convert(input: &Path, output: &Path) -> anyhow::Result<IngestReport> {
    let report = ingestor::ingest_path(input)
        .with_context(|| format!("failed to convert {}", input.display()))?;

    let json = serde_json::to_string_pretty(&report.valid)?;
    std::fs::write(output, json).with_context(|| format!("failed to write {}", output.display()))?;
    tracing::info!(
        valid = report.valid_count(),
        output = %output.display(),
        "converted data written"
    );

    for (n, drug) in report.valid.iter().take(SAMPLE_ROWS).enumerate() {
        tracing::info!("{}. {} - {}", n + 1, drug.display_name(), drug.company);
    }

    Ok(report)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
