//! Core types for druglist-core.
//!
//! This module defines the data structures shared across all layers: the
//! canonical [`DrugRecord`], its persisted form [`StoredDrug`], the display
//! [`DrugRow`], and the paginated response envelope [`DrugPage`].

use serde::{Deserialize, Serialize};

/// A drug entry normalised into the fixed five-field schema.
///
/// Produced by the normalizer, persisted by the store and read back
/// unmodified. Keys serialise in camelCase (`genericName`, `launchDate`, …).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrugRecord {
    /// Identifier from the source, or `DRUG-<n>` when the source has none.
    pub code: String,
    pub generic_name: String,
    pub brand_name: String,
    /// Manufacturer; the group/filter key.
    pub company: String,
    /// ISO-8601 timestamp. Defaults to the ingestion time when absent.
    pub launch_date: String,
}

impl DrugRecord {
    /// `true` when generic name, brand name and company are all non-empty.
    pub fn is_valid(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Names of the required fields that are empty, in schema order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.generic_name.is_empty() {
            missing.push("genericName");
        }
        if self.brand_name.is_empty() {
            missing.push("brandName");
        }
        if self.company.is_empty() {
            missing.push("company");
        }
        missing
    }

    /// Display name, `"{genericName} ({brandName})"`.
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.generic_name, self.brand_name)
    }
}

/// A [`DrugRecord`] together with the id the store assigned on insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDrug {
    pub id: i64,
    #[serde(flatten)]
    pub record: DrugRecord,
}

/// One row of the drug listing as served by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrugRow {
    pub id: i64,
    pub code: String,
    /// `"{genericName} ({brandName})"`.
    pub name: String,
    pub company: String,
    pub launch_date: String,
}

impl From<StoredDrug> for DrugRow {
    fn from(drug: StoredDrug) -> Self {
        let name = drug.record.display_name();
        let DrugRecord { code, company, launch_date, .. } = drug.record;
        Self { id: drug.id, code, name, company, launch_date }
    }
}

/// Pagination metadata attached to every [`DrugPage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_records: u64,
    pub limit: u32,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl Pagination {
    /// Derive the metadata for `current_page` of a result set of
    /// `total_records` rows split into pages of `limit`.
    ///
    /// `limit` must be at least 1; zero records yield zero pages.
    pub fn new(current_page: u32, limit: u32, total_records: u64) -> Self {
        let limit = limit.max(1);
        let total_pages = total_records.div_ceil(u64::from(limit));
        let total_pages = u32::try_from(total_pages).unwrap_or(u32::MAX);
        Self {
            current_page,
            total_pages,
            total_records,
            limit,
            has_next_page: current_page < total_pages,
            has_prev_page: current_page > 1,
        }
    }

    /// 1-based index of the first record on this page, or 0 when the page is
    /// empty.
    pub fn first_record(&self) -> u64 {
        let offset = u64::from(self.current_page.saturating_sub(1)) * u64::from(self.limit);
        if offset >= self.total_records {
            0
        } else {
            offset + 1
        }
    }

    /// 1-based index of the last record on this page, or 0 when the page is
    /// empty.
    pub fn last_record(&self) -> u64 {
        let end = u64::from(self.current_page) * u64::from(self.limit);
        if self.first_record() == 0 {
            0
        } else {
            end.min(self.total_records)
        }
    }
}

/// A page of the drug listing: `{ data: [...], pagination: {...} }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrugPage {
    pub data: Vec<DrugRow>,
    pub pagination: Pagination,
}

/// Health probe body, `{ "status": "OK", "timestamp": "<ISO-8601>" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub timestamp: String,
}

impl Health {
    /// A healthy probe stamped with the current time.
    pub fn ok() -> Self {
        Self { status: "OK".to_string(), timestamp: crate::normalizer::iso_now() }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
