//! Test builders: ergonomic constructors for raw payloads, records and
//! seeded stores.
//!
//! These panic on invalid input rather than returning `Result`.

use druglist_core::{DrugRecord, Store};
use fake::{
    faker::{company::en::CompanyName, lorem::en::Word},
    Fake,
};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// RawDrugBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for one raw (pre-normalisation) drug object with arbitrary
/// key spellings.
///
/// ```rust
/// let raw = RawDrugBuilder::new()
///     .set("drugCode", "A1")
///     .set("manufacturer", "Acme")
///     .build();
/// ```
#[derive(Default)]
pub struct RawDrugBuilder {
    fields: Map<String, Value>,
}

impl RawDrugBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A raw object with every required field under its canonical key.
    pub fn complete(code: &str, company: &str, launch_date: &str) -> Self {
        Self::new()
            .set("code", code)
            .set("genericName", "generic")
            .set("brandName", "BRAND")
            .set("company", company)
            .set("launchDate", launch_date)
    }

    pub fn set(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn remove(mut self, key: &str) -> Self {
        self.fields.remove(key);
        self
    }

    pub fn build(self) -> Value {
        Value::Object(self.fields)
    }
}

// ---------------------------------------------------------------------------
// Records and stores
// ---------------------------------------------------------------------------

pub fn record(code: &str, company: &str, launch_date: &str) -> DrugRecord {
    DrugRecord {
        code: code.to_string(),
        generic_name: format!("{}-generic", code.to_lowercase()),
        brand_name: format!("{}-BRAND", code.to_uppercase()),
        company: company.to_string(),
        launch_date: launch_date.to_string(),
    }
}

/// `n` plausible records spread over `companies` distinct fake companies,
/// with distinct launch dates (one day apart, oldest first).
pub fn fake_records(n: usize, companies: usize) -> Vec<DrugRecord> {
    let names: Vec<String> = (0..companies.max(1))
        .map(|i| format!("{} #{i}", CompanyName().fake::<String>()))
        .collect();
    let epoch = chrono::NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();

    (0..n)
        .map(|i| {
            let launch = epoch + chrono::Days::new(i as u64);
            DrugRecord {
                code: format!("FK-{i:05}"),
                generic_name: Word().fake::<String>(),
                brand_name: Word().fake::<String>().to_uppercase(),
                company: names[i % names.len()].clone(),
                launch_date: format!("{launch}T00:00:00Z"),
            }
        })
        .collect()
}

/// In-memory store pre-loaded with `records`.
pub fn seeded_store(records: &[DrugRecord]) -> Store {
    let store = Store::in_memory().expect("in-memory store");
    store.replace_all(records).expect("seed store");
    store
}
