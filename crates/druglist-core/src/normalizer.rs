//! Normalizer: maps one schema-variable raw JSON object onto a [`DrugRecord`].
//!
//! Each canonical field is resolved from an ordered alias list: the first
//! alias holding a truthy value wins, otherwise the field default applies.
//! The alias table is plain data ([`ALIASES`]); extending it never touches
//! the lookup code.
//!
//! | Field | Aliases (first match wins) | Default |
//! |-------|----------------------------|---------|
//! | `code` | `code`, `drugCode`, `id`, `drug_id` | `DRUG-<index+1>` |
//! | `genericName` | `genericName`, `generic_name`, `generic` | `""` |
//! | `brandName` | `brandName`, `brand_name`, `brand` | `""` |
//! | `company` | `company`, `companyName`, `manufacturer`, `manufacturerName` | `""` |
//! | `launchDate` | `launchDate`, `launch_date`, `date` | ingestion time |

use crate::types::DrugRecord;
use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};

/// A canonical drug field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Code,
    GenericName,
    BrandName,
    Company,
    LaunchDate,
}

/// Candidate raw keys per canonical field, in precedence order.
pub const ALIASES: &[(Field, &[&str])] = &[
    (Field::Code, &["code", "drugCode", "id", "drug_id"]),
    (Field::GenericName, &["genericName", "generic_name", "generic"]),
    (Field::BrandName, &["brandName", "brand_name", "brand"]),
    (Field::Company, &["company", "companyName", "manufacturer", "manufacturerName"]),
    (Field::LaunchDate, &["launchDate", "launch_date", "date"]),
];

impl Field {
    /// The alias list for this field from [`ALIASES`].
    pub fn aliases(self) -> &'static [&'static str] {
        ALIASES
            .iter()
            .find(|(field, _)| *field == self)
            .map(|(_, aliases)| *aliases)
            .unwrap_or(&[])
    }

    /// The canonical (camelCase) key for this field.
    pub fn key(self) -> &'static str {
        match self {
            Field::Code => "code",
            Field::GenericName => "genericName",
            Field::BrandName => "brandName",
            Field::Company => "company",
            Field::LaunchDate => "launchDate",
        }
    }
}

/// Current UTC time as ISO-8601 with millisecond precision
/// (`2024-01-15T10:00:00.123Z`).
pub fn iso_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Normalise `raw` (the element at zero-based `index` of its batch) into a
/// [`DrugRecord`]. Never fails; validity is checked by the caller.
///
/// `now` is the value used for an absent launch date. A non-object `raw`
/// behaves like an object with no keys.
pub fn normalize(raw: &Value, index: usize, now: &str) -> DrugRecord {
    let empty = Map::new();
    let obj = raw.as_object().unwrap_or(&empty);
    let resolve = |field: Field| first_truthy(obj, field.aliases());

    DrugRecord {
        code: resolve(Field::Code).unwrap_or_else(|| format!("DRUG-{}", index + 1)),
        generic_name: resolve(Field::GenericName).unwrap_or_default(),
        brand_name: resolve(Field::BrandName).unwrap_or_default(),
        company: resolve(Field::Company).unwrap_or_default(),
        launch_date: resolve(Field::LaunchDate).unwrap_or_else(|| now.to_string()),
    }
}

/// Return the text of the first alias in `aliases` whose value is truthy.
pub fn first_truthy(obj: &Map<String, Value>, aliases: &[&str]) -> Option<String> {
    aliases.iter().find_map(|key| obj.get(*key).and_then(truthy_text))
}

/// Text form of a truthy JSON value, or `None` for falsy ones
/// (`null`, `false`, `0`, `""`, `[]`, `{}`).
fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Bool(true) => Some("true".to_string()),
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Number(n) => Some(n.to_string()),
        Value::Array(a) if a.is_empty() => None,
        Value::Object(o) if o.is_empty() => None,
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
