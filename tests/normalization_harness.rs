//! Normalizer integration harness.
//!
//! # What this covers
//!
//! - **Alias resolution**: every alias of every field resolves, and the first
//!   truthy alias wins over later ones.
//! - **Defaults**: absent `code` becomes `DRUG-<index+1>`; absent
//!   `launchDate` becomes the ingestion time; absent required fields become
//!   empty strings and make the record invalid.
//! - **Truthiness**: empty strings, `null`, `false` and `0` are skipped in
//!   favour of the next alias; numbers and booleans are stringified.
//!
//! # Running
//!
//! ```sh
//! cargo test --test normalization_harness
//! ```

mod common;
use common::*;

use druglist_core::normalizer::{iso_now, normalize, Field, ALIASES};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};

const NOW: &str = "2024-06-01T12:00:00.000Z";

// ---------------------------------------------------------------------------
// Alias resolution
// ---------------------------------------------------------------------------

/// Each alias on its own yields the field value.
#[test]
fn every_alias_resolves_on_its_own() {
    for (field, aliases) in ALIASES {
        for alias in *aliases {
            let raw = json!({ *alias: "value" });
            let record = normalize(&raw, 0, NOW);
            let actual = match field {
                Field::Code => &record.code,
                Field::GenericName => &record.generic_name,
                Field::BrandName => &record.brand_name,
                Field::Company => &record.company,
                Field::LaunchDate => &record.launch_date,
            };
            assert_eq!(actual, "value", "alias {alias:?} for {field:?}");
        }
    }
}

#[rstest]
#[case::code(json!({"code": "first", "drugCode": "second"}), "first")]
#[case::code_skips_empty(json!({"code": "", "drugCode": "second"}), "second")]
#[case::code_skips_null(json!({"code": null, "id": "third"}), "third")]
#[case::code_skips_zero(json!({"drugCode": 0, "drug_id": "fourth"}), "fourth")]
#[case::numeric_code(json!({"id": 42}), "42")]
fn first_truthy_code_alias_wins(#[case] raw: Value, #[case] expected: &str) {
    assert_eq!(normalize(&raw, 0, NOW).code, expected);
}

#[rstest]
#[case::company_name(json!({"companyName": "Acme", "manufacturer": "Other"}), "Acme")]
#[case::manufacturer(json!({"company": "", "manufacturer": "Globex"}), "Globex")]
#[case::manufacturer_name(json!({"company": false, "manufacturerName": "Initech"}), "Initech")]
fn company_alias_precedence(#[case] raw: Value, #[case] expected: &str) {
    assert_eq!(normalize(&raw, 0, NOW).company, expected);
}

/// Strings are taken verbatim, including surrounding whitespace.
#[test]
fn strings_are_not_trimmed() {
    let raw = json!({"genericName": "  spaced  "});
    assert_eq!(normalize(&raw, 0, NOW).generic_name, "  spaced  ");
}

#[test]
fn short_aliases_produce_valid_record() {
    let raw = json!({"id": "A1", "generic": "x", "brand": "Y", "manufacturer": "Z"});
    let record = normalize(&raw, 0, NOW);
    assert_valid_record!(record);
    assert_eq!(record.code, "A1");
    assert_eq!(record.generic_name, "x");
    assert_eq!(record.brand_name, "Y");
    assert_eq!(record.company, "Z");
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[rstest]
#[case(0, "DRUG-1")]
#[case(4, "DRUG-5")]
#[case(99, "DRUG-100")]
fn absent_code_defaults_to_position(#[case] index: usize, #[case] expected: &str) {
    let raw = RawDrugBuilder::complete("ignored", "Acme", NOW).remove("code").build();
    assert_eq!(normalize(&raw, index, &iso_now()).code, expected);
}

/// An absent launch date is stamped with a parseable time no earlier than
/// the start of the run, compared at the stamp's millisecond precision.
#[test]
fn absent_launch_date_defaults_to_now() {
    use chrono::SubsecRound;
    let before = chrono::Utc::now().trunc_subsecs(3);
    let raw = RawDrugBuilder::complete("C1", "Acme", "x").remove("launchDate").build();
    let record = normalize(&raw, 0, &iso_now());

    let stamped = chrono::DateTime::parse_from_rfc3339(&record.launch_date)
        .expect("launch date should be RFC 3339")
        .with_timezone(&chrono::Utc);
    assert!(stamped >= before, "{stamped} earlier than {before}");
    assert!(record.launch_date.ends_with('Z'));
}

#[rstest]
#[case::generic("genericName")]
#[case::brand("brandName")]
#[case::company("company")]
fn missing_required_field_is_empty_and_invalid(#[case] key: &str) {
    let raw = RawDrugBuilder::complete("C1", "Acme", NOW).remove(key).build();
    let record = normalize(&raw, 0, NOW);
    assert!(!record.is_valid());
    assert_eq!(record.missing_fields().len(), 1);
}

#[test]
fn non_object_normalises_to_defaults() {
    let record = normalize(&json!("just a string"), 2, NOW);
    assert_eq!(record.code, "DRUG-3");
    assert_eq!(record.launch_date, NOW);
    assert!(record.generic_name.is_empty());
    assert!(!record.is_valid());
}
