//! Static payloads used across harnesses.
//!
//! Every shape the ingestor accepts (bare array, `{drugs}`, `{data}`) is
//! covered, plus the alias spellings seen in real exports.

/// Three drugs in canonical spelling, as a bare array.
pub const BARE_ARRAY: &str = r#"[
  {"code": "0006-0568", "genericName": "vorinostat", "brandName": "ZOLINZA", "company": "Merck Sharp & Dohme Corp.", "launchDate": "2004-02-14T23:01:10Z"},
  {"code": "0078-0401", "genericName": "imatinib", "brandName": "GLEEVEC", "company": "Novartis Pharmaceuticals Corporation", "launchDate": "2001-05-10T00:00:00Z"},
  {"code": "50242-134", "genericName": "trastuzumab", "brandName": "HERCEPTIN", "company": "Genentech, Inc.", "launchDate": "1998-09-25T00:00:00Z"}
]"#;

/// Records using the second-, third- and fourth-priority aliases.
pub const ALIAS_SPELLINGS: &str = r#"[
  {"drugCode": "A-1", "generic_name": "ibrutinib", "brand_name": "IMBRUVICA", "companyName": "Pharmacyclics LLC", "launch_date": "2013-11-13"},
  {"id": "A-2", "generic": "nivolumab", "brand": "OPDIVO", "manufacturer": "Bristol-Myers Squibb", "date": "2014-12-22"},
  {"drug_id": "A-3", "generic": "pembrolizumab", "brand": "KEYTRUDA", "manufacturerName": "Merck Sharp & Dohme Corp.", "date": "2014-09-04"}
]"#;

/// Two valid records, one missing its brand and one that is not an object.
pub const WITH_INVALID: &str = r#"[
  {"code": "V-1", "genericName": "lenalidomide", "brandName": "REVLIMID", "company": "Celgene Corporation", "launchDate": "2005-12-27"},
  {"code": "X-1", "genericName": "orphan", "company": "Nobody Ltd"},
  "not a record",
  {"code": "V-2", "genericName": "ruxolitinib", "brandName": "JAKAFI", "company": "Incyte Corporation", "launchDate": "2011-11-16"}
]"#;

/// Wrap `array_json` under `key` (`drugs` or `data`).
pub fn wrapped(key: &str, array_json: &str) -> String {
    format!(r#"{{"{key}": {array_json}}}"#)
}

/// An object with neither a `drugs` nor a `data` array.
pub const NO_RECORD_ARRAY: &str = r#"{"items": [{"code": "Z"}], "count": 1}"#;

pub const NOT_JSON: &str = "{ this is not json";
