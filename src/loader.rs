//! Record-set loading.
//!
//! Parses a JSON array of flat objects into a [`Dataset`]. Two entry
//! points are offered: [`parse_records`] returns a typed error so the
//! caller decides what a bad input means, and [`load`] degrades to an
//! empty dataset after logging the problem.

use crate::models::{Dataset, FieldValue, Record};
use anyhow::{Context, Result};
use serde_json::Value as JsonValue;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, error};

/// Errors produced while decoding a record set.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The input is not syntactically valid JSON.
    #[error("invalid JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    /// The top-level value is valid JSON but not an array.
    #[error("expected a top-level JSON array, found {found}")]
    NotAnArray { found: &'static str },

    /// An array element is not an object.
    #[error("record {index} is not a JSON object (found {found})")]
    NotAnObject { index: usize, found: &'static str },
}

/// Decode `raw` into a dataset, preserving input order and each record's
/// fields verbatim.
pub fn parse_records(raw: &str) -> Result<Dataset, LoadError> {
    let root: JsonValue = serde_json::from_str(raw)?;

    let items = match root {
        JsonValue::Array(items) => items,
        other => {
            return Err(LoadError::NotAnArray {
                found: json_kind(&other),
            })
        }
    };

    let mut records = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        let obj = item.as_object().ok_or_else(|| LoadError::NotAnObject {
            index,
            found: json_kind(item),
        })?;

        records.push(
            obj.iter()
                .map(|(key, val)| (key.clone(), FieldValue::from(val)))
                .collect::<Record>(),
        );
    }

    debug!("Decoded {} records", records.len());
    Ok(Dataset::from_records(records))
}

/// Decode `raw`, falling back to an empty dataset on failure.
///
/// The failure is reported through the log and never reaches the caller.
pub fn load(raw: &str) -> Dataset {
    match parse_records(raw) {
        Ok(dataset) => dataset,
        Err(e) => {
            error!("Invalid record data provided: {}", e);
            Dataset::default()
        }
    }
}

/// Read and decode a record-set file.
pub fn load_file(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;

    parse_records(&text).with_context(|| format!("Failed to parse records: {}", path.display()))
}

fn json_kind(val: &JsonValue) -> &'static str {
    match val {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const PEOPLE: &str = include_str!("../fixtures/people.json");
    const MALFORMED: &str = include_str!("../fixtures/malformed.json");

    #[test]
    fn test_parse_reference_set() {
        let dataset = parse_records(PEOPLE).unwrap();
        assert_eq!(dataset.len(), 6);

        let first = &dataset.records()[0];
        assert_eq!(first.text_or("name", ""), "Alice");
        assert_eq!(first.get("id"), Some(&FieldValue::Integer(1)));
        assert_eq!(first.len(), 5);

        let names: Vec<&str> = dataset.iter().map(|r| r.text_or("name", "")).collect();
        assert_eq!(names, ["Alice", "Bob", "Charlie", "Diana", "Eve", "Frank"]);
    }

    #[test]
    fn test_fields_kept_verbatim() {
        let dataset = parse_records(r#"[{"City": "new YORK", "extra": null}, {}]"#).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records()[0].text_or("City", ""), "new YORK");
        assert_eq!(dataset.records()[0].get("extra"), Some(&FieldValue::Null));
        assert!(dataset.records()[1].is_empty());
    }

    #[test]
    fn test_field_order_follows_input() {
        let dataset = parse_records(r#"[{"name": "Alice", "city": "Oslo", "age": 30}]"#).unwrap();
        let keys: Vec<&str> = dataset.records()[0].fields().map(|(k, _)| k).collect();
        assert_eq!(keys, ["name", "city", "age"]);

        let json = serde_json::to_string(&dataset.records()[0]).unwrap();
        assert_eq!(json, r#"{"name":"Alice","city":"Oslo","age":30}"#);
    }

    #[test]
    fn test_malformed_input_is_syntax_error() {
        let err = parse_records(MALFORMED).unwrap_err();
        assert!(matches!(err, LoadError::Syntax(_)));
    }

    #[test]
    fn test_non_array_root() {
        let err = parse_records(r#"{"name": "Alice"}"#).unwrap_err();
        assert!(matches!(err, LoadError::NotAnArray { found: "object" }));
    }

    #[test]
    fn test_non_object_element() {
        let err = parse_records(r#"[{"name": "Alice"}, 42]"#).unwrap_err();
        assert!(matches!(
            err,
            LoadError::NotAnObject {
                index: 1,
                found: "number"
            }
        ));
        assert!(err.to_string().contains("record 1"));
    }

    #[test]
    fn test_load_soft_fails_to_empty() {
        assert!(load(MALFORMED).is_empty());
        assert!(load("").is_empty());
        assert!(load("not json at all").is_empty());
        assert!(load(r#"{"a": 1}"#).is_empty());
        assert!(load("[1]").is_empty());
        assert!(load(r#"[{"name": "Alice"}, "Bob"]"#).is_empty());
        assert_eq!(load(PEOPLE).len(), 6);
    }

    #[test]
    fn test_empty_array() {
        assert!(parse_records("[]").unwrap().is_empty());
    }

    #[test]
    fn test_load_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(PEOPLE.as_bytes()).unwrap();

        let dataset = load_file(file.path()).unwrap();
        assert_eq!(dataset.len(), 6);
    }

    #[test]
    fn test_load_file_missing() {
        let err = load_file(Path::new("/nonexistent/people.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read input file"));
    }
}
