//! Data models for the summarizer.
//!
//! This module contains the core data structures used throughout the
//! crate: scalar field values, records, and the dataset they form.

use crate::analysis::CategoryCount;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::fmt;

/// Default substituted for categorical fields that are absent.
pub const MISSING_CATEGORY: &str = "N/A";

/// A single scalar cell of a record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Hash so values can key a distribution --

impl Eq for FieldValue {}

impl std::hash::Hash for FieldValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            FieldValue::String(s) => s.hash(state),
            FieldValue::Integer(i) => i.hash(state),
            // 0.0 and -0.0 compare equal, so they must hash alike.
            FieldValue::Float(f) if *f == 0.0 => 0u64.hash(state),
            FieldValue::Float(f) => f.to_bits().hash(state),
            FieldValue::Bool(b) => b.hash(state),
            FieldValue::Null => {}
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => write!(f, "null"),
        }
    }
}

impl From<&JsonValue> for FieldValue {
    fn from(val: &JsonValue) -> Self {
        match val {
            JsonValue::String(s) => FieldValue::String(s.clone()),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    FieldValue::Integer(i)
                } else if let Some(f) = n.as_f64() {
                    FieldValue::Float(f)
                } else {
                    FieldValue::String(n.to_string())
                }
            }
            JsonValue::Bool(b) => FieldValue::Bool(*b),
            JsonValue::Null => FieldValue::Null,
            // Nested values are not analyzed; keep their compact text.
            other => FieldValue::String(other.to_string()),
        }
    }
}

impl FieldValue {
    /// Interpret the value as a number, if it is one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Borrow the text of a string cell.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }
}

/// One flat key-value entry of a dataset.
///
/// Fields keep their input order. Field access never fails: each
/// accessor documents the default it substitutes when a field is absent
/// or has an unexpected type.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, FieldValue>,
}

impl Record {
    /// Build a record from its fields.
    pub fn new(fields: IndexMap<String, FieldValue>) -> Self {
        Self { fields }
    }

    /// Raw lookup of a field.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Numeric value of a field, or `default` when absent or non-numeric.
    pub fn number_or(&self, key: &str, default: f64) -> f64 {
        self.get(key).and_then(FieldValue::as_f64).unwrap_or(default)
    }

    /// Text of a string field, or `default` when absent or not a string.
    pub fn text_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).and_then(FieldValue::as_str).unwrap_or(default)
    }

    /// Grouping key of a categorical field.
    ///
    /// The raw value is used as is, so `1` and `"1"` stay distinct and
    /// string case is preserved. An absent field maps to the string
    /// [`MISSING_CATEGORY`].
    pub fn category(&self, key: &str) -> FieldValue {
        self.get(key)
            .cloned()
            .unwrap_or_else(|| FieldValue::String(MISSING_CATEGORY.to_string()))
    }

    /// Iterate over the fields in input order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields present.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields at all.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, FieldValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, FieldValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// The ordered sequence of records under analysis.
///
/// Input order is preserved and nothing is mutated after construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Wrap an already-decoded list of records.
    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// All records, in input order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Iterate over the records in input order.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Structured view of a dataset, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Number of records.
    pub total_records: usize,
    /// Mean of the age field (0 for an empty dataset).
    pub average_age: f64,
    /// Role counts in first-seen order.
    pub role_distribution: Vec<CategoryCount>,
    /// The called-out subset of the dataset.
    pub highlight: Highlight,
}

/// Names of the records that match a city and a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub city: String,
    pub role: String,
    pub names: Vec<String>,
}

/// Metadata about a generated report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    /// Where the records came from (a path or `<stdin>`).
    pub source: String,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Version of the tool that produced it.
    pub tool_version: String,
}

impl ReportMetadata {
    /// Metadata stamped with the current time and crate version.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            generated_at: Utc::now(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// A complete report: metadata plus the summary.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub summary: Summary,
}
